use reqwest::Method;
use serde::Serialize;

use crate::blocks::EnrollmentData;
use crate::error::Result;
use crate::routes::lp;
use crate::valence::Valence;

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct CreateEnrollment {
    org_unit_id: i64,
    user_id: i64,
    role_id: i64,
}

impl Valence {
    /// Enroll a user in an org unit with the given role
    pub fn enroll_user(
        &self,
        org_unit_id: i64,
        user_id: i64,
        role_id: i64,
    ) -> Result<Option<EnrollmentData>> {
        let input = CreateEnrollment {
            org_unit_id,
            user_id,
            role_id,
        };
        self.mutate(&lp("/enrollments/"), Method::POST, &input)
    }

    /// Enroll a user with the `Student` role. `None` without a request if
    /// the organization has no such role.
    pub fn enroll_student(&self, org_unit_id: i64, user_id: i64) -> Result<Option<EnrollmentData>> {
        self.enroll_with_role(org_unit_id, user_id, "Student")
    }

    /// Enroll a user with the `Instructor` role
    pub fn enroll_instructor(
        &self,
        org_unit_id: i64,
        user_id: i64,
    ) -> Result<Option<EnrollmentData>> {
        self.enroll_with_role(org_unit_id, user_id, "Instructor")
    }

    /// Remove a user's enrollment in an org unit
    pub fn unenroll_user(&self, user_id: i64, org_unit_id: i64) -> Result<()> {
        self.delete(&lp(&format!(
            "/enrollments/users/{}/orgUnits/{}",
            user_id, org_unit_id
        )))
    }

    /// Enrollment of a user in an org unit
    pub fn get_enrollment(&self, org_unit_id: i64, user_id: i64) -> Result<Option<EnrollmentData>> {
        self.fetch(&lp(&format!(
            "/enrollments/orgUnits/{}/users/{}",
            org_unit_id, user_id
        )))
    }

    fn enroll_with_role(
        &self,
        org_unit_id: i64,
        user_id: i64,
        role: &str,
    ) -> Result<Option<EnrollmentData>> {
        match self.role_id(role)? {
            Some(role_id) => self.enroll_user(org_unit_id, user_id, role_id),
            None => Ok(None),
        }
    }
}
