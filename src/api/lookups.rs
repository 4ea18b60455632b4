use crate::error::Result;
use crate::routes::{lp, query_value};
use crate::valence::Valence;

/// Org unit type codes used by the derived lookups
const COURSE_OFFERING: &str = "Course Offering";
const SEMESTER: &str = "Semester";
const COURSE_TEMPLATE: &str = "Course Template";
const DEPARTMENT: &str = "Department";

impl Valence {
    /// User ID for a username, `None` if no such user
    pub fn get_user_id_from_username(&self, username: &str) -> Result<Option<i64>> {
        let route = lp(&format!("/users/?username={}", query_value(username)));
        self.lookup(&route, "UserId")
    }

    /// User ID for an org-defined ID, `None` if no such user
    pub fn get_user_id_from_org_defined_id(&self, org_defined_id: &str) -> Result<Option<i64>> {
        let route = lp(&format!("/users/?orgDefinedId={}", query_value(org_defined_id)));
        self.lookup(&route, "UserId")
    }

    /// Org unit ID of the first org unit of type `org_unit_type` whose code
    /// is exactly `code`
    pub fn get_org_unit_id_from_code(&self, code: &str, org_unit_type: i64) -> Result<Option<i64>> {
        let route = lp(&format!(
            "/orgstructure/?orgUnitType={}&exactOrgUnitCode={}",
            org_unit_type,
            query_value(code)
        ));
        self.lookup(&route, "Items/0/Identifier")
    }

    /// Org unit ID of the course offering with this code
    pub fn get_org_unit_id_from_offering_code(&self, code: &str) -> Result<Option<i64>> {
        self.org_unit_id_of_type(code, COURSE_OFFERING)
    }

    /// Org unit ID of the semester with this code
    pub fn get_org_unit_id_from_semester_code(&self, code: &str) -> Result<Option<i64>> {
        self.org_unit_id_of_type(code, SEMESTER)
    }

    /// Org unit ID of the course template with this code
    pub fn get_org_unit_id_from_template_code(&self, code: &str) -> Result<Option<i64>> {
        self.org_unit_id_of_type(code, COURSE_TEMPLATE)
    }

    /// Org unit ID of the department with this code
    pub fn get_org_unit_id_from_department_code(&self, code: &str) -> Result<Option<i64>> {
        self.org_unit_id_of_type(code, DEPARTMENT)
    }

    fn org_unit_id_of_type(&self, code: &str, type_code: &str) -> Result<Option<i64>> {
        match self.org_unit_type_id(type_code)? {
            Some(type_id) => self.get_org_unit_id_from_code(code, type_id),
            None => Ok(None),
        }
    }
}
