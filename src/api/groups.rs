use reqwest::Method;
use serde::Serialize;

use super::text_description;
use crate::blocks::{GroupCategoryData, GroupData};
use crate::error::Result;
use crate::record::Record;
use crate::routes::lp;
use crate::time::Time;
use crate::valence::Valence;

/// Body of a group category create or update
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GroupCategoryInput {
    pub name: String,
    #[serde(serialize_with = "text_description")]
    pub description: String,
    pub enrollment_style: i64,
    pub enrollment_quantity: Option<i64>,
    pub auto_enroll: bool,
    pub randomize_enrollments: bool,
    pub number_of_groups: Option<i64>,
    pub max_users_per_group: Option<i64>,
    pub allocate_after_expiry: bool,
    pub self_enrollment_expiry_date: Option<Time>,
    pub group_prefix: Option<String>,
    pub restricted_by_org_unit_id: Option<i64>,
}

impl GroupCategoryInput {
    /// A category with the given enrollment style and everything else unset
    pub fn new(name: impl Into<String>, enrollment_style: i64) -> Self {
        GroupCategoryInput {
            name: name.into(),
            description: String::new(),
            enrollment_style,
            enrollment_quantity: None,
            auto_enroll: false,
            randomize_enrollments: false,
            number_of_groups: None,
            max_users_per_group: None,
            allocate_after_expiry: false,
            self_enrollment_expiry_date: None,
            group_prefix: None,
            restricted_by_org_unit_id: None,
        }
    }
}

/// Body of a group create or update
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GroupInput {
    pub name: String,
    pub code: String,
    #[serde(serialize_with = "text_description")]
    pub description: String,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct UserEnrollment {
    user_id: i64,
}

fn categories_route(org_unit_id: i64) -> String {
    lp(&format!("/{}/groupcategories/", org_unit_id))
}

fn category_route(org_unit_id: i64, category_id: i64) -> String {
    lp(&format!("/{}/groupcategories/{}", org_unit_id, category_id))
}

fn groups_route(org_unit_id: i64, category_id: i64) -> String {
    format!("{}/groups/", category_route(org_unit_id, category_id))
}

fn group_route(org_unit_id: i64, category_id: i64, group_id: i64) -> String {
    format!("{}/groups/{}", category_route(org_unit_id, category_id), group_id)
}

impl Valence {
    /// Group categories of a course offering
    pub fn get_course_group_categories(&self, org_unit_id: i64) -> Result<Vec<GroupCategoryData>> {
        self.fetch_many(&categories_route(org_unit_id))
    }

    /// One group category
    pub fn get_course_group_category(
        &self,
        org_unit_id: i64,
        category_id: i64,
    ) -> Result<Option<GroupCategoryData>> {
        self.fetch(&category_route(org_unit_id, category_id))
    }

    /// Create a group category
    pub fn create_course_group_category(
        &self,
        org_unit_id: i64,
        input: &GroupCategoryInput,
    ) -> Result<Option<GroupCategoryData>> {
        self.mutate(&categories_route(org_unit_id), Method::POST, input)
    }

    /// Update a group category
    pub fn update_course_group_category(
        &self,
        org_unit_id: i64,
        category_id: i64,
        input: &GroupCategoryInput,
    ) -> Result<Option<GroupCategoryData>> {
        self.mutate(&category_route(org_unit_id, category_id), Method::PUT, input)
    }

    /// Delete a group category and its groups
    pub fn delete_course_group_category(&self, org_unit_id: i64, category_id: i64) -> Result<()> {
        self.delete(&category_route(org_unit_id, category_id))
    }

    /// Groups in a category
    pub fn get_course_groups(&self, org_unit_id: i64, category_id: i64) -> Result<Vec<GroupData>> {
        self.fetch_many(&groups_route(org_unit_id, category_id))
    }

    /// One group
    pub fn get_course_group(
        &self,
        org_unit_id: i64,
        category_id: i64,
        group_id: i64,
    ) -> Result<Option<GroupData>> {
        self.fetch(&group_route(org_unit_id, category_id, group_id))
    }

    /// Create a group in a category
    pub fn create_course_group(
        &self,
        org_unit_id: i64,
        category_id: i64,
        input: &GroupInput,
    ) -> Result<Option<GroupData>> {
        self.mutate(&groups_route(org_unit_id, category_id), Method::POST, input)
    }

    /// Update a group
    pub fn update_course_group(
        &self,
        org_unit_id: i64,
        category_id: i64,
        group_id: i64,
        input: &GroupInput,
    ) -> Result<Option<GroupData>> {
        let route = group_route(org_unit_id, category_id, group_id);
        self.mutate(&route, Method::PUT, input)
    }

    /// Delete a group
    pub fn delete_course_group(
        &self,
        org_unit_id: i64,
        category_id: i64,
        group_id: i64,
    ) -> Result<()> {
        self.delete(&group_route(org_unit_id, category_id, group_id))
    }

    /// Enroll a user in a group. The API answers with an untyped body.
    pub fn enroll_user_in_group(
        &self,
        org_unit_id: i64,
        category_id: i64,
        group_id: i64,
        user_id: i64,
    ) -> Result<Option<Record>> {
        let route = format!(
            "{}/enrollments/",
            group_route(org_unit_id, category_id, group_id)
        );
        self.mutate(&route, Method::POST, &UserEnrollment { user_id })
    }

    /// Remove a user from a group
    pub fn unenroll_user_from_group(
        &self,
        org_unit_id: i64,
        category_id: i64,
        group_id: i64,
        user_id: i64,
    ) -> Result<()> {
        self.delete(&format!(
            "{}/enrollments/{}",
            group_route(org_unit_id, category_id, group_id),
            user_id
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_routes() {
        assert_eq!(
            groups_route(6606, 12),
            "/d2l/api/lp/1.30/6606/groupcategories/12/groups/"
        );
        assert_eq!(
            group_route(6606, 12, 40),
            "/d2l/api/lp/1.30/6606/groupcategories/12/groups/40"
        );
    }

    #[test]
    fn test_category_body() {
        let mut input = GroupCategoryInput::new("Project teams", 2);
        input.number_of_groups = Some(8);
        input.group_prefix = Some("Team".to_string());

        let body = serde_json::to_value(&input).unwrap();
        assert_eq!(body["Name"], json!("Project teams"));
        assert_eq!(body["EnrollmentStyle"], json!(2));
        assert_eq!(body["NumberOfGroups"], json!(8));
        assert_eq!(body["GroupPrefix"], json!("Team"));
        assert_eq!(body["MaxUsersPerGroup"], json!(null));
        assert_eq!(body["SelfEnrollmentExpiryDate"], json!(null));
        assert_eq!(body["Description"], json!({"Type": "Text", "Content": ""}));
        assert_eq!(body.as_object().unwrap().len(), 12);
    }
}
