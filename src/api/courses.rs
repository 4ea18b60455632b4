use reqwest::Method;
use serde::Serialize;
use std::path::Path;

use super::text_description;
use crate::blocks::CourseOffering;
use crate::error::Result;
use crate::handles::CreatedCourse;
use crate::routes::lp;
use crate::time::Time;
use crate::valence::Valence;

/// Body of a course offering creation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateCourseOffering {
    pub name: String,
    pub code: String,
    pub path: String,
    pub course_template_id: i64,
    pub semester_id: i64,
    pub start_date: Option<Time>,
    pub end_date: Option<Time>,
    pub locale_id: Option<i64>,
    pub force_locale: bool,
    pub show_address_book: bool,
    pub can_self_register: bool,
    #[serde(serialize_with = "text_description")]
    pub description: Option<String>,
}

impl CreateCourseOffering {
    /// An undated offering with no description and default flags
    pub fn new(
        name: impl Into<String>,
        code: impl Into<String>,
        course_template_id: i64,
        semester_id: i64,
    ) -> Self {
        CreateCourseOffering {
            name: name.into(),
            code: code.into(),
            path: String::new(),
            course_template_id,
            semester_id,
            start_date: None,
            end_date: None,
            locale_id: None,
            force_locale: false,
            show_address_book: false,
            can_self_register: false,
            description: None,
        }
    }
}

/// Body of a course offering update
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateCourseOffering {
    pub name: String,
    pub code: String,
    pub start_date: Option<Time>,
    pub end_date: Option<Time>,
    pub is_active: bool,
    #[serde(serialize_with = "text_description")]
    pub description: String,
}

impl Valence {
    /// Course offering by org unit ID
    pub fn get_course_offering(&self, org_unit_id: i64) -> Result<Option<CourseOffering>> {
        self.fetch(&lp(&format!("/courses/{}", org_unit_id)))
    }

    /// Create a course offering.
    ///
    /// With return-object-on-create enabled the result is a course handle
    /// built by the session's course factory.
    pub fn create_course_offering(
        &self,
        input: &CreateCourseOffering,
    ) -> Result<Option<CreatedCourse>> {
        let offering: Option<CourseOffering> =
            self.mutate(&lp("/courses/"), Method::POST, input)?;

        Ok(offering.map(|offering| match offering.identifier() {
            Some(id) if self.return_object_on_create() => CreatedCourse::Object(self.course(id)),
            _ => CreatedCourse::Record(offering),
        }))
    }

    /// Update a course offering
    pub fn update_course_offering(
        &self,
        org_unit_id: i64,
        input: &UpdateCourseOffering,
    ) -> Result<Option<CourseOffering>> {
        self.mutate(&lp(&format!("/courses/{}", org_unit_id)), Method::PUT, input)
    }

    /// Delete a course offering
    pub fn delete_course_offering(&self, org_unit_id: i64) -> Result<()> {
        self.delete(&lp(&format!("/courses/{}", org_unit_id)))
    }

    /// Download the course image into `path`
    pub fn get_course_image(&self, org_unit_id: i64, path: &Path) -> Result<bool> {
        self.request_file(&lp(&format!("/courses/{}/image", org_unit_id)), path)
    }

    /// Upload the image at `path` as the course banner, sent under the file name `name`
    pub fn upload_course_image(&self, org_unit_id: i64, path: &Path, name: &str) -> Result<bool> {
        let route = lp(&format!("/courses/{}/image", org_unit_id));
        self.send_file(&route, Method::PUT, path, "Image", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_body() {
        let mut input = CreateCourseOffering::new("Intro to Rust", "RUST-101", 6605, 6607);
        input.path = "/content/rust101".to_string();
        input.start_date = Time::from_unix(1_724_677_200);
        input.description = Some("Ownership first".to_string());

        let body = serde_json::to_value(&input).unwrap();
        assert_eq!(
            body,
            json!({
                "Name": "Intro to Rust",
                "Code": "RUST-101",
                "Path": "/content/rust101",
                "CourseTemplateId": 6605,
                "SemesterId": 6607,
                "StartDate": "2024-08-26T13:00:00.000Z",
                "EndDate": null,
                "LocaleId": null,
                "ForceLocale": false,
                "ShowAddressBook": false,
                "CanSelfRegister": false,
                "Description": {"Type": "Text", "Content": "Ownership first"}
            })
        );
    }

    #[test]
    fn test_update_body() {
        let input = UpdateCourseOffering {
            name: "Intro to Rust".to_string(),
            code: "RUST-101".to_string(),
            start_date: None,
            end_date: None,
            is_active: true,
            description: String::new(),
        };

        let body = serde_json::to_value(&input).unwrap();
        assert_eq!(body["IsActive"], json!(true));
        assert_eq!(body["StartDate"], json!(null));
        assert_eq!(body["Description"], json!({"Type": "Text", "Content": ""}));
    }
}
