use reqwest::Method;
use serde::Serialize;

use super::text_description;
use crate::blocks::{SectionData, SectionPropertyData};
use crate::error::Result;
use crate::record::Record;
use crate::routes::lp;
use crate::valence::Valence;

/// Body of a section create or update
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SectionInput {
    pub name: String,
    pub code: String,
    #[serde(serialize_with = "text_description")]
    pub description: String,
}

/// Section enrollment settings of a course
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SectionSettingsInput {
    pub enrollment_style: i64,
    pub enrollment_quantity: i64,
    pub auto_enroll: bool,
    pub randomize_enrollments: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct UserEnrollment {
    user_id: i64,
}

fn sections_route(org_unit_id: i64) -> String {
    lp(&format!("/{}/sections/", org_unit_id))
}

fn section_route(org_unit_id: i64, section_id: i64) -> String {
    lp(&format!("/{}/sections/{}", org_unit_id, section_id))
}

fn settings_route(org_unit_id: i64) -> String {
    lp(&format!("/{}/sections/settings", org_unit_id))
}

impl Valence {
    /// Sections of a course offering
    pub fn get_course_sections(&self, org_unit_id: i64) -> Result<Vec<SectionData>> {
        self.fetch_many(&sections_route(org_unit_id))
    }

    /// One section
    pub fn get_course_section(
        &self,
        org_unit_id: i64,
        section_id: i64,
    ) -> Result<Option<SectionData>> {
        self.fetch(&section_route(org_unit_id, section_id))
    }

    /// Create a section
    pub fn create_course_section(
        &self,
        org_unit_id: i64,
        input: &SectionInput,
    ) -> Result<Option<SectionData>> {
        self.mutate(&sections_route(org_unit_id), Method::POST, input)
    }

    /// Update a section
    pub fn update_course_section(
        &self,
        org_unit_id: i64,
        section_id: i64,
        input: &SectionInput,
    ) -> Result<Option<SectionData>> {
        self.mutate(&section_route(org_unit_id, section_id), Method::PUT, input)
    }

    /// Set up sections for a course that has none yet
    pub fn initialize_course_sections(
        &self,
        org_unit_id: i64,
        input: &SectionSettingsInput,
    ) -> Result<Option<SectionData>> {
        self.mutate(&sections_route(org_unit_id), Method::PUT, input)
    }

    /// Delete a section
    pub fn delete_course_section(&self, org_unit_id: i64, section_id: i64) -> Result<()> {
        self.delete(&section_route(org_unit_id, section_id))
    }

    /// Enroll a user in a section. The API answers with an untyped body.
    pub fn enroll_user_in_course_section(
        &self,
        org_unit_id: i64,
        section_id: i64,
        user_id: i64,
    ) -> Result<Option<Record>> {
        let route = format!("{}/enrollments/", section_route(org_unit_id, section_id));
        self.mutate(&route, Method::POST, &UserEnrollment { user_id })
    }

    /// Section settings of a course offering
    pub fn get_course_section_settings(
        &self,
        org_unit_id: i64,
    ) -> Result<Option<SectionPropertyData>> {
        self.fetch(&settings_route(org_unit_id))
    }

    /// Update the section settings of a course offering
    pub fn update_course_section_settings(
        &self,
        org_unit_id: i64,
        input: &SectionSettingsInput,
    ) -> Result<Option<SectionPropertyData>> {
        self.mutate(&settings_route(org_unit_id), Method::PUT, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_routes() {
        assert_eq!(sections_route(6606), "/d2l/api/lp/1.30/6606/sections/");
        assert_eq!(section_route(6606, 7), "/d2l/api/lp/1.30/6606/sections/7");
        assert_eq!(settings_route(6606), "/d2l/api/lp/1.30/6606/sections/settings");
    }

    #[test]
    fn test_settings_body() {
        let input = SectionSettingsInput {
            enrollment_style: 1,
            enrollment_quantity: 2,
            auto_enroll: true,
            randomize_enrollments: false,
        };
        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            json!({
                "EnrollmentStyle": 1,
                "EnrollmentQuantity": 2,
                "AutoEnroll": true,
                "RandomizeEnrollments": false
            })
        );
    }

    #[test]
    fn test_section_body() {
        let input = SectionInput {
            name: "Lab A".to_string(),
            code: "LAB-A".to_string(),
            description: "Tuesday lab".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            json!({
                "Name": "Lab A",
                "Code": "LAB-A",
                "Description": {"Type": "Text", "Content": "Tuesday lab"}
            })
        );
    }
}
