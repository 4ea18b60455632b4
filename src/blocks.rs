//! Typed views over API records.
//!
//! Every block wraps a [`Record`] built from the response as-is. The field
//! list of each block documents the shape the API is known to return and
//! drives the typed getters; it is never used to filter or validate.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::ops::Deref;

use crate::paging::PagedBlock;
use crate::record::Record;
use crate::time::Time;

/// A resource shape that can be built from a response record.
pub trait Block: Sized {
    /// Fields the API is known to return for this resource
    const FIELDS: &'static [&'static str];

    /// Fields dropped when mapping a response
    const SKIP: &'static [&'static str] = &[];

    fn from_record(record: Record) -> Self;

    fn record(&self) -> &Record;

    /// Map one JSON object; `None` for anything else
    fn from_value(value: Value) -> Option<Self> {
        Record::from_value(value, Self::SKIP).map(Self::from_record)
    }

    /// Map a JSON array of objects, preserving order
    fn many(value: Value) -> Vec<Self> {
        Record::map_many(value, Self::SKIP)
            .into_iter()
            .map(Self::from_record)
            .collect()
    }

    fn to_plain(&self) -> Map<String, Value> {
        self.record().to_plain()
    }
}

impl Block for Record {
    const FIELDS: &'static [&'static str] = &[];

    fn from_record(record: Record) -> Self {
        record
    }

    fn record(&self) -> &Record {
        self
    }
}

macro_rules! block {
    (@getter $getter:ident, $field:literal, i64) => {
        pub fn $getter(&self) -> Option<i64> {
            self.0.get_i64($field)
        }
    };
    (@getter $getter:ident, $field:literal, id) => {
        pub fn $getter(&self) -> Option<i64> {
            self.0.get_id($field)
        }
    };
    (@getter $getter:ident, $field:literal, f64) => {
        pub fn $getter(&self) -> Option<f64> {
            self.0.get_f64($field)
        }
    };
    (@getter $getter:ident, $field:literal, bool) => {
        pub fn $getter(&self) -> Option<bool> {
            self.0.get_bool($field)
        }
    };
    (@getter $getter:ident, $field:literal, str) => {
        pub fn $getter(&self) -> Option<&str> {
            self.0.get_str($field)
        }
    };
    (@getter $getter:ident, $field:literal, time) => {
        pub fn $getter(&self) -> Option<Time> {
            self.0.get_str($field).and_then(Time::parse)
        }
    };
    (@getter $getter:ident, $field:literal, record) => {
        pub fn $getter(&self) -> Option<Record> {
            self.0.record($field)
        }
    };
    (@getter $getter:ident, $field:literal, value) => {
        pub fn $getter(&self) -> Option<&Value> {
            self.0.get($field)
        }
    };
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $field:literal => $getter:ident : $kind:tt ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Record);

        impl Block for $name {
            const FIELDS: &'static [&'static str] = &[$($field),*];

            fn from_record(record: Record) -> Self {
                $name(record)
            }

            fn record(&self) -> &Record {
                &self.0
            }
        }

        impl Deref for $name {
            type Target = Record;

            fn deref(&self) -> &Record {
                &self.0
            }
        }

        impl From<$name> for Record {
            fn from(block: $name) -> Record {
                block.0
            }
        }

        impl $name {
            $( block!(@getter $getter, $field, $kind); )*
        }
    };
}

block! {
    /// Root organization of the LMS instance
    Organization {
        "Identifier" => identifier: id,
        "Name" => name: str,
        "TimeZone" => time_zone: str,
    }
}

block! {
    /// The calling user as seen by the API
    WhoAmIUser {
        "Identifier" => identifier: id,
        "FirstName" => first_name: str,
        "LastName" => last_name: str,
        "UniqueName" => unique_name: str,
        "ProfileIdentifier" => profile_identifier: str,
        "Pronouns" => pronouns: str,
    }
}

block! {
    /// API versions supported for one product component
    ProductVersions {
        "ProductCode" => product_code: str,
        "LatestVersion" => latest_version: str,
        "SupportedVersions" => supported_versions: value,
    }
}

block! {
    Role {
        "Identifier" => identifier: id,
        "DisplayName" => display_name: str,
        "Code" => code: str,
        "Description" => description: str,
        "RoleAlias" => role_alias: str,
        "IsCascading" => is_cascading: bool,
        "AccessFutureCourses" => access_future_courses: bool,
        "AccessInactiveCourses" => access_inactive_courses: bool,
        "AccessPastCourses" => access_past_courses: bool,
        "ShowInGrades" => show_in_grades: bool,
        "ShowInUserProgress" => show_in_user_progress: bool,
        "InClassList" => in_class_list: bool,
    }
}

block! {
    OrgUnitType {
        "Id" => id: i64,
        "Code" => code: str,
        "Name" => name: str,
        "Description" => description: str,
        "SortOrder" => sort_order: i64,
        "Permissions" => permissions: record,
    }
}

block! {
    EnrollmentData {
        "OrgUnitId" => org_unit_id: i64,
        "UserId" => user_id: i64,
        "RoleId" => role_id: i64,
        "IsCascading" => is_cascading: bool,
    }
}

block! {
    CourseOffering {
        "Identifier" => identifier: id,
        "Name" => name: str,
        "Code" => code: str,
        "IsActive" => is_active: bool,
        "Path" => path: str,
        "StartDate" => start_date: time,
        "EndDate" => end_date: time,
        "CourseTemplate" => course_template: record,
        "Semester" => semester: record,
        "Department" => department: record,
        "Description" => description: record,
        "CanSelfRegister" => can_self_register: bool,
    }
}

block! {
    SectionData {
        "SectionId" => section_id: i64,
        "Name" => name: str,
        "Code" => code: str,
        "Description" => description: record,
        "Enrollments" => enrollments: value,
    }
}

block! {
    SectionPropertyData {
        "EnrollmentStyle" => enrollment_style: i64,
        "EnrollmentQuantity" => enrollment_quantity: i64,
        "AutoEnroll" => auto_enroll: bool,
        "RandomizeEnrollments" => randomize_enrollments: bool,
    }
}

block! {
    GroupCategoryData {
        "GroupCategoryId" => group_category_id: i64,
        "Name" => name: str,
        "Description" => description: record,
        "EnrollmentStyle" => enrollment_style: i64,
        "EnrollmentQuantity" => enrollment_quantity: i64,
        "MaxUsersPerGroup" => max_users_per_group: i64,
        "AutoEnroll" => auto_enroll: bool,
        "RandomizeEnrollments" => randomize_enrollments: bool,
        "Groups" => groups: value,
        "AllocateAfterExpiry" => allocate_after_expiry: bool,
        "SelfEnrollmentExpiryDate" => self_enrollment_expiry_date: time,
        "RestrictedByOrgUnitId" => restricted_by_org_unit_id: i64,
    }
}

block! {
    GroupData {
        "GroupId" => group_id: i64,
        "Name" => name: str,
        "Code" => code: str,
        "Description" => description: record,
        "Enrollments" => enrollments: value,
    }
}

block! {
    UserData {
        "OrgId" => org_id: i64,
        "UserId" => user_id: i64,
        "FirstName" => first_name: str,
        "MiddleName" => middle_name: str,
        "LastName" => last_name: str,
        "UserName" => user_name: str,
        "ExternalEmail" => external_email: str,
        "OrgDefinedId" => org_defined_id: str,
        "UniqueIdentifier" => unique_identifier: str,
        "Activation" => activation: record,
        "LastAccessedDate" => last_accessed_date: time,
        "Pronouns" => pronouns: str,
    }
}

block! {
    LegalPreferredNames {
        "LegalFirstName" => legal_first_name: str,
        "LegalLastName" => legal_last_name: str,
        "PreferredFirstName" => preferred_first_name: str,
        "PreferredLastName" => preferred_last_name: str,
    }
}

block! {
    /// Public profile of a user; only the commonly used fields get getters
    UserProfile {
        "Nickname" => nickname: str,
        "Email" => email: str,
        "HomePage" => home_page: str,
        "HomeTown" => home_town: str,
        "Company" => company: str,
        "JobTitle" => job_title: str,
        "University" => university: str,
        "SocialMediaUrls" => social_media_urls: value,
    }
}

block! {
    /// One Brightspace Data Set available for export
    BrightspaceDataSetReportInfo {
        "PluginId" => plugin_id: str,
        "Name" => name: str,
        "Description" => description: str,
        "FullDataSet" => full_data_set: bool,
        "CreatedDate" => created_date: time,
        "DownloadLink" => download_link: str,
        "DownloadSize" => download_size: i64,
        "Version" => version: str,
        "PreviousDataSets" => previous_data_sets: value,
        "QueuedForProcessingDate" => queued_for_processing_date: time,
    }
}

impl PagedBlock for BrightspaceDataSetReportInfo {
    const ITEMS_KEY: &'static str = "BrightspaceDataSets";
}
