//! Lazy resource handles.
//!
//! A handle only knows its own ID and the session it came from; every method
//! is one facade call with that ID filled in. Applications can swap in their
//! own handle types through [`Valence::set_course_factory`] and
//! [`Valence::set_user_factory`], overriding or extending the provided
//! methods.

use std::path::Path;
use std::rc::Rc;

use crate::blocks::{
    CourseOffering, EnrollmentData, GroupCategoryData, LegalPreferredNames, SectionData, UserData,
    UserProfile,
};
use crate::error::Result;
use crate::valence::Valence;

/// Builds the course handle returned by [`Valence::course`]
pub type CourseFactory = Rc<dyn Fn(Valence, i64) -> Box<dyn CourseObject>>;

/// Builds the user handle returned by [`Valence::user`]
pub type UserFactory = Rc<dyn Fn(Valence, i64) -> Box<dyn UserObject>>;

pub(crate) fn default_course_factory() -> CourseFactory {
    Rc::new(|valence: Valence, org_unit_id: i64| -> Box<dyn CourseObject> {
        Box::new(Course::new(valence, org_unit_id))
    })
}

pub(crate) fn default_user_factory() -> UserFactory {
    Rc::new(|valence: Valence, user_id: i64| -> Box<dyn UserObject> {
        Box::new(User::new(valence, user_id))
    })
}

/// A course offering addressed by its org unit ID
pub trait CourseObject {
    fn valence(&self) -> &Valence;

    fn org_unit_id(&self) -> i64;

    fn offering(&self) -> Result<Option<CourseOffering>> {
        self.valence().get_course_offering(self.org_unit_id())
    }

    fn sections(&self) -> Result<Vec<SectionData>> {
        self.valence().get_course_sections(self.org_unit_id())
    }

    fn group_categories(&self) -> Result<Vec<GroupCategoryData>> {
        self.valence().get_course_group_categories(self.org_unit_id())
    }

    fn enrollment(&self, user_id: i64) -> Result<Option<EnrollmentData>> {
        self.valence().get_enrollment(self.org_unit_id(), user_id)
    }

    fn enroll_student(&self, user_id: i64) -> Result<Option<EnrollmentData>> {
        self.valence().enroll_student(self.org_unit_id(), user_id)
    }

    fn enroll_instructor(&self, user_id: i64) -> Result<Option<EnrollmentData>> {
        self.valence().enroll_instructor(self.org_unit_id(), user_id)
    }

    fn unenroll(&self, user_id: i64) -> Result<()> {
        self.valence().unenroll_user(user_id, self.org_unit_id())
    }

    fn download_image(&self, path: &Path) -> Result<bool> {
        self.valence().get_course_image(self.org_unit_id(), path)
    }

    fn upload_image(&self, path: &Path, name: &str) -> Result<bool> {
        self.valence().upload_course_image(self.org_unit_id(), path, name)
    }

    fn delete(&self) -> Result<()> {
        self.valence().delete_course_offering(self.org_unit_id())
    }
}

/// A user addressed by its user ID
pub trait UserObject {
    fn valence(&self) -> &Valence;

    fn user_id(&self) -> i64;

    fn data(&self) -> Result<Option<UserData>> {
        self.valence().get_user(self.user_id())
    }

    fn names(&self) -> Result<Option<LegalPreferredNames>> {
        self.valence().get_user_names(self.user_id())
    }

    fn profile(&self) -> Result<Option<UserProfile>> {
        self.valence().get_user_profile(self.user_id())
    }

    fn enroll(&self, org_unit_id: i64, role_id: i64) -> Result<Option<EnrollmentData>> {
        self.valence().enroll_user(org_unit_id, self.user_id(), role_id)
    }

    fn unenroll(&self, org_unit_id: i64) -> Result<()> {
        self.valence().unenroll_user(self.user_id(), org_unit_id)
    }

    fn download_picture(&self, path: &Path) -> Result<bool> {
        self.valence().get_user_picture(self.user_id(), path)
    }

    fn upload_picture(&self, path: &Path) -> Result<bool> {
        self.valence().upload_user_picture(self.user_id(), path)
    }

    fn delete_picture(&self) -> Result<()> {
        self.valence().delete_user_picture(self.user_id())
    }
}

/// Default course handle
#[derive(Debug, Clone)]
pub struct Course {
    valence: Valence,
    org_unit_id: i64,
}

impl Course {
    pub fn new(valence: Valence, org_unit_id: i64) -> Self {
        Course {
            valence,
            org_unit_id,
        }
    }
}

impl CourseObject for Course {
    fn valence(&self) -> &Valence {
        &self.valence
    }

    fn org_unit_id(&self) -> i64 {
        self.org_unit_id
    }
}

/// Default user handle
#[derive(Debug, Clone)]
pub struct User {
    valence: Valence,
    user_id: i64,
}

impl User {
    pub fn new(valence: Valence, user_id: i64) -> Self {
        User { valence, user_id }
    }
}

impl UserObject for User {
    fn valence(&self) -> &Valence {
        &self.valence
    }

    fn user_id(&self) -> i64 {
        self.user_id
    }
}

/// Result of creating a course offering
pub enum CreatedCourse {
    /// The created offering as returned by the API
    Record(CourseOffering),
    /// A handle on the new offering, when return-object-on-create is set
    Object(Box<dyn CourseObject>),
}

impl CreatedCourse {
    /// Org unit ID of the created course
    pub fn org_unit_id(&self) -> Option<i64> {
        match self {
            CreatedCourse::Record(offering) => offering.identifier(),
            CreatedCourse::Object(course) => Some(course.org_unit_id()),
        }
    }

    pub fn into_record(self) -> Option<CourseOffering> {
        match self {
            CreatedCourse::Record(offering) => Some(offering),
            CreatedCourse::Object(_) => None,
        }
    }

    pub fn into_object(self) -> Option<Box<dyn CourseObject>> {
        match self {
            CreatedCourse::Record(_) => None,
            CreatedCourse::Object(course) => Some(course),
        }
    }
}

impl std::fmt::Debug for CreatedCourse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreatedCourse::Record(offering) => f.debug_tuple("Record").field(offering).finish(),
            CreatedCourse::Object(course) => f
                .debug_struct("Object")
                .field("org_unit_id", &course.org_unit_id())
                .finish(),
        }
    }
}
