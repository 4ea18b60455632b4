//! Resource methods of [`Valence`](crate::Valence), one module per resource
//! family. Every method maps to one route and one request.

mod courses;
mod datasets;
mod enrollments;
mod groups;
mod lookups;
mod organization;
mod sections;
mod users;

pub use courses::{CreateCourseOffering, UpdateCourseOffering};
pub use groups::{GroupCategoryInput, GroupInput};
pub use sections::{SectionInput, SectionSettingsInput};
pub use users::UserNamesInput;

use serde::{Serialize, Serializer};

/// Plain-text description in the API's rich text shape
#[derive(Serialize)]
struct RichTextInput<'a, T: ?Sized> {
    #[serde(rename = "Type")]
    kind: &'static str,
    #[serde(rename = "Content")]
    content: &'a T,
}

/// Serialize a description field as `{"Type": "Text", "Content": ...}`
fn text_description<S, T>(text: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize + ?Sized,
{
    RichTextInput {
        kind: "Text",
        content: text,
    }
    .serialize(serializer)
}
