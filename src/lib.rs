//! # valence - Brightspace Valence REST client for Rust
//!
//! A blocking client for the Brightspace (D2L) Valence API. Every request is
//! signed with the vendor's ID/key scheme, JSON answers are mapped into typed
//! records, and paged endpoints are exposed as lazy iterators.
//!
//! ## Features
//!
//! - One method per API operation: organization, roles, org-unit types,
//!   courses, sections, groups, enrollments, users, profiles and data sets
//! - ID/key request signing (HMAC-SHA256) behind the [`RequestSigner`] trait
//! - Pluggable [`Transport`] for tests and custom HTTP stacks
//! - Typed records that keep every field the API returns
//! - Optional request log file and configurable error policy
//!
//! ## Basic Usage
//!
//! ```no_run
//! use valence::{Config, Valence};
//!
//! fn main() -> Result<(), valence::ValenceError> {
//!     let config = Config::new("https", "lms.example.edu")
//!         .with_app("app-id", "app-key")
//!         .with_user("user-id", "user-key")
//!         .with_exit_on_error(false);
//!
//!     let valence = Valence::new(config)?;
//!
//!     if let Some(me) = valence.whoami()? {
//!         println!("signed in as {:?}", me.unique_name());
//!     }
//!
//!     if let Some(course_id) = valence.get_org_unit_id_from_offering_code("RUST-101")? {
//!         for section in valence.get_course_sections(course_id)? {
//!             println!("{:?} {:?}", section.section_id(), section.name());
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error policy
//!
//! By default any non-2xx answer prints `Error: <code> <body> (exiting...)`
//! and exits the process. With exit-on-error disabled, methods return
//! `None`, `false` or an empty list instead, and [`Valence::last_response`]
//! tells what happened:
//!
//! ```no_run
//! # use valence::{Config, Valence};
//! # let valence = Valence::new(Config::new("https", "lms.example.edu"))?;
//! valence.set_exit_on_error(false);
//! if valence.get_user(169)?.is_none() {
//!     valence.last_response().error_for_status()?;
//! }
//! # Ok::<(), valence::ValenceError>(())
//! ```
//!
//! ## Data sets
//!
//! ```no_run
//! # use valence::Valence;
//! # let valence = Valence::from_env()?;
//! for data_set in valence.get_data_sets()? {
//!     let data_set = data_set?;
//!     println!("{:?}", data_set.name());
//! }
//! # Ok::<(), valence::ValenceError>(())
//! ```

pub mod api;
pub mod blocks;
pub mod client;
pub mod error;
pub mod exit;
pub mod handles;
mod log;
pub mod paging;
pub mod record;
pub mod response;
pub mod routes;
pub mod signer;
pub mod time;
pub mod transport;
pub mod valence;

// Re-export main types for convenience
pub use api::{
    CreateCourseOffering, GroupCategoryInput, GroupInput, SectionInput, SectionSettingsInput,
    UpdateCourseOffering, UserNamesInput,
};
pub use blocks::Block;
pub use client::{Config, LogMode};
pub use error::{Result, ValenceError};
pub use handles::{Course, CourseObject, CreatedCourse, User, UserObject};
pub use paging::{PagedBlock, PagedBlocks};
pub use record::Record;
pub use response::LastResponse;
pub use signer::{RequestSigner, UserContext};
pub use time::Time;
pub use transport::{FileUpload, HttpTransport, RawResponse, Transport};
pub use valence::{SessionState, Valence};

// Re-export serde_json for convenience
pub use serde_json::json;
