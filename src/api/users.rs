use reqwest::Method;
use serde::Serialize;
use std::path::Path;

use crate::blocks::{LegalPreferredNames, UserData, UserProfile};
use crate::error::Result;
use crate::routes::lp;
use crate::valence::Valence;

/// Multipart field and file name the profile image endpoint expects
const PROFILE_IMAGE: &str = "profileImage";

/// Legal and preferred names of a user
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserNamesInput {
    pub legal_first_name: String,
    pub legal_last_name: String,
    pub preferred_first_name: Option<String>,
    pub preferred_last_name: Option<String>,
}

fn picture_route(user_id: i64) -> String {
    lp(&format!("/profile/user/{}/image", user_id))
}

impl Valence {
    /// User by ID
    pub fn get_user(&self, user_id: i64) -> Result<Option<UserData>> {
        self.fetch(&lp(&format!("/users/{}", user_id)))
    }

    /// Legal and preferred names of a user
    pub fn get_user_names(&self, user_id: i64) -> Result<Option<LegalPreferredNames>> {
        self.fetch(&lp(&format!("/users/{}/names", user_id)))
    }

    /// Replace the legal and preferred names of a user
    pub fn update_user_names(
        &self,
        user_id: i64,
        input: &UserNamesInput,
    ) -> Result<Option<LegalPreferredNames>> {
        self.mutate(&lp(&format!("/users/{}/names", user_id)), Method::PUT, input)
    }

    /// Profile of a user
    pub fn get_user_profile(&self, user_id: i64) -> Result<Option<UserProfile>> {
        self.fetch(&lp(&format!("/profile/user/{}", user_id)))
    }

    /// Download the profile picture into `path`
    pub fn get_user_picture(&self, user_id: i64, path: &Path) -> Result<bool> {
        self.request_file(&picture_route(user_id), path)
    }

    /// Upload the image at `path` as the user's profile picture
    pub fn upload_user_picture(&self, user_id: i64, path: &Path) -> Result<bool> {
        self.send_file(
            &picture_route(user_id),
            Method::POST,
            path,
            PROFILE_IMAGE,
            PROFILE_IMAGE,
        )
    }

    /// Remove the user's profile picture
    pub fn delete_user_picture(&self, user_id: i64) -> Result<()> {
        self.delete(&picture_route(user_id))
    }
}
