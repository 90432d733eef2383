//! Authenticated user profile and login shapes.

use serde::{Deserialize, Serialize};

use crate::types::UserId;
use crate::validation::{ValidationErrors, Validator};

/// Profile of the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub image: String,
}

impl User {
    /// "First Last", used to prefill the checkout name.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Input of `auth.login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

impl LoginInput {
    /// Both fields are required.
    ///
    /// # Errors
    ///
    /// Returns all failing fields.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut v = Validator::new();
        v.non_empty("username", &self.username, "Username is required")
            .non_empty("password", &self.password, "Password is required");
        v.finish()
    }
}

/// Successful login response: the profile plus bearer tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(flatten)]
    pub user: User,
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}
