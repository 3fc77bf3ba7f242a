//! User domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::utils::{ids, is_valid_email, non_blank};
use crate::{RecordId, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[default]
    User,
}

/// A person who can sign in. Main users own a team of sub-users they created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(with = "ids::as_string")]
    pub id: RecordId,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub is_main_user: bool,
    pub is_active: bool,
    #[serde(default, with = "ids::opt_as_string")]
    pub created_by: Option<RecordId>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A user together with the stored password hash. Never serialized.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

/// Insert model handed to the repository.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: UserRole,
    pub is_main_user: bool,
    pub created_by: Option<RecordId>,
}

/// Self-service sign up payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_main_user: bool,
}

/// Sub-user created by a main user.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTeamMember {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: String,
    pub role: Option<UserRole>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub name: Option<String>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}

/// Emails are compared case-insensitively and stored lowercased.
pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub(crate) fn validate_account_fields(email: &str, password: &str, name: &str) -> Result<()> {
    if non_blank(Some(name)).is_none() {
        return Err(ValidationError::MissingField("name".to_string()).into());
    }
    if non_blank(Some(email)).is_none() {
        return Err(ValidationError::MissingField("email".to_string()).into());
    }
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail(email.trim().to_string()).into());
    }
    if password.is_empty() {
        return Err(ValidationError::MissingField("password".to_string()).into());
    }
    Ok(())
}

impl UserUpdate {
    pub fn apply_to(&self, user: &mut User) {
        if let Some(name) = non_blank(self.name.as_deref()) {
            user.name = name.to_string();
        }
        if let Some(role) = self.role {
            user.role = role;
        }
        if let Some(active) = self.is_active {
            user.is_active = active;
        }
    }
}
