//! Client domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::utils::{ids, is_valid_email, non_blank};
use crate::{RecordId, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SocialMedia {
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub twitter: Option<String>,
    pub linkedin: Option<String>,
    pub website: Option<String>,
}

impl SocialMedia {
    /// True when any network handle is set. The website does not count.
    pub fn has_network(&self) -> bool {
        [
            &self.facebook,
            &self.instagram,
            &self.twitter,
            &self.linkedin,
        ]
        .iter()
        .any(|handle| non_blank(handle.as_deref()).is_some())
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl Coordinates {
    pub fn pair(&self) -> Option<(f64, f64)> {
        Some((self.lat?, self.lng?))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub zip_code: Option<String>,
    #[serde(default)]
    pub coordinates: Coordinates,
}

/// Domain model representing a client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[serde(with = "ids::as_string")]
    pub id: RecordId,
    pub name: String,
    pub business_name: Option<String>,
    pub phone_number: String,
    pub email: String,
    pub social_media: SocialMedia,
    pub location: Location,
    pub tags: Vec<String>,
    #[serde(with = "ids::as_string")]
    pub created_by: RecordId,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Minimal view embedded in notes and ads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClientSummary {
    #[serde(rename = "_id", with = "ids::as_string")]
    pub id: RecordId,
    pub name: String,
    pub business_name: Option<String>,
}

impl From<&Client> for ClientSummary {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id,
            name: client.name.clone(),
            business_name: client.business_name.clone(),
        }
    }
}

/// Create/update payload. Nested `socialMedia` and `location` objects replace
/// the stored values wholesale when present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInput {
    pub name: Option<String>,
    pub business_name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub social_media: Option<SocialMedia>,
    pub location: Option<Location>,
    pub tags: Option<Vec<String>>,
}

/// Insert model for a client
#[derive(Debug, Clone)]
pub struct NewClient {
    pub name: String,
    pub business_name: Option<String>,
    pub phone_number: String,
    pub email: String,
    pub social_media: SocialMedia,
    pub location: Location,
    pub tags: Vec<String>,
    pub created_by: RecordId,
}

fn required(value: Option<&str>, field: &str) -> Result<String> {
    non_blank(value)
        .map(str::to_string)
        .ok_or_else(|| ValidationError::MissingField(field.to_string()).into())
}

fn checked_email(email: &str) -> Result<String> {
    if is_valid_email(email) {
        Ok(email.trim().to_string())
    } else {
        Err(ValidationError::InvalidEmail(email.to_string()).into())
    }
}

impl ClientInput {
    pub fn into_new(self, owner: RecordId) -> Result<NewClient> {
        let name = required(self.name.as_deref(), "name")?;
        let phone_number = required(self.phone_number.as_deref(), "phoneNumber")?;
        let email = checked_email(&required(self.email.as_deref(), "email")?)?;
        Ok(NewClient {
            name,
            business_name: self.business_name,
            phone_number,
            email,
            social_media: self.social_media.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
            tags: self.tags.unwrap_or_default(),
            created_by: owner,
        })
    }

    /// Merges the provided fields into `client`. Blank required fields are rejected.
    pub fn apply_to(self, client: &mut Client) -> Result<()> {
        if self.name.is_some() {
            client.name = required(self.name.as_deref(), "name")?;
        }
        if self.phone_number.is_some() {
            client.phone_number = required(self.phone_number.as_deref(), "phoneNumber")?;
        }
        if let Some(email) = self.email {
            client.email = checked_email(&required(Some(email.as_str()), "email")?)?;
        }
        if self.business_name.is_some() {
            client.business_name = self.business_name;
        }
        if let Some(social_media) = self.social_media {
            client.social_media = social_media;
        }
        if let Some(location) = self.location {
            client.location = location;
        }
        if let Some(tags) = self.tags {
            client.tags = tags;
        }
        Ok(())
    }
}
