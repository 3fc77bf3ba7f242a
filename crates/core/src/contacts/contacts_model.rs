use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::utils::{ids, is_valid_email, non_blank};
use crate::{RecordId, Result};

/// A reachable person attached to a client; the target of bulk outreach.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerContact {
    #[serde(with = "ids::as_string")]
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    #[serde(with = "ids::as_string")]
    pub client_id: RecordId,
    pub tags: Vec<String>,
    pub notes: Option<String>,
    #[serde(with = "ids::as_string")]
    pub created_by: RecordId,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    #[serde(default, with = "ids::opt_as_string")]
    pub client_id: Option<RecordId>,
    pub tags: Option<Vec<String>>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewCustomerContact {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub client_id: RecordId,
    pub tags: Vec<String>,
    pub notes: Option<String>,
    pub created_by: RecordId,
}

fn required(value: Option<&str>, field: &str) -> Result<String> {
    non_blank(value)
        .map(str::to_string)
        .ok_or_else(|| ValidationError::MissingField(field.to_string()).into())
}

fn valid_email(value: Option<&str>) -> Result<String> {
    let email = required(value, "email")?;
    if !is_valid_email(&email) {
        return Err(ValidationError::InvalidEmail(email).into());
    }
    Ok(email)
}

impl ContactInput {
    pub fn into_new(self, owner: RecordId) -> Result<NewCustomerContact> {
        let client_id = self
            .client_id
            .ok_or_else(|| ValidationError::MissingField("clientId".to_string()))?;
        Ok(NewCustomerContact {
            name: required(self.name.as_deref(), "name")?,
            email: valid_email(self.email.as_deref())?,
            phone_number: required(self.phone_number.as_deref(), "phoneNumber")?,
            client_id,
            tags: self.tags.unwrap_or_default(),
            notes: self.notes,
            created_by: owner,
        })
    }

    pub fn apply_to(self, contact: &mut CustomerContact) -> Result<()> {
        if self.name.is_some() {
            contact.name = required(self.name.as_deref(), "name")?;
        }
        if self.email.is_some() {
            contact.email = valid_email(self.email.as_deref())?;
        }
        if self.phone_number.is_some() {
            contact.phone_number = required(self.phone_number.as_deref(), "phoneNumber")?;
        }
        if let Some(client_id) = self.client_id {
            contact.client_id = client_id;
        }
        if let Some(tags) = self.tags {
            contact.tags = tags;
        }
        if self.notes.is_some() {
            contact.notes = self.notes;
        }
        Ok(())
    }
}
