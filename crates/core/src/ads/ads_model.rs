//! Ad domain models.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::clients::ClientSummary;
use crate::errors::ValidationError;
use crate::utils::{ids, non_blank};
use crate::{RecordId, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AdType {
    #[default]
    Image,
    Video,
    Carousel,
    Story,
}

/// Workflow label set by users. The server never moves an ad between states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AdStatus {
    #[default]
    Draft,
    Pending,
    Approved,
    Published,
    Archived,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AdContent {
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub videos: Vec<String>,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ad {
    #[serde(with = "ids::as_string")]
    pub id: RecordId,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub ad_type: AdType,
    pub ai_generated: bool,
    pub ai_prompt: Option<String>,
    pub content: AdContent,
    pub status: AdStatus,
    #[serde(default, with = "ids::opt_as_string")]
    pub client_id: Option<RecordId>,
    #[serde(with = "ids::as_string")]
    pub created_by: RecordId,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Ad {
    /// Text used when posting the ad: the description, else the content text.
    pub fn post_text(&self) -> String {
        non_blank(self.description.as_deref())
            .or_else(|| non_blank(Some(self.content.text.as_str())))
            .unwrap_or_default()
            .to_string()
    }

    pub fn first_image(&self) -> Option<&str> {
        self.content.images.first().map(String::as_str)
    }
}

/// Minimal view embedded in post history entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdSummary {
    #[serde(rename = "_id", with = "ids::as_string")]
    pub id: RecordId,
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdWithClient {
    pub ad: Ad,
    pub client: Option<ClientSummary>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdFilter {
    pub status: Option<AdStatus>,
    #[serde(default, with = "ids::opt_as_string")]
    pub client_id: Option<RecordId>,
}

/// Create/update payload. A present `content` object replaces all three
/// content fields, missing members defaulting to empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdInput {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub ad_type: Option<AdType>,
    pub ai_generated: Option<bool>,
    pub ai_prompt: Option<String>,
    pub content: Option<AdContent>,
    pub status: Option<AdStatus>,
    #[serde(default, with = "ids::opt_as_string")]
    pub client_id: Option<RecordId>,
}

#[derive(Debug, Clone)]
pub struct NewAd {
    pub title: String,
    pub description: Option<String>,
    pub ad_type: AdType,
    pub ai_generated: bool,
    pub ai_prompt: Option<String>,
    pub content: AdContent,
    pub status: AdStatus,
    pub client_id: Option<RecordId>,
    pub created_by: RecordId,
}

/// Output of a successful AI generation, ready to be stored as a draft.
#[derive(Debug, Clone)]
pub struct GeneratedAd {
    pub prompt: String,
    pub text: String,
    pub ad_type: Option<AdType>,
    pub client_id: Option<RecordId>,
}

/// `AI Generated Ad - M/D/YYYY`
pub fn generated_ad_title(date: NaiveDate) -> String {
    format!("AI Generated Ad - {}", date.format("%-m/%-d/%Y"))
}

impl AdInput {
    pub fn into_new(self, owner: RecordId) -> Result<NewAd> {
        let title = non_blank(self.title.as_deref())
            .ok_or_else(|| ValidationError::MissingField("title".to_string()))?
            .to_string();
        Ok(NewAd {
            title,
            description: self.description,
            ad_type: self.ad_type.unwrap_or_default(),
            ai_generated: self.ai_generated.unwrap_or(false),
            ai_prompt: self.ai_prompt,
            content: self.content.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            client_id: self.client_id,
            created_by: owner,
        })
    }

    pub fn apply_to(self, ad: &mut Ad) -> Result<()> {
        if self.title.is_some() {
            ad.title = non_blank(self.title.as_deref())
                .ok_or_else(|| ValidationError::MissingField("title".to_string()))?
                .to_string();
        }
        if self.description.is_some() {
            ad.description = self.description;
        }
        if let Some(ad_type) = self.ad_type {
            ad.ad_type = ad_type;
        }
        if let Some(ai_generated) = self.ai_generated {
            ad.ai_generated = ai_generated;
        }
        if self.ai_prompt.is_some() {
            ad.ai_prompt = self.ai_prompt;
        }
        if let Some(content) = self.content {
            ad.content = content;
        }
        if let Some(status) = self.status {
            ad.status = status;
        }
        if self.client_id.is_some() {
            ad.client_id = self.client_id;
        }
        Ok(())
    }
}

impl GeneratedAd {
    pub fn into_new(self, owner: RecordId, today: NaiveDate) -> NewAd {
        NewAd {
            title: generated_ad_title(today),
            description: Some(self.text.clone()),
            ad_type: self.ad_type.unwrap_or_default(),
            ai_generated: true,
            ai_prompt: Some(self.prompt),
            content: AdContent {
                images: Vec::new(),
                videos: Vec::new(),
                text: self.text,
            },
            status: AdStatus::Draft,
            client_id: self.client_id,
            created_by: owner,
        }
    }
}
