use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::ads::AdSummary;
use crate::errors::ValidationError;
use crate::utils::ids;
use crate::{RecordId, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Facebook,
    Instagram,
    Whatsapp,
}

impl Platform {
    pub fn label(&self) -> &'static str {
        match self {
            Platform::Facebook => "Facebook",
            Platform::Instagram => "Instagram",
            Platform::Whatsapp => "WhatsApp",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Success,
    Failed,
    #[default]
    Pending,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PostHistory {
    #[serde(with = "ids::as_string")]
    pub id: RecordId,
    #[serde(with = "ids::as_string")]
    pub ad_id: RecordId,
    pub platform: Platform,
    pub post_id: Option<String>,
    pub status: PostStatus,
    pub message: Option<String>,
    pub error: Option<String>,
    pub published_at: NaiveDateTime,
    #[serde(with = "ids::as_string")]
    pub created_by: RecordId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostWithAd {
    pub post: PostHistory,
    pub ad: Option<AdSummary>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostFilter {
    pub platform: Option<Platform>,
    #[serde(default, with = "ids::opt_as_string")]
    pub ad_id: Option<RecordId>,
}

/// Manual entry payload for `POST /api/post-history`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostHistoryInput {
    #[serde(default, with = "ids::opt_as_string")]
    pub ad_id: Option<RecordId>,
    pub platform: Option<Platform>,
    pub post_id: Option<String>,
    pub status: Option<PostStatus>,
    pub message: Option<String>,
    pub error: Option<String>,
    pub published_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone)]
pub struct NewPostHistory {
    pub ad_id: RecordId,
    pub platform: Platform,
    pub post_id: Option<String>,
    pub status: PostStatus,
    pub message: Option<String>,
    pub error: Option<String>,
    pub published_at: Option<NaiveDateTime>,
    pub created_by: RecordId,
}

impl NewPostHistory {
    pub fn success(
        owner: RecordId,
        ad_id: RecordId,
        platform: Platform,
        post_id: String,
        message: String,
    ) -> Self {
        Self {
            ad_id,
            platform,
            post_id: Some(post_id),
            status: PostStatus::Success,
            message: Some(message),
            error: None,
            published_at: None,
            created_by: owner,
        }
    }

    pub fn failure(owner: RecordId, ad_id: RecordId, platform: Platform, error: String) -> Self {
        Self {
            ad_id,
            platform,
            post_id: None,
            status: PostStatus::Failed,
            message: None,
            error: Some(error),
            published_at: None,
            created_by: owner,
        }
    }
}

impl PostHistoryInput {
    pub fn into_new(self, owner: RecordId) -> Result<NewPostHistory> {
        let ad_id = self
            .ad_id
            .ok_or_else(|| ValidationError::MissingField("adId".to_string()))?;
        let platform = self
            .platform
            .ok_or_else(|| ValidationError::MissingField("platform".to_string()))?;
        Ok(NewPostHistory {
            ad_id,
            platform,
            post_id: self.post_id,
            status: self.status.unwrap_or_default(),
            message: self.message,
            error: self.error,
            published_at: self.published_at,
            created_by: owner,
        })
    }
}
