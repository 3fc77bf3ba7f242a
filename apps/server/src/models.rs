//! Response shapes that expand references (`clientId`, `adId`) into embedded
//! summaries, plus small request and message bodies.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use pitchdesk_core::ads::{AdSummary, AdWithClient};
use pitchdesk_core::clients::ClientSummary;
use pitchdesk_core::notes::NoteWithClient;
use pitchdesk_core::post_history::PostWithAd;
use pitchdesk_core::users::User;
use pitchdesk_core::RecordId;

/// A referenced record: the embedded summary when it still exists, else the
/// bare id.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Reference<T> {
    Expanded(T),
    Id(String),
}

fn reference<T>(summary: Option<T>, id: Option<RecordId>) -> Option<Reference<T>> {
    match (summary, id) {
        (Some(summary), _) => Some(Reference::Expanded(summary)),
        (None, Some(id)) => Some(Reference::Id(id.to_string())),
        (None, None) => None,
    }
}

#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NoteView {
    pub id: String,
    pub title: String,
    pub content: String,
    #[schema(value_type = Option<Object>)]
    pub client_id: Option<Reference<ClientSummary>>,
    #[schema(value_type = String)]
    pub category: pitchdesk_core::notes::NoteCategory,
    #[schema(value_type = String)]
    pub priority: pitchdesk_core::notes::NotePriority,
    pub ai_relevant: bool,
    pub created_by: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<NoteWithClient> for NoteView {
    fn from(NoteWithClient { note, client }: NoteWithClient) -> Self {
        Self {
            id: note.id.to_string(),
            title: note.title,
            content: note.content,
            client_id: reference(client, note.client_id),
            category: note.category,
            priority: note.priority,
            ai_relevant: note.ai_relevant,
            created_by: note.created_by.to_string(),
            created_at: note.created_at,
            updated_at: note.updated_at,
        }
    }
}

#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AdView {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    #[schema(value_type = String)]
    pub ad_type: pitchdesk_core::ads::AdType,
    pub ai_generated: bool,
    pub ai_prompt: Option<String>,
    #[schema(value_type = Object)]
    pub content: pitchdesk_core::ads::AdContent,
    #[schema(value_type = String)]
    pub status: pitchdesk_core::ads::AdStatus,
    #[schema(value_type = Option<Object>)]
    pub client_id: Option<Reference<ClientSummary>>,
    pub created_by: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<AdWithClient> for AdView {
    fn from(AdWithClient { ad, client }: AdWithClient) -> Self {
        Self {
            id: ad.id.to_string(),
            title: ad.title,
            description: ad.description,
            ad_type: ad.ad_type,
            ai_generated: ad.ai_generated,
            ai_prompt: ad.ai_prompt,
            content: ad.content,
            status: ad.status,
            client_id: reference(client, ad.client_id),
            created_by: ad.created_by.to_string(),
            created_at: ad.created_at,
            updated_at: ad.updated_at,
        }
    }
}

#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    pub id: String,
    #[schema(value_type = Option<Object>)]
    pub ad_id: Option<Reference<AdSummary>>,
    #[schema(value_type = String)]
    pub platform: pitchdesk_core::post_history::Platform,
    pub post_id: Option<String>,
    #[schema(value_type = String)]
    pub status: pitchdesk_core::post_history::PostStatus,
    pub message: Option<String>,
    pub error: Option<String>,
    pub published_at: NaiveDateTime,
    pub created_by: String,
}

impl From<PostWithAd> for PostView {
    fn from(PostWithAd { post, ad }: PostWithAd) -> Self {
        Self {
            id: post.id.to_string(),
            ad_id: reference(ad, Some(post.ad_id)),
            platform: post.platform,
            post_id: post.post_id,
            status: post.status,
            message: post.message,
            error: post.error,
            published_at: post.published_at,
            created_by: post.created_by.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn deleted(entity: &str) -> Self {
        Self {
            message: format!("{entity} deleted successfully"),
        }
    }
}

#[derive(Deserialize, ToSchema, Debug, Clone)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize, ToSchema, Debug, Clone)]
pub struct AuthResponse {
    pub token: String,
    #[schema(value_type = Object)]
    pub user: User,
}

#[derive(Serialize, ToSchema, Debug, Clone)]
pub struct UserResponse {
    #[schema(value_type = Object)]
    pub user: User,
}

#[derive(Deserialize, ToSchema, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerateAdRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(default, with = "pitchdesk_core::utils::ids::opt_as_string")]
    #[schema(value_type = Option<String>)]
    pub client_id: Option<RecordId>,
    #[serde(rename = "type")]
    #[schema(value_type = Option<String>)]
    pub ad_type: Option<pitchdesk_core::ads::AdType>,
}

#[derive(Deserialize, ToSchema, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default, with = "pitchdesk_core::utils::ids::opt_as_string")]
    #[schema(value_type = Option<String>)]
    pub client_id: Option<RecordId>,
}

#[derive(Serialize, ToSchema, Debug, Clone)]
pub struct ChatResponse {
    pub response: String,
    pub context: String,
}

#[derive(Deserialize, ToSchema, Debug, Clone, Default)]
pub struct HashtagRequest {
    #[serde(default)]
    pub content: String,
    pub platform: Option<String>,
    pub count: Option<usize>,
}

#[derive(Serialize, ToSchema, Debug, Clone)]
pub struct HashtagResponse {
    pub hashtags: Vec<String>,
    pub count: usize,
}

#[derive(Serialize, ToSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub url: String,
    pub filename: String,
    pub original_name: String,
    pub mimetype: String,
    pub size: usize,
}
