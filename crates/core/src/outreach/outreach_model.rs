use serde::{Deserialize, Serialize};

use crate::post_history::Platform;
use crate::utils::ids;
use crate::RecordId;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsRequest {
    #[serde(default, with = "ids::opt_as_string")]
    pub client_id: Option<RecordId>,
    #[serde(default)]
    pub message: String,
    #[serde(default, deserialize_with = "ids::opt_list::deserialize")]
    pub contact_ids: Option<Vec<RecordId>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailRequest {
    #[serde(default, with = "ids::opt_as_string")]
    pub client_id: Option<RecordId>,
    pub subject: Option<String>,
    pub html: Option<String>,
    pub text: Option<String>,
    #[serde(default, deserialize_with = "ids::opt_list::deserialize")]
    pub contact_ids: Option<Vec<RecordId>>,
}

/// Per-recipient outcome of a fan-out send.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactDelivery {
    #[serde(with = "ids::as_string")]
    pub contact_id: RecordId,
    pub contact_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DeliveryReport {
    pub success: bool,
    pub sent: usize,
    pub total: usize,
    pub results: Vec<ContactDelivery>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DirectSms {
    pub success: bool,
    pub message_id: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DirectEmail {
    pub success: bool,
    pub message_id: String,
    pub response: String,
}

/// Result of `/send`: a report when contacts were targeted, otherwise the
/// receipt for the client's own address.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum SendOutcome {
    Contacts(DeliveryReport),
    Sms(DirectSms),
    Email(DirectEmail),
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BulkReport {
    pub total: usize,
    pub sent: usize,
    pub results: Vec<ContactDelivery>,
}

/// Payload shared by the single-platform social routes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialPostRequest {
    #[serde(default, with = "ids::opt_as_string")]
    pub ad_id: Option<RecordId>,
    pub message: Option<String>,
    pub caption: Option<String>,
    pub image_url: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SocialPostResult {
    pub success: bool,
    pub platform: Platform,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    #[serde(default, with = "ids::opt_as_string")]
    pub ad_id: Option<RecordId>,
    #[serde(default)]
    pub platforms: Vec<Platform>,
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlatformResult {
    pub platform: Platform,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PublishReport {
    pub success: bool,
    pub total: usize,
    pub successful: usize,
    pub results: Vec<PlatformResult>,
}
