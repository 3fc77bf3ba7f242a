//! Helpers shared by the row conversions.

use chrono::{NaiveDateTime, Utc};
use pitchdesk_core::ads::AdSummary;
use pitchdesk_core::clients::ClientSummary;

/// `(id, name, business_name)` of a left-joined client.
pub type ClientColumns = (i32, String, Option<String>);

/// `(id, title, description)` of a left-joined ad.
pub type AdColumns = (i32, String, Option<String>);

/// Encodes a list column as a JSON array.
pub fn encode_list(items: &[String]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}

/// Decodes a JSON array column. Missing or malformed values read as empty.
pub fn decode_list(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    serde_json::from_str(raw).unwrap_or_default()
}

pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

pub fn client_summary(columns: Option<ClientColumns>) -> Option<ClientSummary> {
    columns.map(|(id, name, business_name)| ClientSummary {
        id,
        name,
        business_name,
    })
}

pub fn ad_summary(columns: Option<AdColumns>) -> Option<AdSummary> {
    columns.map(|(id, title, description)| AdSummary {
        id,
        title,
        description,
    })
}
