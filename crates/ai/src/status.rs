//! Maps a final provider failure to the status, message and retry hint the
//! HTTP layer returns.

use crate::error::{ProviderError, ProviderErrorKind};

pub const SPEND_LIMIT_MESSAGE: &str = "API spending limit reached. Please check your OpenRouter account settings or wait for the limit to reset. Free models should still work, but the API key may have a spending limit configured.";
pub const RATE_LIMITED_MESSAGE: &str =
    "AI service is currently busy. Please try again in a few moments. Free models have rate limits.";
pub const MODEL_UNAVAILABLE_MESSAGE: &str = "AI model temporarily unavailable. Please try again in a moment. The system will automatically try alternative models.";

pub const AD_FAILURE_MESSAGE: &str = "Failed to generate ad content. Please try again later.";
pub const CHAT_FAILURE_MESSAGE: &str = "Failed to get AI response. Please try again later.";
pub const HASHTAG_FAILURE_MESSAGE: &str = "Failed to generate hashtags. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureResponse {
    pub status: u16,
    pub message: String,
    /// Seconds the caller should wait before retrying.
    pub retry_after: Option<u64>,
}

pub fn failure_response(error: &ProviderError, default_message: &str) -> FailureResponse {
    match error.kind() {
        ProviderErrorKind::SpendLimit => FailureResponse {
            status: 402,
            message: SPEND_LIMIT_MESSAGE.to_string(),
            retry_after: Some(3600),
        },
        ProviderErrorKind::RateLimited => FailureResponse {
            status: 429,
            message: RATE_LIMITED_MESSAGE.to_string(),
            retry_after: Some(60),
        },
        ProviderErrorKind::ModelUnavailable => FailureResponse {
            status: 503,
            message: MODEL_UNAVAILABLE_MESSAGE.to_string(),
            retry_after: Some(30),
        },
        ProviderErrorKind::Other => {
            let message = error.to_string();
            FailureResponse {
                status: 500,
                message: if message.trim().is_empty() {
                    default_message.to_string()
                } else {
                    message
                },
                retry_after: None,
            }
        }
    }
}
