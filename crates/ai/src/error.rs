//! AI error types.

use thiserror::Error;
use pitchdesk_core::Error as CoreError;

use crate::fallback::FailureClass;

/// Failure reported by (or while talking to) a completion provider.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    /// The provider answered with an error payload.
    #[error("{message}")]
    Api {
        status: Option<u16>,
        code: Option<String>,
        message: String,
    },

    #[error("Request to AI provider failed: {0}")]
    Transport(String),

    #[error("Unexpected response from AI provider: {0}")]
    Decode(String),

    #[error("Model {model} returned an empty response")]
    EmptyCompletion { model: String },

    #[error("AI request timed out while waiting for {model}")]
    Cancelled { model: String },
}

/// Provider failure categories, each mapped to its own downstream status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    SpendLimit,
    RateLimited,
    ModelUnavailable,
    Other,
}

const SPEND_LIMIT_MARKERS: &[&str] = &["spend limit exceeded", "Payment Required"];
const RATE_LIMIT_MARKERS: &[&str] = &["rate-limit"];
const UNAVAILABLE_MARKERS: &[&str] = &[
    "No endpoints found",
    "not found",
    "not a valid model ID",
    "invalid model",
];

fn mentions(message: &str, markers: &[&str]) -> bool {
    markers.iter().any(|marker| message.contains(marker))
}

impl ProviderError {
    pub fn api(status: Option<u16>, code: Option<&str>, message: impl Into<String>) -> Self {
        ProviderError::Api {
            status,
            code: code.map(str::to_string),
            message: message.into(),
        }
    }

    /// Categorizes the failure. Checks run in precedence order, so a 402
    /// mentioning "not found" is still a spend-limit failure.
    pub fn kind(&self) -> ProviderErrorKind {
        let ProviderError::Api {
            status,
            code,
            message,
        } = self
        else {
            return ProviderErrorKind::Other;
        };

        if *status == Some(402) || mentions(message, SPEND_LIMIT_MARKERS) {
            ProviderErrorKind::SpendLimit
        } else if *status == Some(429)
            || code.as_deref() == Some("rate_limit_exceeded")
            || mentions(message, RATE_LIMIT_MARKERS)
        {
            ProviderErrorKind::RateLimited
        } else if matches!(status, Some(404) | Some(400)) || mentions(message, UNAVAILABLE_MARKERS) {
            ProviderErrorKind::ModelUnavailable
        } else {
            ProviderErrorKind::Other
        }
    }

    /// Every categorized failure is worth another model; the rest are not.
    pub fn failure_class(&self) -> FailureClass {
        match self.kind() {
            ProviderErrorKind::Other => FailureClass::Terminal,
            _ => FailureClass::Retryable,
        }
    }
}

/// AI service errors.
#[derive(Debug, Error)]
pub enum AiError {
    /// No API key was configured for the completion provider.
    #[error("OpenRouter API key not configured")]
    NotConfigured,

    /// Invalid input or request.
    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Core error from pitchdesk-core.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl AiError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: Option<u16>, code: Option<&str>, message: &str) -> ProviderError {
        ProviderError::api(status, code, message)
    }

    #[test]
    fn classification_follows_status_code_and_message() {
        assert_eq!(api(Some(402), None, "").kind(), ProviderErrorKind::SpendLimit);
        assert_eq!(
            api(None, None, "Key spend limit exceeded").kind(),
            ProviderErrorKind::SpendLimit
        );
        assert_eq!(api(Some(429), None, "").kind(), ProviderErrorKind::RateLimited);
        assert_eq!(
            api(None, Some("rate_limit_exceeded"), "slow down").kind(),
            ProviderErrorKind::RateLimited
        );
        assert_eq!(
            api(Some(200), None, "Free tier rate-limited upstream").kind(),
            ProviderErrorKind::RateLimited
        );
        assert_eq!(api(Some(400), None, "").kind(), ProviderErrorKind::ModelUnavailable);
        assert_eq!(
            api(None, None, "foo/bar is not a valid model ID").kind(),
            ProviderErrorKind::ModelUnavailable
        );
        assert_eq!(api(Some(401), None, "No auth credentials").kind(), ProviderErrorKind::Other);
    }

    #[test]
    fn spend_limit_wins_over_other_markers() {
        let err = api(Some(402), None, "Model not found: Payment Required");
        assert_eq!(err.kind(), ProviderErrorKind::SpendLimit);
    }

    #[test]
    fn non_api_failures_are_terminal() {
        let transport = ProviderError::Transport("connection reset, not found".to_string());
        assert_eq!(transport.kind(), ProviderErrorKind::Other);
        assert_eq!(transport.failure_class(), FailureClass::Terminal);
        let cancelled = ProviderError::Cancelled {
            model: "m1".to_string(),
        };
        assert_eq!(cancelled.failure_class(), FailureClass::Terminal);
        assert_eq!(api(Some(503), None, "upstream down").failure_class(), FailureClass::Terminal);
        assert_eq!(api(Some(429), None, "").failure_class(), FailureClass::Retryable);
    }
}
