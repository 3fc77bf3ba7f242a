//! PitchDesk AI - ad copy, chat and hashtag generation over OpenRouter.
//!
//! Every operation runs against an ordered list of models. The
//! [`fallback`] executor walks that list one model at a time: a failure the
//! provider reports as a spend limit, rate limit or unavailable model moves
//! on to the next model, anything else stops the run.
//!
//! # Architecture
//!
//! - `fallback`: Generic sequential executor over candidates
//! - `error`: Provider error classification and the crate error type
//! - `status`: Mapping of the final provider error to an HTTP status and retry hint
//! - `client`: `CompletionClient` trait and the OpenRouter implementation
//! - `models`: Candidate model lists per operation
//! - `prompts`: Prompt construction
//! - `hashtags`: Hashtag extraction from completions
//! - `service`: `AiService`, the entry point used by the server

pub mod client;
pub mod error;
pub mod fallback;
pub mod hashtags;
pub mod models;
pub mod prompts;
pub mod service;
pub mod status;

pub use client::{CompletionClient, CompletionRequest, OpenRouterClient, DEFAULT_BASE_URL};
pub use error::{AiError, ProviderError, ProviderErrorKind};
pub use fallback::{
    execute, execute_until, Candidates, FailureClass, FallbackOutcome, SkippedAttempt,
};
pub use models::{ModelCatalog, DEFAULT_MODEL};
pub use service::{AiService, ChatReply, DEFAULT_DEADLINE, DEFAULT_HASHTAG_COUNT};
pub use status::{
    failure_response, FailureResponse, AD_FAILURE_MESSAGE, CHAT_FAILURE_MESSAGE,
    HASHTAG_FAILURE_MESSAGE,
};
