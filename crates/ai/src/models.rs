//! Model candidate lists per AI operation.

use crate::fallback::Candidates;

pub const DEFAULT_MODEL: &str = "meta-llama/llama-3.2-3b-instruct:free";

const AD_FALLBACKS: &[&str] = &[
    "x-ai/grok-4-fast:free",
    "meta-llama/llama-3.1-8b-instruct:free",
];

const CHAT_FALLBACKS: &[&str] = &[
    "liquidai/lfm2.5-1.2b-instruct:free",
    "xai/grok-beta:free",
    "meta-llama/llama-3.1-8b-instruct:free",
];

/// Ordered model lists, each starting with the configured primary model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelCatalog {
    pub ads: Candidates<String>,
    pub chat: Candidates<String>,
    pub hashtags: Candidates<String>,
}

fn with_fallbacks(primary: &str, fallbacks: &[&str]) -> Candidates<String> {
    let mut rest: Vec<String> = Vec::with_capacity(fallbacks.len());
    for model in fallbacks {
        if *model != primary && !rest.iter().any(|m| m == model) {
            rest.push((*model).to_string());
        }
    }
    Candidates::with_fallbacks(primary.to_string(), rest)
}

impl ModelCatalog {
    pub fn new(primary: Option<&str>) -> Self {
        let primary = primary
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_MODEL);
        Self {
            ads: with_fallbacks(primary, AD_FALLBACKS),
            chat: with_fallbacks(primary, CHAT_FALLBACKS),
            hashtags: with_fallbacks(primary, AD_FALLBACKS),
        }
    }
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self::new(None)
    }
}
