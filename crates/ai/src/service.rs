//! AI operations backed by an ordered model fallback list.

use log::debug;
use std::sync::Arc;
use std::time::Duration;

use pitchdesk_core::clients::Client;
use pitchdesk_core::notes::Note;

use crate::client::{CompletionClient, CompletionRequest};
use crate::error::{AiError, ProviderError};
use crate::fallback::{execute_until, Candidates};
use crate::hashtags::parse_hashtags;
use crate::models::ModelCatalog;
use crate::prompts;

/// Default number of hashtags requested when the caller gives none.
pub const DEFAULT_HASHTAG_COUNT: usize = 10;

/// Default bound on a whole fallback run.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(90);

/// Chat answer and whether client context went into the prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub response: String,
    pub used_context: bool,
}

pub struct AiService {
    client: Arc<dyn CompletionClient>,
    catalog: ModelCatalog,
    deadline: Duration,
}

impl AiService {
    pub fn new(client: Arc<dyn CompletionClient>, catalog: ModelCatalog, deadline: Duration) -> Self {
        Self {
            client,
            catalog,
            deadline,
        }
    }

    async fn run(
        &self,
        models: &Candidates<String>,
        request: CompletionRequest,
    ) -> Result<String, ProviderError> {
        let outcome = execute_until(
            models.clone(),
            ProviderError::failure_class,
            tokio::time::sleep(self.deadline),
            |model| ProviderError::Cancelled { model },
            |model: String| {
                let client = Arc::clone(&self.client);
                let request = request.clone();
                async move { client.complete(&model, &request).await }
            },
        )
        .await;

        debug!(
            "AI request finished on {} after {} attempt(s), success: {}",
            outcome.candidate(),
            outcome.attempts(),
            outcome.is_success()
        );
        outcome.into_result()
    }

    /// Writes ad copy for `prompt`, using the notes as client context.
    pub async fn generate_ad_copy(&self, prompt: &str, notes: &[Note]) -> Result<String, AiError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(AiError::invalid_input("Prompt is required"));
        }
        let request = prompts::ad_request(prompt, notes);
        Ok(self.run(&self.catalog.ads, request).await?)
    }

    pub async fn chat(
        &self,
        message: &str,
        client: Option<&Client>,
        notes: &[Note],
    ) -> Result<ChatReply, AiError> {
        if message.trim().is_empty() {
            return Err(AiError::invalid_input("Message is required"));
        }
        let context = prompts::chat_context(client, notes);
        let request = prompts::chat_request(message, &context);
        let response = self.run(&self.catalog.chat, request).await?;
        Ok(ChatReply {
            response,
            used_context: !context.is_empty(),
        })
    }

    pub async fn generate_hashtags(
        &self,
        content: &str,
        platform: Option<&str>,
        count: Option<usize>,
    ) -> Result<Vec<String>, AiError> {
        if content.trim().is_empty() {
            return Err(AiError::invalid_input("Content is required"));
        }
        let count = count.unwrap_or(DEFAULT_HASHTAG_COUNT);
        if count == 0 {
            return Ok(Vec::new());
        }
        let request = prompts::hashtag_request(content, platform, count);
        let text = self.run(&self.catalog.hashtags, request).await?;
        Ok(parse_hashtags(&text, count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays scripted replies and records which models were asked.
    struct ScriptedClient {
        replies: Mutex<VecDeque<Result<String, ProviderError>>>,
        calls: Mutex<Vec<String>>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl ScriptedClient {
        fn new(replies: Vec<Result<String, ProviderError>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                calls: Mutex::new(Vec::new()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionClient for ScriptedClient {
        async fn complete(
            &self,
            model: &str,
            request: &CompletionRequest,
        ) -> Result<String, ProviderError> {
            self.calls.lock().unwrap().push(model.to_string());
            self.requests.lock().unwrap().push(request.clone());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ProviderError::Transport("no scripted reply".into())))
        }
    }

    /// Never answers.
    struct HangingClient;

    #[async_trait]
    impl CompletionClient for HangingClient {
        async fn complete(&self, _: &str, _: &CompletionRequest) -> Result<String, ProviderError> {
            std::future::pending().await
        }
    }

    fn service(client: Arc<dyn CompletionClient>) -> AiService {
        AiService::new(client, ModelCatalog::new(Some("primary")), DEFAULT_DEADLINE)
    }

    #[tokio::test]
    async fn ad_copy_falls_back_past_unavailable_models() {
        let client = ScriptedClient::new(vec![
            Err(ProviderError::api(Some(429), None, "Rate limited")),
            Err(ProviderError::api(Some(404), None, "No endpoints found for model")),
            Ok("Fresh bread, every morning.".into()),
        ]);
        let text = service(client.clone())
            .generate_ad_copy("bakery", &[])
            .await
            .unwrap();

        assert_eq!(text, "Fresh bread, every morning.");
        assert_eq!(
            client.calls(),
            vec![
                "primary",
                "x-ai/grok-4-fast:free",
                "meta-llama/llama-3.1-8b-instruct:free"
            ]
        );
    }

    #[tokio::test]
    async fn terminal_error_stops_after_one_model() {
        let client = ScriptedClient::new(vec![Err(ProviderError::api(
            Some(401),
            None,
            "User not authenticated",
        ))]);
        let err = service(client.clone())
            .generate_ad_copy("bakery", &[])
            .await
            .unwrap_err();

        assert!(matches!(err, AiError::Provider(ProviderError::Api { status: Some(401), .. })));
        assert_eq!(client.calls().len(), 1);
    }

    #[tokio::test]
    async fn exhausted_chat_returns_last_error() {
        let client = ScriptedClient::new(vec![
            Err(ProviderError::api(Some(429), None, "first")),
            Err(ProviderError::api(Some(429), None, "second")),
            Err(ProviderError::api(Some(429), None, "third")),
            Err(ProviderError::api(Some(503), None, "Model not found")),
        ]);
        let err = service(client.clone()).chat("hi", None, &[]).await.unwrap_err();

        assert_eq!(err.to_string(), "Model not found");
        assert_eq!(client.calls().len(), 4);
    }

    #[tokio::test]
    async fn chat_reports_context_use() {
        let client = ScriptedClient::new(vec![Ok("Try a loyalty card.".into())]);
        let reply = service(client.clone()).chat("ideas?", None, &[]).await.unwrap();

        assert_eq!(reply.response, "Try a loyalty card.");
        assert!(!reply.used_context);
        assert_eq!(client.requests.lock().unwrap()[0].user, "ideas?");
    }

    #[tokio::test]
    async fn hashtags_are_parsed_and_capped() {
        let client = ScriptedClient::new(vec![Ok("#one\n#two\nnot a tag\n#three".into())]);
        let tags = service(client.clone())
            .generate_hashtags("new menu", Some("instagram"), Some(2))
            .await
            .unwrap();

        assert_eq!(tags, vec!["#one", "#two"]);
        let request = client.requests.lock().unwrap()[0].clone();
        assert!(request.user.starts_with("Generate 2 relevant hashtags"));
        assert_eq!(request.max_tokens, 200);
    }

    #[tokio::test]
    async fn hashtag_count_defaults_only_when_absent() {
        let client = ScriptedClient::new(vec![Ok("#one".into())]);
        let svc = service(client.clone());

        let none = svc.generate_hashtags("new menu", None, Some(0)).await.unwrap();
        assert!(none.is_empty());
        assert!(client.calls().is_empty());

        svc.generate_hashtags("new menu", None, None).await.unwrap();
        let request = client.requests.lock().unwrap()[0].clone();
        assert!(request.user.starts_with("Generate 10 relevant hashtags"));
    }

    #[tokio::test]
    async fn blank_input_is_rejected_without_calls() {
        let client = ScriptedClient::new(vec![]);
        let svc = service(client.clone());

        let err = svc.generate_hashtags("  ", None, None).await.unwrap_err();
        assert_eq!(err.to_string(), "Content is required");
        let err = svc.generate_ad_copy("", &[]).await.unwrap_err();
        assert_eq!(err.to_string(), "Prompt is required");
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn deadline_cancels_the_run() {
        let svc = AiService::new(
            Arc::new(HangingClient),
            ModelCatalog::new(Some("primary")),
            Duration::from_millis(20),
        );
        let err = svc.generate_ad_copy("bakery", &[]).await.unwrap_err();

        assert!(matches!(
            err,
            AiError::Provider(ProviderError::Cancelled { ref model }) if model == "primary"
        ));
    }
}
