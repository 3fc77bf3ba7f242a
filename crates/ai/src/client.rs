//! OpenAI-compatible chat completion client (OpenRouter).

use async_trait::async_trait;
use log::debug;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::error::ProviderError;

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// A single-turn completion: one system message, one user message.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
    pub temperature: Option<f32>,
}

#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Returns the completion text produced by `model`.
    async fn complete(&self, model: &str, request: &CompletionRequest)
        -> Result<String, ProviderError>;
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatBody<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    error: Option<ErrorBody>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    code: Option<Value>,
}

impl ErrorBody {
    fn code_text(&self) -> Option<String> {
        match &self.code {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }

    fn code_status(&self) -> Option<u16> {
        match &self.code {
            Some(Value::Number(n)) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
            _ => None,
        }
    }
}

/// Builds an API error from a non-2xx response body.
fn api_error(status: StatusCode, body: &str) -> ProviderError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(ErrorEnvelope { error }) => ProviderError::Api {
            status: Some(status.as_u16()),
            code: error.code_text(),
            message: error
                .message
                .unwrap_or_else(|| status.canonical_reason().unwrap_or_default().to_string()),
        },
        Err(_) => ProviderError::Api {
            status: Some(status.as_u16()),
            code: None,
            message: if body.trim().is_empty() {
                status.canonical_reason().unwrap_or_default().to_string()
            } else {
                body.trim().to_string()
            },
        },
    }
}

pub struct OpenRouterClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenRouterClient {
    pub fn new(api_key: impl Into<String>, base_url: Option<String>) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
        })
    }
}

#[async_trait]
impl CompletionClient for OpenRouterClient {
    async fn complete(
        &self,
        model: &str,
        request: &CompletionRequest,
    ) -> Result<String, ProviderError> {
        let body = ChatBody {
            model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        debug!("Requesting completion from {}", model);
        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(api_error(status, &text));
        }

        let parsed: ChatResponse =
            serde_json::from_str(&text).map_err(|e| ProviderError::Decode(e.to_string()))?;

        // OpenRouter reports some upstream failures inside a 200 body.
        if let Some(error) = parsed.error {
            return Err(ProviderError::Api {
                status: error.code_status(),
                code: error.code_text(),
                message: error.message.unwrap_or_default(),
            });
        }

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| ProviderError::EmptyCompletion {
                model: model.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request() -> CompletionRequest {
        CompletionRequest {
            system: "be brief".to_string(),
            user: "hello".to_string(),
            max_tokens: 50,
            temperature: Some(0.7),
        }
    }

    async fn client_for(server: &MockServer) -> OpenRouterClient {
        OpenRouterClient::new("test-key", Some(format!("{}/", server.uri()))).unwrap()
    }

    #[tokio::test]
    async fn returns_first_choice_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({
                "model": "m1",
                "max_tokens": 50,
                "messages": [
                    {"role": "system", "content": "be brief"},
                    {"role": "user", "content": "hello"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "Hi there"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = client_for(&server).await.complete("m1", &request()).await.unwrap();
        assert_eq!(text, "Hi there");
    }

    #[tokio::test]
    async fn error_body_becomes_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "error": {"message": "Rate limit exceeded: free-models-per-min", "code": 429}
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).await.complete("m1", &request()).await.unwrap_err();
        assert_eq!(
            err,
            ProviderError::Api {
                status: Some(429),
                code: Some("429".to_string()),
                message: "Rate limit exceeded: free-models-per-min".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn error_inside_ok_body_and_empty_choices() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"model": "broken"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": {"message": "No endpoints found for broken", "code": 404}
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"model": "quiet"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.complete("broken", &request()).await.unwrap_err();
        assert!(matches!(err, ProviderError::Api { status: Some(404), .. }));

        let err = client.complete("quiet", &request()).await.unwrap_err();
        assert_eq!(
            err,
            ProviderError::EmptyCompletion {
                model: "quiet".to_string()
            }
        );
    }

    #[test]
    fn plain_text_error_body() {
        let err = api_error(StatusCode::BAD_GATEWAY, "");
        assert_eq!(err.to_string(), "Bad Gateway");
        let err = api_error(StatusCode::UNAUTHORIZED, "{\"error\":{\"code\":\"unauthorized\"}}");
        assert_eq!(
            err,
            ProviderError::Api {
                status: Some(401),
                code: Some("unauthorized".to_string()),
                message: "Unauthorized".to_string(),
            }
        );
    }
}
