//! Facebook Graph API publisher for pages, Instagram business accounts and
//! WhatsApp Business.

use async_trait::async_trait;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use pitchdesk_core::outreach::SocialPublisher;
use pitchdesk_core::{Error, Result};

use crate::{http_client, request_failed};

pub const DEFAULT_GRAPH_API_BASE: &str = "https://graph.facebook.com/v18.0";

/// Graph API credentials. Each platform checks only the fields it needs.
#[derive(Debug, Clone, Default)]
pub struct GraphSettings {
    pub access_token: Option<String>,
    pub page_id: Option<String>,
    pub instagram_account_id: Option<String>,
    pub whatsapp_phone_number_id: Option<String>,
    pub whatsapp_access_token: Option<String>,
    pub base_url: String,
    /// Prefix for media URLs that are relative to this server.
    pub public_url: String,
}

#[derive(Deserialize)]
struct GraphId {
    id: String,
}

#[derive(Deserialize)]
struct WhatsAppResponse {
    #[serde(default)]
    messages: Vec<GraphId>,
}

#[derive(Deserialize)]
struct GraphErrorBody {
    error: GraphErrorDetail,
}

#[derive(Deserialize)]
struct GraphErrorDetail {
    message: String,
}

#[derive(Serialize)]
struct WhatsAppText<'a> {
    body: &'a str,
}

#[derive(Serialize)]
struct WhatsAppMessage<'a> {
    messaging_product: &'static str,
    to: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    text: WhatsAppText<'a>,
}

fn not_configured(provider: &str) -> Error {
    Error::NotConfigured(format!("{} credentials not configured", provider))
}

fn credential(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Keeps digits and `+`.
fn whatsapp_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

pub struct GraphPublisher {
    client: reqwest::Client,
    settings: GraphSettings,
}

impl GraphPublisher {
    pub fn new(mut settings: GraphSettings) -> Self {
        settings.base_url = settings.base_url.trim_end_matches('/').to_string();
        settings.public_url = settings.public_url.trim_end_matches('/').to_string();
        Self {
            client: http_client(),
            settings,
        }
    }

    fn absolute_url(&self, url: &str) -> String {
        if url.starts_with("http") {
            url.to_string()
        } else {
            format!("{}{}", self.settings.public_url, url)
        }
    }

    async fn post<B, R>(&self, endpoint: &str, bearer: Option<&str>, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}/{}", self.settings.base_url, endpoint);
        debug!("Graph API request: POST {}", endpoint);

        let mut request = self.client.post(&url).json(body);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        let response = request.send().await.map_err(request_failed)?;

        let status = response.status();
        let text = response.text().await.map_err(request_failed)?;
        if !status.is_success() {
            let message = serde_json::from_str::<GraphErrorBody>(&text)
                .map(|body| body.error.message)
                .unwrap_or_else(|_| format!("HTTP {} - {}", status, text));
            warn!("Graph API {} failed: {}", endpoint, message);
            return Err(Error::Outreach(message));
        }

        serde_json::from_str(&text)
            .map_err(|e| Error::Outreach(format!("Unexpected Graph API response: {}", e)))
    }
}

#[async_trait]
impl SocialPublisher for GraphPublisher {
    async fn post_to_facebook(&self, message: &str, image_url: Option<&str>) -> Result<String> {
        let (Some(token), Some(page)) = (
            credential(&self.settings.access_token),
            credential(&self.settings.page_id),
        ) else {
            return Err(not_configured("Facebook"));
        };

        let created: GraphId = match image_url {
            Some(image) => {
                let body = serde_json::json!({
                    "url": self.absolute_url(image),
                    "caption": message,
                    "access_token": token,
                });
                self.post(&format!("{}/photos", page), None, &body).await?
            }
            None => {
                let body = serde_json::json!({ "message": message, "access_token": token });
                self.post(&format!("{}/feed", page), None, &body).await?
            }
        };
        Ok(created.id)
    }

    async fn post_to_instagram(&self, caption: &str, image_url: Option<&str>) -> Result<String> {
        let (Some(token), Some(account)) = (
            credential(&self.settings.access_token),
            credential(&self.settings.instagram_account_id),
        ) else {
            return Err(not_configured("Instagram"));
        };
        let Some(image) = image_url else {
            return Err(Error::Outreach("Instagram requires an image".to_string()));
        };

        let container: GraphId = self
            .post(
                &format!("{}/media", account),
                None,
                &serde_json::json!({
                    "image_url": self.absolute_url(image),
                    "caption": caption,
                    "access_token": token,
                }),
            )
            .await?;

        let published: GraphId = self
            .post(
                &format!("{}/media_publish", account),
                None,
                &serde_json::json!({ "creation_id": container.id, "access_token": token }),
            )
            .await?;
        Ok(published.id)
    }

    async fn send_whatsapp(&self, phone_number: &str, message: &str) -> Result<String> {
        let (Some(number_id), Some(token)) = (
            credential(&self.settings.whatsapp_phone_number_id),
            credential(&self.settings.whatsapp_access_token),
        ) else {
            return Err(not_configured("WhatsApp"));
        };

        let to = whatsapp_number(phone_number);
        let body = WhatsAppMessage {
            messaging_product: "whatsapp",
            to: &to,
            kind: "text",
            text: WhatsAppText { body: message },
        };
        let response: WhatsAppResponse = self
            .post(&format!("{}/messages", number_id), Some(token), &body)
            .await?;

        response
            .messages
            .into_iter()
            .next()
            .map(|m| m.id)
            .ok_or_else(|| Error::Outreach("WhatsApp response carried no message id".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings(server: &MockServer) -> GraphSettings {
        GraphSettings {
            access_token: Some("page-token".to_string()),
            page_id: Some("42".to_string()),
            instagram_account_id: Some("ig-7".to_string()),
            whatsapp_phone_number_id: Some("wa-1".to_string()),
            whatsapp_access_token: Some("wa-token".to_string()),
            base_url: format!("{}/v18.0/", server.uri()),
            public_url: "https://crm.example.com/".to_string(),
        }
    }

    #[tokio::test]
    async fn facebook_photo_post_uses_absolute_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v18.0/42/photos"))
            .and(body_json(json!({
                "url": "https://crm.example.com/uploads/images/a.png",
                "caption": "Spring sale",
                "access_token": "page-token",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "photo_1"})))
            .expect(1)
            .mount(&server)
            .await;

        let publisher = GraphPublisher::new(settings(&server));
        let id = publisher
            .post_to_facebook("Spring sale", Some("/uploads/images/a.png"))
            .await
            .unwrap();
        assert_eq!(id, "photo_1");
    }

    #[tokio::test]
    async fn facebook_text_post_goes_to_feed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v18.0/42/feed"))
            .and(body_partial_json(json!({"message": "Hello"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "42_9"})))
            .mount(&server)
            .await;

        let publisher = GraphPublisher::new(settings(&server));
        assert_eq!(publisher.post_to_facebook("Hello", None).await.unwrap(), "42_9");
    }

    #[tokio::test]
    async fn instagram_creates_then_publishes_container() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v18.0/ig-7/media"))
            .and(body_partial_json(json!({"image_url": "https://cdn.example.com/x.jpg"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "container_5"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v18.0/ig-7/media_publish"))
            .and(body_partial_json(json!({"creation_id": "container_5"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "media_8"})))
            .expect(1)
            .mount(&server)
            .await;

        let publisher = GraphPublisher::new(settings(&server));
        let id = publisher
            .post_to_instagram("caption", Some("https://cdn.example.com/x.jpg"))
            .await
            .unwrap();
        assert_eq!(id, "media_8");
    }

    #[tokio::test]
    async fn instagram_requires_an_image() {
        let server = MockServer::start().await;
        let publisher = GraphPublisher::new(settings(&server));
        let err = publisher.post_to_instagram("caption", None).await.unwrap_err();
        assert_eq!(err.to_string(), "Instagram requires an image");
    }

    #[tokio::test]
    async fn whatsapp_sends_with_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v18.0/wa-1/messages"))
            .and(header("authorization", "Bearer wa-token"))
            .and(body_json(json!({
                "messaging_product": "whatsapp",
                "to": "+2348012345678",
                "type": "text",
                "text": {"body": "Hi"},
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"messages": [{"id": "wamid.1"}]})),
            )
            .mount(&server)
            .await;

        let publisher = GraphPublisher::new(settings(&server));
        let id = publisher
            .send_whatsapp("+234 (801) 234-5678", "Hi")
            .await
            .unwrap();
        assert_eq!(id, "wamid.1");
    }

    #[tokio::test]
    async fn graph_error_message_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {"message": "Invalid OAuth access token.", "code": 190}
            })))
            .mount(&server)
            .await;

        let publisher = GraphPublisher::new(settings(&server));
        let err = publisher.post_to_facebook("Hello", None).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid OAuth access token.");
    }

    #[tokio::test]
    async fn missing_credentials_are_reported_per_platform() {
        let publisher = GraphPublisher::new(GraphSettings {
            base_url: DEFAULT_GRAPH_API_BASE.to_string(),
            ..Default::default()
        });

        let err = publisher.post_to_facebook("x", None).await.unwrap_err();
        assert_eq!(err.to_string(), "Facebook credentials not configured");
        let err = publisher.post_to_instagram("x", Some("a.png")).await.unwrap_err();
        assert_eq!(err.to_string(), "Instagram credentials not configured");
        let err = publisher.send_whatsapp("1", "x").await.unwrap_err();
        assert_eq!(err.to_string(), "WhatsApp credentials not configured");
    }
}
