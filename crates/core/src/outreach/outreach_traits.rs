use async_trait::async_trait;

use crate::errors::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct SmsReceipt {
    pub message_id: String,
    pub status: String,
    pub count: u32,
}

/// Sends a single text message.
#[async_trait]
pub trait SmsGateway: Send + Sync {
    async fn send(&self, phone_number: &str, message: &str) -> Result<SmsReceipt>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub text: Option<String>,
    pub html: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MailReceipt {
    pub message_id: String,
    pub response: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> Result<MailReceipt>;
}

/// Publishing to the Graph API family. Each call returns the provider's post
/// or message id. Missing credentials surface as `Error::NotConfigured`.
#[async_trait]
pub trait SocialPublisher: Send + Sync {
    async fn post_to_facebook(&self, message: &str, image_url: Option<&str>) -> Result<String>;
    async fn post_to_instagram(&self, caption: &str, image_url: Option<&str>) -> Result<String>;
    async fn send_whatsapp(&self, phone_number: &str, message: &str) -> Result<String>;
}
