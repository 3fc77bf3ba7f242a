//! PitchDesk Outreach - transports behind the core outreach traits.
//!
//! - `sms`: HTTP SMS gateway ([`SmsProviderClient`] implements `SmsGateway`)
//! - `email`: SMTP over STARTTLS ([`SmtpMailer`] implements `Mailer`)
//! - `social`: Facebook Graph API for pages, Instagram and WhatsApp
//!   ([`GraphPublisher`] implements `SocialPublisher`)

pub mod email;
pub mod social;
pub mod sms;

pub use email::{SmtpMailer, SmtpSettings, DEFAULT_SMTP_HOST, DEFAULT_SMTP_PORT};
pub use social::{GraphPublisher, GraphSettings, DEFAULT_GRAPH_API_BASE};
pub use sms::{SmsProviderClient, SmsSettings, DEFAULT_SMS_PROVIDER_URL};

use pitchdesk_core::Error;
use std::time::Duration;

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

fn request_failed(err: reqwest::Error) -> Error {
    Error::Outreach(format!("Request failed: {}", err))
}
