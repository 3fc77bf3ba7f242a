//! SMTP mailer over STARTTLS.

use async_trait::async_trait;
use lettre::message::{header::ContentType, Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use log::{debug, warn};

use pitchdesk_core::outreach::{MailReceipt, Mailer, OutgoingEmail};
use pitchdesk_core::{Error, Result};

pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;

#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

fn mailbox(address: &str) -> Result<Mailbox> {
    address
        .trim()
        .parse()
        .map_err(|e| Error::Outreach(format!("Invalid email address '{}': {}", address, e)))
}

/// Builds the message. HTML bodies go out as multipart/alternative with the
/// text part (or the HTML itself) as the plain alternative.
fn build_message(from: &Mailbox, email: OutgoingEmail) -> Result<Message> {
    let builder = Message::builder()
        .from(from.clone())
        .to(mailbox(&email.to)?)
        .subject(email.subject)
        .message_id(None);

    let built = match (email.text, email.html) {
        (text, Some(html)) => {
            let plain = text.unwrap_or_else(|| html.clone());
            builder.multipart(MultiPart::alternative_plain_html(plain, html))
        }
        (Some(text), None) => builder.header(ContentType::TEXT_PLAIN).body(text),
        (None, None) => builder.header(ContentType::TEXT_PLAIN).body(String::new()),
    };

    built.map_err(|e| Error::Outreach(format!("Failed to build email: {}", e)))
}

impl SmtpMailer {
    /// The sender address is the SMTP username.
    pub fn new(settings: SmtpSettings) -> Result<Self> {
        let from = mailbox(&settings.username)?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
            .map_err(|e| Error::Outreach(format!("Invalid SMTP relay {}: {}", settings.host, e)))?
            .port(settings.port)
            .credentials(Credentials::new(settings.username, settings.password))
            .build();

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<MailReceipt> {
        let to = email.to.clone();
        let message = build_message(&self.from, email)?;
        let message_id = message
            .headers()
            .get_raw("Message-ID")
            .map(str::to_string)
            .unwrap_or_default();

        let response = self.transport.send(message).await.map_err(|e| {
            warn!("SMTP delivery to {} failed: {}", to, e);
            Error::Outreach(e.to_string())
        })?;

        let text = response.message().collect::<Vec<_>>().join(" ");
        debug!("SMTP accepted message {} for {}", message_id, to);

        Ok(MailReceipt {
            message_id,
            response: format!("{} {}", response.code(), text),
        })
    }
}
