//! HTTP SMS gateway client.
//!
//! The gateway takes everything as query parameters on a GET request and
//! answers `{"status":"OK","count":n}` on success or `{"error":"..."}`.

use async_trait::async_trait;
use log::{debug, warn};
use serde::Deserialize;

use pitchdesk_core::outreach::{SmsGateway, SmsReceipt};
use pitchdesk_core::{Error, Result};

use crate::{http_client, request_failed};

pub const DEFAULT_SMS_PROVIDER_URL: &str = "https://customer.smsprovider.com.ng/api/";
const SEND_FAILED: &str = "SMS sending failed";

#[derive(Debug, Clone)]
pub struct SmsSettings {
    pub username: String,
    pub password: String,
    pub sender: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct GatewayResponse {
    status: Option<String>,
    count: Option<u32>,
    error: Option<String>,
}

pub struct SmsProviderClient {
    client: reqwest::Client,
    settings: SmsSettings,
}

/// Drops a leading `+` and any whitespace.
fn format_phone(phone: &str) -> String {
    let phone = phone.trim();
    phone
        .strip_prefix('+')
        .unwrap_or(phone)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

impl SmsProviderClient {
    pub fn new(settings: SmsSettings) -> Self {
        Self {
            client: http_client(),
            settings,
        }
    }
}

#[async_trait]
impl SmsGateway for SmsProviderClient {
    async fn send(&self, phone_number: &str, message: &str) -> Result<SmsReceipt> {
        let mobiles = format_phone(phone_number);
        debug!("Sending SMS to {}", mobiles);

        let response = self
            .client
            .get(&self.settings.url)
            .query(&[
                ("username", self.settings.username.as_str()),
                ("password", self.settings.password.as_str()),
                ("message", message),
                ("sender", self.settings.sender.as_str()),
                ("mobiles", mobiles.as_str()),
            ])
            .send()
            .await
            .map_err(request_failed)?;

        let status = response.status();
        let body = response.text().await.map_err(request_failed)?;
        let parsed = serde_json::from_str::<GatewayResponse>(&body).ok();

        match parsed {
            Some(GatewayResponse {
                status: Some(ref s),
                count,
                ..
            }) if status.is_success() && s == "OK" => Ok(SmsReceipt {
                message_id: format!("sms_{}_{}", chrono::Utc::now().timestamp_millis(), mobiles),
                status: "sent".to_string(),
                count: count.unwrap_or(1),
            }),
            Some(GatewayResponse { error: Some(error), .. }) => {
                warn!("SMS gateway rejected message to {}: {}", mobiles, error);
                Err(Error::Outreach(error))
            }
            _ => {
                warn!("SMS gateway returned {}: {}", status, body);
                Err(Error::Outreach(SEND_FAILED.to_string()))
            }
        }
    }
}
