use log::{info, warn};
use std::sync::Arc;

use super::outreach_model::{
    BulkReport, ContactDelivery, DeliveryReport, DirectEmail, DirectSms, EmailRequest,
    PlatformResult, PublishReport, PublishRequest, SendOutcome, SmsRequest, SocialPostRequest,
    SocialPostResult,
};
use super::outreach_traits::{Mailer, OutgoingEmail, SmsGateway, SocialPublisher};
use crate::ads::{Ad, AdRepositoryTrait};
use crate::clients::{Client, ClientRepositoryTrait};
use crate::constants::DEFAULT_EMAIL_SUBJECT;
use crate::contacts::{ContactRepositoryTrait, CustomerContact};
use crate::errors::{Error, Result, ValidationError};
use crate::post_history::{NewPostHistory, Platform, PostHistoryRepositoryTrait};
use crate::utils::non_blank;
use crate::RecordId;

const NO_VALID_CONTACTS: &str = "No valid customer contacts found";
const NO_CLIENT_CONTACTS: &str = "No customer contacts found for this client";
const WHATSAPP_PHONE_REQUIRED: &str = "Phone number required for WhatsApp";

/// Transports available to the service. SMS and email are optional; the
/// social publisher reports missing credentials per platform itself.
pub struct OutreachChannels {
    pub sms: Option<Arc<dyn SmsGateway>>,
    pub mailer: Option<Arc<dyn Mailer>>,
    pub social: Arc<dyn SocialPublisher>,
}

pub struct OutreachService {
    client_repository: Arc<dyn ClientRepositoryTrait>,
    contact_repository: Arc<dyn ContactRepositoryTrait>,
    ad_repository: Arc<dyn AdRepositoryTrait>,
    post_history_repository: Arc<dyn PostHistoryRepositoryTrait>,
    channels: OutreachChannels,
}

fn success_message(platform: Platform) -> String {
    match platform {
        Platform::Whatsapp => "Sent via WhatsApp successfully".to_string(),
        other => format!("Posted to {} successfully", other.label()),
    }
}

fn platform_error(platform: Platform, err: Error) -> Error {
    let prefix = match platform {
        Platform::Whatsapp => "Error sending WhatsApp message".to_string(),
        other => format!("Error posting to {}", other.label()),
    };
    Error::Outreach(format!("{prefix}: {err}"))
}

fn display_name(contact: &CustomerContact, fallback: &str) -> String {
    non_blank(Some(contact.name.as_str()))
        .unwrap_or(fallback)
        .to_string()
}

/// An empty `contactIds` array means "no selection".
fn selection(ids: &Option<Vec<RecordId>>) -> Option<&[RecordId]> {
    ids.as_deref().filter(|ids| !ids.is_empty())
}

fn compose_email(to: &str, request: &EmailRequest) -> OutgoingEmail {
    OutgoingEmail {
        to: to.to_string(),
        subject: non_blank(request.subject.as_deref())
            .unwrap_or(DEFAULT_EMAIL_SUBJECT)
            .to_string(),
        text: request.text.clone().or_else(|| request.html.clone()),
        html: request.html.clone(),
    }
}

impl OutreachService {
    pub fn new(
        client_repository: Arc<dyn ClientRepositoryTrait>,
        contact_repository: Arc<dyn ContactRepositoryTrait>,
        ad_repository: Arc<dyn AdRepositoryTrait>,
        post_history_repository: Arc<dyn PostHistoryRepositoryTrait>,
        channels: OutreachChannels,
    ) -> Self {
        Self {
            client_repository,
            contact_repository,
            ad_repository,
            post_history_repository,
            channels,
        }
    }

    fn sms_gateway(&self) -> Result<&dyn SmsGateway> {
        self.channels.sms.as_deref().ok_or_else(|| {
            Error::NotConfigured("SMSProvider credentials not configured".to_string())
        })
    }

    fn mailer(&self) -> Result<&dyn Mailer> {
        self.channels
            .mailer
            .as_deref()
            .ok_or_else(|| Error::NotConfigured("Email credentials not configured".to_string()))
    }

    fn owned_client(&self, owner: RecordId, client_id: Option<RecordId>) -> Result<Client> {
        client_id
            .map(|id| self.client_repository.find(owner, id))
            .transpose()?
            .flatten()
            .ok_or_else(|| Error::not_found("Client"))
    }

    fn owned_ad(&self, owner: RecordId, ad_id: Option<RecordId>) -> Result<Ad> {
        ad_id
            .map(|id| self.ad_repository.find(owner, id))
            .transpose()?
            .flatten()
            .map(|found| found.ad)
            .ok_or_else(|| Error::not_found("Ad"))
    }

    fn contacts_with<F>(
        &self,
        owner: RecordId,
        client_id: RecordId,
        ids: Option<&[RecordId]>,
        has_address: F,
    ) -> Result<Vec<CustomerContact>>
    where
        F: Fn(&CustomerContact) -> bool,
    {
        Ok(self
            .contact_repository
            .list_for_client(owner, client_id, ids)?
            .into_iter()
            .filter(|c| has_address(c))
            .collect())
    }

    async fn sms_fan_out(
        &self,
        gateway: &dyn SmsGateway,
        contacts: &[CustomerContact],
        message: &str,
        include_address: bool,
    ) -> Vec<ContactDelivery> {
        let mut results = Vec::with_capacity(contacts.len());
        for contact in contacts {
            let outcome = gateway.send(&contact.phone_number, message).await;
            if let Err(err) = &outcome {
                warn!("SMS to contact {} failed: {}", contact.id, err);
            }
            results.push(ContactDelivery {
                contact_id: contact.id,
                contact_name: display_name(contact, &contact.phone_number),
                phone_number: include_address.then(|| contact.phone_number.clone()),
                email: None,
                success: outcome.is_ok(),
                message_id: outcome.as_ref().ok().map(|r| r.message_id.clone()),
                error: outcome.err().map(|e| e.to_string()),
            });
        }
        results
    }

    async fn email_fan_out(
        &self,
        mailer: &dyn Mailer,
        contacts: &[CustomerContact],
        request: &EmailRequest,
        include_address: bool,
    ) -> Vec<ContactDelivery> {
        let mut results = Vec::with_capacity(contacts.len());
        for contact in contacts {
            let outcome = mailer.send(compose_email(&contact.email, request)).await;
            if let Err(err) = &outcome {
                warn!("Email to contact {} failed: {}", contact.id, err);
            }
            results.push(ContactDelivery {
                contact_id: contact.id,
                contact_name: display_name(contact, &contact.email),
                phone_number: None,
                email: include_address.then(|| contact.email.clone()),
                success: outcome.is_ok(),
                message_id: outcome.as_ref().ok().map(|r| r.message_id.clone()),
                error: outcome.err().map(|e| e.to_string()),
            });
        }
        results
    }

    fn report(results: Vec<ContactDelivery>) -> DeliveryReport {
        DeliveryReport {
            success: true,
            sent: results.iter().filter(|r| r.success).count(),
            total: results.len(),
            results,
        }
    }

    fn bulk(results: Vec<ContactDelivery>) -> BulkReport {
        BulkReport {
            total: results.len(),
            sent: results.iter().filter(|r| r.success).count(),
            results,
        }
    }

    /// Sends to the selected contacts of a client, or to the client itself.
    pub async fn send_sms(&self, owner: RecordId, request: SmsRequest) -> Result<SendOutcome> {
        let gateway = self.sms_gateway()?;
        let client = self.owned_client(owner, request.client_id)?;

        if let Some(ids) = selection(&request.contact_ids) {
            let contacts = self.contacts_with(owner, client.id, Some(ids), |c| {
                non_blank(Some(c.phone_number.as_str())).is_some()
            })?;
            if contacts.is_empty() {
                return Err(ValidationError::InvalidInput(NO_VALID_CONTACTS.to_string()).into());
            }
            let results = self
                .sms_fan_out(gateway, &contacts, &request.message, false)
                .await;
            return Ok(SendOutcome::Contacts(Self::report(results)));
        }

        let phone = non_blank(Some(client.phone_number.as_str())).ok_or_else(|| {
            ValidationError::InvalidInput("Client does not have a phone number".to_string())
        })?;
        let receipt = gateway.send(phone, &request.message).await?;
        info!("SMS sent to client {}", client.id);
        Ok(SendOutcome::Sms(DirectSms {
            success: true,
            message_id: receipt.message_id,
            status: receipt.status,
        }))
    }

    pub async fn send_bulk_sms(&self, owner: RecordId, request: SmsRequest) -> Result<BulkReport> {
        let gateway = self.sms_gateway()?;
        let client_id = request
            .client_id
            .ok_or_else(|| ValidationError::MissingField("clientId".to_string()))?;
        let client = self.owned_client(owner, Some(client_id))?;

        let contacts = self.contacts_with(owner, client.id, selection(&request.contact_ids), |c| {
            non_blank(Some(c.phone_number.as_str())).is_some()
        })?;
        if contacts.is_empty() {
            return Err(ValidationError::InvalidInput(NO_CLIENT_CONTACTS.to_string()).into());
        }
        let results = self
            .sms_fan_out(gateway, &contacts, &request.message, true)
            .await;
        Ok(Self::bulk(results))
    }

    pub async fn send_email(&self, owner: RecordId, request: EmailRequest) -> Result<SendOutcome> {
        let mailer = self.mailer()?;
        let client = self.owned_client(owner, request.client_id)?;

        if let Some(ids) = selection(&request.contact_ids) {
            let contacts = self.contacts_with(owner, client.id, Some(ids), |c| {
                non_blank(Some(c.email.as_str())).is_some()
            })?;
            if contacts.is_empty() {
                return Err(ValidationError::InvalidInput(NO_VALID_CONTACTS.to_string()).into());
            }
            let results = self.email_fan_out(mailer, &contacts, &request, false).await;
            return Ok(SendOutcome::Contacts(Self::report(results)));
        }

        let address = non_blank(Some(client.email.as_str())).ok_or_else(|| {
            ValidationError::InvalidInput("Client does not have an email address".to_string())
        })?;
        let receipt = mailer.send(compose_email(address, &request)).await?;
        info!("Email sent to client {}", client.id);
        Ok(SendOutcome::Email(DirectEmail {
            success: true,
            message_id: receipt.message_id,
            response: receipt.response,
        }))
    }

    pub async fn send_bulk_email(
        &self,
        owner: RecordId,
        request: EmailRequest,
    ) -> Result<BulkReport> {
        let mailer = self.mailer()?;
        let client_id = request
            .client_id
            .ok_or_else(|| ValidationError::MissingField("clientId".to_string()))?;
        let client = self.owned_client(owner, Some(client_id))?;

        let contacts = self.contacts_with(owner, client.id, selection(&request.contact_ids), |c| {
            non_blank(Some(c.email.as_str())).is_some()
        })?;
        if contacts.is_empty() {
            return Err(ValidationError::InvalidInput(NO_CLIENT_CONTACTS.to_string()).into());
        }
        let results = self.email_fan_out(mailer, &contacts, &request, true).await;
        Ok(Self::bulk(results))
    }

    async fn dispatch(
        &self,
        platform: Platform,
        text: &str,
        image_url: Option<&str>,
        phone_number: &str,
    ) -> Result<String> {
        let social = &self.channels.social;
        match platform {
            Platform::Facebook => social.post_to_facebook(text, image_url).await,
            Platform::Instagram => social.post_to_instagram(text, image_url).await,
            Platform::Whatsapp => social.send_whatsapp(phone_number, text).await,
        }
    }

    /// Posts an ad to one platform and records the success in post history.
    pub async fn post_ad(
        &self,
        owner: RecordId,
        platform: Platform,
        request: SocialPostRequest,
    ) -> Result<SocialPostResult> {
        let ad = self.owned_ad(owner, request.ad_id)?;
        let supplied = match platform {
            Platform::Instagram => request.caption.as_deref(),
            _ => request.message.as_deref(),
        };
        let text = non_blank(supplied)
            .map(str::to_string)
            .unwrap_or_else(|| ad.post_text());

        let phone = match platform {
            Platform::Whatsapp => non_blank(request.phone_number.as_deref()).ok_or_else(|| {
                ValidationError::InvalidInput(WHATSAPP_PHONE_REQUIRED.to_string())
            })?,
            _ => "",
        };

        let post_id = self
            .dispatch(platform, &text, request.image_url.as_deref(), phone)
            .await
            .map_err(|err| platform_error(platform, err))?;

        let message = success_message(platform);
        self.post_history_repository
            .create(NewPostHistory::success(
                owner,
                ad.id,
                platform,
                post_id.clone(),
                message.clone(),
            ))
            .await?;
        info!("Ad {} published to {}", ad.id, platform.label());

        let (post_id, message_id) = match platform {
            Platform::Whatsapp => (None, Some(post_id)),
            _ => (Some(post_id), None),
        };
        Ok(SocialPostResult {
            success: true,
            platform,
            post_id,
            message_id,
            message,
        })
    }

    /// Publishes an ad to each selected platform in turn, recording every
    /// attempt. One platform failing does not stop the others.
    pub async fn publish(&self, owner: RecordId, request: PublishRequest) -> Result<PublishReport> {
        if request.platforms.is_empty() {
            return Err(ValidationError::InvalidInput(
                "Please select at least one platform".to_string(),
            )
            .into());
        }
        let ad = self.owned_ad(owner, request.ad_id)?;
        let text = ad.post_text();
        let image_url = ad.first_image();

        let mut results = Vec::new();
        for platform in [Platform::Facebook, Platform::Instagram, Platform::Whatsapp] {
            if !request.platforms.contains(&platform) {
                continue;
            }

            let phone = match platform {
                Platform::Whatsapp => match non_blank(request.phone_number.as_deref()) {
                    Some(phone) => phone,
                    None => {
                        results.push(PlatformResult {
                            platform,
                            success: false,
                            post_id: None,
                            message_id: None,
                            message: None,
                            error: Some(WHATSAPP_PHONE_REQUIRED.to_string()),
                        });
                        continue;
                    }
                },
                _ => "",
            };

            match self.dispatch(platform, &text, image_url, phone).await {
                Ok(id) => {
                    let message = success_message(platform);
                    self.post_history_repository
                        .create(NewPostHistory::success(
                            owner,
                            ad.id,
                            platform,
                            id.clone(),
                            message.clone(),
                        ))
                        .await?;
                    let (post_id, message_id) = match platform {
                        Platform::Whatsapp => (None, Some(id)),
                        _ => (Some(id), None),
                    };
                    results.push(PlatformResult {
                        platform,
                        success: true,
                        post_id,
                        message_id,
                        message: Some(message),
                        error: None,
                    });
                }
                Err(err) => {
                    warn!("Publishing ad {} to {} failed: {}", ad.id, platform.label(), err);
                    let error = err.to_string();
                    self.post_history_repository
                        .create(NewPostHistory::failure(owner, ad.id, platform, error.clone()))
                        .await?;
                    results.push(PlatformResult {
                        platform,
                        success: false,
                        post_id: None,
                        message_id: None,
                        message: None,
                        error: Some(error),
                    });
                }
            }
        }

        let successful = results.iter().filter(|r| r.success).count();
        Ok(PublishReport {
            success: successful > 0,
            total: results.len(),
            successful,
            results,
        })
    }
}
