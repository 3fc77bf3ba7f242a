//! Outreach module - SMS, email and social publishing orchestration.
//!
//! Transport implementations live in the `outreach` crate; this module owns
//! recipient selection, per-recipient result bookkeeping and post history.

mod outreach_model;
mod outreach_service;
mod outreach_traits;


pub use outreach_model::{
    BulkReport, ContactDelivery, DeliveryReport, DirectEmail, DirectSms, EmailRequest,
    PlatformResult, PublishReport, PublishRequest, SendOutcome, SmsRequest, SocialPostRequest,
    SocialPostResult,
};
pub use outreach_service::{OutreachChannels, OutreachService};
pub use outreach_traits::{MailReceipt, Mailer, OutgoingEmail, SmsGateway, SmsReceipt, SocialPublisher};
