use std::path::PathBuf;
use std::sync::Arc;

use crate::{
    auth::{resolve_secret, Argon2Hasher, AuthManager},
    config::Config,
};
use pitchdesk_ai::{AiService, CompletionClient, ModelCatalog, OpenRouterClient};
use pitchdesk_core::{
    ads::{AdService, AdServiceTrait},
    clients::{ClientService, ClientServiceTrait},
    contacts::{ContactService, ContactServiceTrait},
    insights::{InsightsService, InsightsServiceTrait},
    notes::{NoteService, NoteServiceTrait},
    outreach::{Mailer, OutreachChannels, OutreachService, SmsGateway},
    post_history::{PostHistoryService, PostHistoryServiceTrait},
    templates::{TemplateService, TemplateServiceTrait},
    users::{UserService, UserServiceTrait},
};
use pitchdesk_outreach::{GraphPublisher, SmsProviderClient, SmtpMailer};
use pitchdesk_storage_sqlite::{
    db::{self, write_actor},
    AdRepository, ClientRepository, ContactRepository, NoteRepository, PostHistoryRepository,
    TemplateRepository, UserRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub client_service: Arc<dyn ClientServiceTrait>,
    pub contact_service: Arc<dyn ContactServiceTrait>,
    pub note_service: Arc<dyn NoteServiceTrait>,
    pub ad_service: Arc<dyn AdServiceTrait>,
    pub template_service: Arc<dyn TemplateServiceTrait>,
    pub post_history_service: Arc<dyn PostHistoryServiceTrait>,
    pub insights_service: Arc<dyn InsightsServiceTrait>,
    pub outreach_service: Arc<OutreachService>,
    /// `None` when no OpenRouter key is configured.
    pub ai_service: Option<Arc<AiService>>,
    pub auth: Arc<AuthManager>,
    pub uploads_dir: PathBuf,
}

pub fn init_tracing() {
    let log_format = std::env::var("PD_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

fn build_ai_service(config: &Config) -> anyhow::Result<Option<Arc<AiService>>> {
    let Some(settings) = config.ai.as_ref() else {
        tracing::warn!("OPENROUTER_API_KEY not set; AI routes will answer 500");
        return Ok(None);
    };
    let client: Arc<dyn CompletionClient> = Arc::new(OpenRouterClient::new(
        settings.api_key.clone(),
        settings.base_url.clone(),
    )?);
    let catalog = ModelCatalog::new(settings.model.as_deref());
    tracing::info!("AI primary model: {}", catalog.ads.first());
    Ok(Some(Arc::new(AiService::new(
        client,
        catalog,
        config.ai_deadline,
    ))))
}

fn build_channels(config: &Config) -> anyhow::Result<OutreachChannels> {
    let sms = config.sms.clone().map(|settings| {
        Arc::new(SmsProviderClient::new(settings)) as Arc<dyn SmsGateway>
    });
    let mailer = config
        .smtp
        .clone()
        .map(SmtpMailer::new)
        .transpose()?
        .map(|mailer| Arc::new(mailer) as Arc<dyn Mailer>);
    Ok(OutreachChannels {
        sms,
        mailer,
        social: Arc::new(GraphPublisher::new(config.graph.clone())),
    })
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone())?;

    let user_repository = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let client_repository = Arc::new(ClientRepository::new(pool.clone(), writer.clone()));
    let contact_repository = Arc::new(ContactRepository::new(pool.clone(), writer.clone()));
    let note_repository = Arc::new(NoteRepository::new(pool.clone(), writer.clone()));
    let ad_repository = Arc::new(AdRepository::new(pool.clone(), writer.clone()));
    let template_repository = Arc::new(TemplateRepository::new(pool.clone(), writer.clone()));
    let post_history_repository =
        Arc::new(PostHistoryRepository::new(pool.clone(), writer.clone()));

    let user_service = Arc::new(UserService::new(
        user_repository,
        Arc::new(Argon2Hasher),
    ));
    let client_service = Arc::new(ClientService::new(client_repository.clone()));
    let contact_service = Arc::new(ContactService::new(
        contact_repository.clone(),
        client_repository.clone(),
    ));
    let note_service = Arc::new(NoteService::new(
        note_repository,
        client_repository.clone(),
    ));
    let ad_service = Arc::new(AdService::new(
        ad_repository.clone(),
        client_repository.clone(),
    ));
    let template_service = Arc::new(TemplateService::new(template_repository));
    let post_history_service = Arc::new(PostHistoryService::new(
        post_history_repository.clone(),
        ad_repository.clone(),
    ));
    let insights_service = Arc::new(InsightsService::new(client_repository.clone()));

    let outreach_service = Arc::new(OutreachService::new(
        client_repository,
        contact_repository,
        ad_repository,
        post_history_repository,
        build_channels(config)?,
    ));

    let ai_service = build_ai_service(config)?;

    let secret = resolve_secret(config.jwt_secret.as_deref())?;
    let auth = Arc::new(AuthManager::new(&secret, config.token_ttl));

    std::fs::create_dir_all(&config.uploads_dir)?;

    Ok(Arc::new(AppState {
        user_service,
        client_service,
        contact_service,
        note_service,
        ad_service,
        template_service,
        post_history_service,
        insights_service,
        outreach_service,
        ai_service,
        auth,
        uploads_dir: config.uploads_dir.clone(),
    }))
}
