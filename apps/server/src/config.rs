use std::{net::SocketAddr, path::PathBuf, time::Duration};

use pitchdesk_outreach::{
    GraphSettings, SmsSettings, SmtpSettings, DEFAULT_GRAPH_API_BASE, DEFAULT_SMS_PROVIDER_URL,
    DEFAULT_SMTP_HOST, DEFAULT_SMTP_PORT,
};

const DEFAULT_TOKEN_TTL_SECS: u64 = 7 * 24 * 60 * 60;

/// OpenRouter settings; present only when an API key is set.
#[derive(Debug, Clone)]
pub struct AiSettings {
    pub api_key: String,
    pub model: Option<String>,
    pub base_url: Option<String>,
}

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub uploads_dir: PathBuf,
    /// Raw `PD_JWT_SECRET`; a random key is generated when absent.
    pub jwt_secret: Option<String>,
    pub token_ttl: Duration,
    pub public_url: String,
    pub ai_deadline: Duration,
    pub ai: Option<AiSettings>,
    pub sms: Option<SmsSettings>,
    pub smtp: Option<SmtpSettings>,
    pub graph: GraphSettings,
}

/// Trimmed, non-empty value of an environment variable.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    env_opt(key).unwrap_or_else(|| default.to_string())
}

fn env_u64(key: &str, default: u64) -> u64 {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = env_or("PD_LISTEN_ADDR", "0.0.0.0:3000")
            .parse()
            .expect("Invalid PD_LISTEN_ADDR");
        let cors_allow = env_or("PD_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let public_url = env_opt("PD_PUBLIC_URL")
            .or_else(|| env_opt("FRONTEND_URL"))
            .unwrap_or_else(|| "http://localhost:3000".to_string());

        let ai = env_opt("OPENROUTER_API_KEY").map(|api_key| AiSettings {
            api_key,
            model: env_opt("OPENROUTER_MODEL"),
            base_url: env_opt("OPENROUTER_BASE_URL"),
        });

        let sms = match (
            env_opt("SMS_PROVIDER_USERNAME"),
            env_opt("SMS_PROVIDER_PASSWORD"),
            env_opt("SMS_PROVIDER_SENDER"),
        ) {
            (Some(username), Some(password), Some(sender)) => Some(SmsSettings {
                username,
                password,
                sender,
                url: env_or("SMS_PROVIDER_URL", DEFAULT_SMS_PROVIDER_URL),
            }),
            _ => None,
        };

        let smtp = match (env_opt("EMAIL_USER"), env_opt("EMAIL_PASS")) {
            (Some(username), Some(password)) => Some(SmtpSettings {
                host: env_or("EMAIL_HOST", DEFAULT_SMTP_HOST),
                port: env_opt("EMAIL_PORT")
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(DEFAULT_SMTP_PORT),
                username,
                password,
            }),
            _ => None,
        };

        let graph = GraphSettings {
            access_token: env_opt("FACEBOOK_ACCESS_TOKEN")
                .or_else(|| env_opt("FACEBOOK_PAGE_ACCESS_TOKEN")),
            page_id: env_opt("FACEBOOK_PAGE_ID"),
            instagram_account_id: env_opt("INSTAGRAM_BUSINESS_ACCOUNT_ID"),
            whatsapp_phone_number_id: env_opt("WHATSAPP_PHONE_NUMBER_ID"),
            whatsapp_access_token: env_opt("WHATSAPP_ACCESS_TOKEN"),
            base_url: env_or("GRAPH_API_BASE_URL", DEFAULT_GRAPH_API_BASE),
            public_url: public_url.clone(),
        };

        Self {
            listen_addr,
            db_path: env_or("PD_DB_PATH", "./data/app.db"),
            cors_allow,
            request_timeout: Duration::from_millis(env_u64("PD_REQUEST_TIMEOUT_MS", 120_000)),
            uploads_dir: PathBuf::from(env_or("PD_UPLOADS_DIR", "./uploads")),
            jwt_secret: env_opt("PD_JWT_SECRET"),
            token_ttl: Duration::from_secs(env_u64("PD_TOKEN_TTL_SECS", DEFAULT_TOKEN_TTL_SECS)),
            public_url,
            ai_deadline: Duration::from_millis(env_u64("PD_AI_DEADLINE_MS", 90_000)),
            ai,
            sms,
            smtp,
            graph,
        }
    }
}
