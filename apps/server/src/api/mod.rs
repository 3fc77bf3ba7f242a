use std::{sync::Arc, time::Duration};

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, StatusCode},
    middleware,
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{
    auth::require_user,
    config::Config,
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models,
};
use pitchdesk_core::{utils::ids::parse_id, Error as CoreError, RecordId};

mod ads;
mod auth;
mod chatbot;
mod clients;
mod contacts;
mod email;
mod hashtags;
mod health;
mod insights;
mod notes;
mod post_history;
mod sms;
mod social_media;
mod templates;
mod upload;
mod users;

/// Largest accepted request body; sized for media uploads.
pub const MAX_BODY_BYTES: usize = 100 * 1024 * 1024;

/// Resolves a path id. Ids that cannot exist answer the same 404 as missing records.
pub(crate) fn record_id(raw: &str, entity: &str) -> ApiResult<RecordId> {
    parse_id(raw).ok_or_else(|| ApiError::Core(CoreError::not_found(entity)))
}

/// Wraps a freshly created record in a 201 response.
pub(crate) fn created<T>(body: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(body))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthz,
        auth::register,
        auth::login,
        ads::generate_ad,
        chatbot::chat,
        hashtags::generate_hashtags,
    ),
    components(schemas(
        models::NoteView,
        models::AdView,
        models::PostView,
        models::MessageResponse,
        models::LoginRequest,
        models::AuthResponse,
        models::UserResponse,
        models::GenerateAdRequest,
        models::ChatRequest,
        models::ChatResponse,
        models::HashtagRequest,
        models::HashtagResponse,
        models::UploadedFile,
    )),
    tags((name = "pitchdesk", description = "Marketing CRM API"))
)]
pub struct ApiDoc;

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

fn protected(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .merge(auth::protected_router())
        .merge(users::router())
        .merge(clients::router())
        .merge(contacts::router())
        .merge(notes::router())
        .merge(ads::router())
        .merge(templates::router())
        .merge(post_history::router())
        .merge(insights::router())
        .merge(chatbot::router())
        .merge(hashtags::router())
        .merge(sms::router())
        .merge(email::router())
        .merge(social_media::router())
        .merge(upload::router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_user))
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .filter_map(|o| o.parse::<HeaderValue>().ok())
            .collect::<Vec<_>>();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let api = Router::new()
        .merge(health::router())
        .merge(auth::public_router())
        .merge(protected(&state));

    Router::new()
        .nest("/api", api)
        .route("/openapi.json", get(openapi))
        .nest_service("/uploads", ServeDir::new(&state.uploads_dir))
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(request_timeout(config)))
        .layer(TraceLayer::new_for_http())
}

fn request_timeout(config: &Config) -> Duration {
    // AI runs are bounded by their own deadline; leave room for the response.
    config.request_timeout.max(config.ai_deadline + Duration::from_secs(5))
}
