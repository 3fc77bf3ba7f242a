use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::post,
    Extension, Json, Router,
};
use pitchdesk_core::{
    outreach::{PublishReport, PublishRequest, SocialPostRequest, SocialPostResult},
    post_history::Platform,
    Error as CoreError,
};

use crate::{auth::CurrentUser, error::ApiResult, main_lib::AppState};

fn platform(raw: &str) -> Result<Platform, CoreError> {
    match raw {
        "facebook" => Ok(Platform::Facebook),
        "instagram" => Ok(Platform::Instagram),
        "whatsapp" => Ok(Platform::Whatsapp),
        _ => Err(CoreError::NotFound(format!("Unknown platform: {raw}"))),
    }
}

async fn post_ad(
    Path(raw): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(request): Json<SocialPostRequest>,
) -> ApiResult<Json<SocialPostResult>> {
    let platform = platform(&raw)?;
    let result = state
        .outreach_service
        .post_ad(current.id(), platform, request)
        .await?;
    Ok(Json(result))
}

async fn publish(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(request): Json<PublishRequest>,
) -> ApiResult<Json<PublishReport>> {
    let report = state
        .outreach_service
        .publish(current.id(), request)
        .await?;
    tracing::info!(
        "Published to {}/{} platforms",
        report.successful,
        report.total
    );
    Ok(Json(report))
}

pub fn router() -> Router<Arc<AppState>> {
    // The static segment wins over the platform capture.
    Router::new()
        .route("/social-media/publish", post(publish))
        .route("/social-media/{platform}", post(post_ad))
}
