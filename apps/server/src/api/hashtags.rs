use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use pitchdesk_ai::{AiError, HASHTAG_FAILURE_MESSAGE};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::{HashtagRequest, HashtagResponse},
};

#[utoipa::path(
    post,
    path = "/api/hashtags/generate",
    request_body = HashtagRequest,
    responses((status = 200, body = HashtagResponse), (status = 400, description = "Content is required"))
)]
pub async fn generate_hashtags(
    State(state): State<Arc<AppState>>,
    Json(body): Json<HashtagRequest>,
) -> ApiResult<Json<HashtagResponse>> {
    let ai = state
        .ai_service
        .clone()
        .ok_or_else(|| ApiError::from_ai(AiError::NotConfigured, HASHTAG_FAILURE_MESSAGE))?;

    let hashtags = ai
        .generate_hashtags(&body.content, body.platform.as_deref(), body.count)
        .await
        .map_err(|e| ApiError::from_ai(e, HASHTAG_FAILURE_MESSAGE))?;
    Ok(Json(HashtagResponse {
        count: hashtags.len(),
        hashtags,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/hashtags/generate", post(generate_hashtags))
}
