use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use pitchdesk_ai::{AiError, AD_FAILURE_MESSAGE};
use pitchdesk_core::ads::{AdFilter, AdInput, GeneratedAd};

use super::{created, record_id};
use crate::{
    auth::CurrentUser,
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::{AdView, GenerateAdRequest, MessageResponse},
};

async fn list_ads(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Query(filter): Query<AdFilter>,
) -> ApiResult<Json<Vec<AdView>>> {
    let ads = state.ad_service.list_ads(current.id(), filter)?;
    Ok(Json(ads.into_iter().map(AdView::from).collect()))
}

async fn get_ad(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<AdView>> {
    let id = record_id(&id, "Ad")?;
    Ok(Json(state.ad_service.get_ad(current.id(), id)?.into()))
}

async fn create_ad(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(input): Json<AdInput>,
) -> ApiResult<(StatusCode, Json<AdView>)> {
    let ad = state.ad_service.create_ad(current.id(), input).await?;
    Ok(created(ad.into()))
}

async fn update_ad(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(input): Json<AdInput>,
) -> ApiResult<Json<AdView>> {
    let id = record_id(&id, "Ad")?;
    let ad = state.ad_service.update_ad(current.id(), id, input).await?;
    Ok(Json(ad.into()))
}

async fn delete_ad(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<MessageResponse>> {
    let id = record_id(&id, "Ad")?;
    state.ad_service.delete_ad(current.id(), id).await?;
    Ok(Json(MessageResponse::deleted("Ad")))
}

/// Generates ad copy over the fallback model list and stores it as a draft.
#[utoipa::path(
    post,
    path = "/api/ads/generate",
    request_body = GenerateAdRequest,
    responses(
        (status = 201, body = AdView),
        (status = 402, description = "Spending limit reached"),
        (status = 429, description = "Rate limited"),
        (status = 503, description = "No model available"),
    )
)]
pub async fn generate_ad(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(body): Json<GenerateAdRequest>,
) -> ApiResult<(StatusCode, Json<AdView>)> {
    let ai = state
        .ai_service
        .clone()
        .ok_or_else(|| ApiError::from_ai(AiError::NotConfigured, AD_FAILURE_MESSAGE))?;

    // The client must belong to the caller before any provider call is made.
    let notes = match body.client_id {
        Some(client_id) => {
            state.client_service.get_client(current.id(), client_id)?;
            state.note_service.ai_context(current.id(), client_id)?
        }
        None => Vec::new(),
    };
    let text = ai
        .generate_ad_copy(&body.prompt, &notes)
        .await
        .map_err(|e| ApiError::from_ai(e, AD_FAILURE_MESSAGE))?;

    let ad = state
        .ad_service
        .save_generated(
            current.id(),
            GeneratedAd {
                prompt: body.prompt,
                text,
                ad_type: body.ad_type,
                client_id: body.client_id,
            },
        )
        .await?;
    tracing::info!("Stored generated ad {}", ad.ad.id);
    Ok(created(ad.into()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ads", get(list_ads).post(create_ad))
        .route("/ads/generate", post(generate_ad))
        .route(
            "/ads/{id}",
            get(get_ad).put(update_ad).delete(delete_ad),
        )
}
