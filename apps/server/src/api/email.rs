use std::sync::Arc;

use axum::{extract::State, routing::post, Extension, Json, Router};
use pitchdesk_core::outreach::{BulkReport, EmailRequest, SendOutcome};

use crate::{auth::CurrentUser, error::ApiResult, main_lib::AppState};

async fn send(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(request): Json<EmailRequest>,
) -> ApiResult<Json<SendOutcome>> {
    let outcome = state
        .outreach_service
        .send_email(current.id(), request)
        .await?;
    Ok(Json(outcome))
}

async fn send_bulk(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(request): Json<EmailRequest>,
) -> ApiResult<Json<BulkReport>> {
    let report = state
        .outreach_service
        .send_bulk_email(current.id(), request)
        .await?;
    tracing::info!("Bulk email: {}/{} delivered", report.sent, report.total);
    Ok(Json(report))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/email/send", post(send))
        .route("/email/send-bulk", post(send_bulk))
}
