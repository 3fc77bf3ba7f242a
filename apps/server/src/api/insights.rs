use std::sync::Arc;

use axum::{extract::State, routing::get, Extension, Json, Router};
use pitchdesk_core::insights::{ClientLocation, Dashboard};

use crate::{auth::CurrentUser, error::ApiResult, main_lib::AppState};

async fn dashboard(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<Dashboard>> {
    Ok(Json(state.insights_service.dashboard(current.id())?))
}

async fn locations(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<ClientLocation>>> {
    Ok(Json(state.insights_service.locations(current.id())?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/insights/dashboard", get(dashboard))
        .route("/insights/locations", get(locations))
}
