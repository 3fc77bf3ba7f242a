use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use pitchdesk_core::templates::{RenderedTemplate, Template, TemplateInput, TemplateType};
use serde::Deserialize;

use super::{created, record_id};
use crate::{auth::CurrentUser, error::ApiResult, main_lib::AppState, models::MessageResponse};

#[derive(Deserialize, Default)]
struct TemplateQuery {
    #[serde(rename = "type")]
    template_type: Option<TemplateType>,
}

#[derive(Deserialize, Default)]
struct RenderRequest {
    #[serde(default)]
    values: HashMap<String, String>,
}

async fn list_templates(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Query(query): Query<TemplateQuery>,
) -> ApiResult<Json<Vec<Template>>> {
    let templates = state
        .template_service
        .list_templates(current.id(), query.template_type)?;
    Ok(Json(templates))
}

async fn get_template(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<Template>> {
    let id = record_id(&id, "Template")?;
    Ok(Json(state.template_service.get_template(current.id(), id)?))
}

async fn create_template(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(input): Json<TemplateInput>,
) -> ApiResult<(StatusCode, Json<Template>)> {
    let template = state
        .template_service
        .create_template(current.id(), input)
        .await?;
    Ok(created(template))
}

async fn update_template(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(input): Json<TemplateInput>,
) -> ApiResult<Json<Template>> {
    let id = record_id(&id, "Template")?;
    let template = state
        .template_service
        .update_template(current.id(), id, input)
        .await?;
    Ok(Json(template))
}

async fn delete_template(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<MessageResponse>> {
    let id = record_id(&id, "Template")?;
    state
        .template_service
        .delete_template(current.id(), id)
        .await?;
    Ok(Json(MessageResponse::deleted("Template")))
}

async fn render_template(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(body): Json<RenderRequest>,
) -> ApiResult<Json<RenderedTemplate>> {
    let id = record_id(&id, "Template")?;
    let rendered = state
        .template_service
        .render_template(current.id(), id, &body.values)?;
    Ok(Json(rendered))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/templates", get(list_templates).post(create_template))
        .route(
            "/templates/{id}",
            get(get_template)
                .put(update_template)
                .delete(delete_template),
        )
        .route("/templates/{id}/render", post(render_template))
}
