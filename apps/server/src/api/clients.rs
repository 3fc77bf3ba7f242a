use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use pitchdesk_core::clients::{Client, ClientInput};

use super::{created, record_id};
use crate::{auth::CurrentUser, error::ApiResult, main_lib::AppState, models::MessageResponse};

async fn list_clients(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<Client>>> {
    let clients = state.client_service.list_clients(current.id())?;
    Ok(Json(clients))
}

async fn get_client(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<Client>> {
    let id = record_id(&id, "Client")?;
    Ok(Json(state.client_service.get_client(current.id(), id)?))
}

async fn create_client(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(input): Json<ClientInput>,
) -> ApiResult<(StatusCode, Json<Client>)> {
    let client = state
        .client_service
        .create_client(current.id(), input)
        .await?;
    Ok(created(client))
}

async fn update_client(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(input): Json<ClientInput>,
) -> ApiResult<Json<Client>> {
    let id = record_id(&id, "Client")?;
    let client = state
        .client_service
        .update_client(current.id(), id, input)
        .await?;
    Ok(Json(client))
}

async fn delete_client(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<MessageResponse>> {
    let id = record_id(&id, "Client")?;
    state.client_service.delete_client(current.id(), id).await?;
    Ok(Json(MessageResponse::deleted("Client")))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/clients", get(list_clients).post(create_client))
        .route(
            "/clients/{id}",
            get(get_client).put(update_client).delete(delete_client),
        )
}
