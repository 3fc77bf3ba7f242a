use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use pitchdesk_core::{
    contacts::{ContactInput, CustomerContact},
    utils::ids,
    RecordId,
};
use serde::{Deserialize, Serialize};

use super::{created, record_id};
use crate::{auth::CurrentUser, error::ApiResult, main_lib::AppState, models::MessageResponse};

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ContactQuery {
    #[serde(default, with = "ids::opt_as_string")]
    client_id: Option<RecordId>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BulkContactsRequest {
    #[serde(default, with = "ids::opt_as_string")]
    client_id: Option<RecordId>,
    contacts: Option<Vec<ContactInput>>,
}

#[derive(Serialize)]
struct BulkContactsResponse {
    message: String,
    contacts: Vec<CustomerContact>,
}

async fn list_contacts(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Query(query): Query<ContactQuery>,
) -> ApiResult<Json<Vec<CustomerContact>>> {
    let contacts = state
        .contact_service
        .list_contacts(current.id(), query.client_id)?;
    Ok(Json(contacts))
}

async fn get_contact(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<CustomerContact>> {
    let id = record_id(&id, "Customer contact")?;
    Ok(Json(state.contact_service.get_contact(current.id(), id)?))
}

async fn create_contact(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(input): Json<ContactInput>,
) -> ApiResult<(StatusCode, Json<CustomerContact>)> {
    let contact = state
        .contact_service
        .create_contact(current.id(), input)
        .await?;
    Ok(created(contact))
}

async fn bulk_create(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(body): Json<BulkContactsRequest>,
) -> ApiResult<(StatusCode, Json<BulkContactsResponse>)> {
    let contacts = state
        .contact_service
        .bulk_create(current.id(), body.client_id, body.contacts)
        .await?;
    Ok(created(BulkContactsResponse {
        message: format!("Created {} customer contacts", contacts.len()),
        contacts,
    }))
}

async fn update_contact(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(input): Json<ContactInput>,
) -> ApiResult<Json<CustomerContact>> {
    let id = record_id(&id, "Customer contact")?;
    let contact = state
        .contact_service
        .update_contact(current.id(), id, input)
        .await?;
    Ok(Json(contact))
}

async fn delete_contact(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<MessageResponse>> {
    let id = record_id(&id, "Customer contact")?;
    state.contact_service.delete_contact(current.id(), id).await?;
    Ok(Json(MessageResponse::deleted("Customer contact")))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/customer-contacts",
            get(list_contacts).post(create_contact),
        )
        .route("/customer-contacts/bulk", post(bulk_create))
        .route(
            "/customer-contacts/{id}",
            get(get_contact).put(update_contact).delete(delete_contact),
        )
}
