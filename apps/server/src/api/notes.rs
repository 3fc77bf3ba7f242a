use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use pitchdesk_core::notes::{Note, NoteFilter, NoteInput};

use super::{created, record_id};
use crate::{
    auth::CurrentUser,
    error::ApiResult,
    main_lib::AppState,
    models::{MessageResponse, NoteView},
};

async fn list_notes(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Query(filter): Query<NoteFilter>,
) -> ApiResult<Json<Vec<NoteView>>> {
    let notes = state.note_service.list_notes(current.id(), filter)?;
    Ok(Json(notes.into_iter().map(NoteView::from).collect()))
}

async fn get_note(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<NoteView>> {
    let id = record_id(&id, "Note")?;
    let note = state.note_service.get_note(current.id(), id)?;
    Ok(Json(note.into()))
}

async fn create_note(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(input): Json<NoteInput>,
) -> ApiResult<(StatusCode, Json<NoteView>)> {
    let note = state.note_service.create_note(current.id(), input).await?;
    Ok(created(note.into()))
}

async fn update_note(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(input): Json<NoteInput>,
) -> ApiResult<Json<NoteView>> {
    let id = record_id(&id, "Note")?;
    let note = state
        .note_service
        .update_note(current.id(), id, input)
        .await?;
    Ok(Json(note.into()))
}

async fn delete_note(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<MessageResponse>> {
    let id = record_id(&id, "Note")?;
    state.note_service.delete_note(current.id(), id).await?;
    Ok(Json(MessageResponse::deleted("Note")))
}

/// AI-relevant notes of one client, highest priority first.
async fn ai_notes(
    Path(client_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<Note>>> {
    let client_id = record_id(&client_id, "Client")?;
    let notes = state.note_service.ai_notes(current.id(), client_id)?;
    Ok(Json(notes))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/notes", get(list_notes).post(create_note))
        .route("/notes/ai/{client_id}", get(ai_notes))
        .route(
            "/notes/{id}",
            get(get_note).put(update_note).delete(delete_note),
        )
}
