use std::sync::Arc;

use axum::{extract::State, routing::post, Extension, Json, Router};
use pitchdesk_ai::{AiError, CHAT_FAILURE_MESSAGE};
use pitchdesk_core::{clients::Client, Error as CoreError, RecordId};

use crate::{
    auth::CurrentUser,
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::{ChatRequest, ChatResponse},
};

/// Owned client and its ranked notes; an unknown client just means no context.
fn client_context(
    state: &AppState,
    owner: RecordId,
    client_id: Option<RecordId>,
) -> ApiResult<(Option<Client>, Vec<pitchdesk_core::notes::Note>)> {
    let Some(client_id) = client_id else {
        return Ok((None, Vec::new()));
    };
    let client = match state.client_service.get_client(owner, client_id) {
        Ok(client) => Some(client),
        Err(CoreError::NotFound(_)) => None,
        Err(e) => return Err(e.into()),
    };
    let notes = state.note_service.ai_context(owner, client_id)?;
    Ok((client, notes))
}

#[utoipa::path(
    post,
    path = "/api/chatbot/chat",
    request_body = ChatRequest,
    responses((status = 200, body = ChatResponse))
)]
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(body): Json<ChatRequest>,
) -> ApiResult<Json<ChatResponse>> {
    let ai = state
        .ai_service
        .clone()
        .ok_or_else(|| ApiError::from_ai(AiError::NotConfigured, CHAT_FAILURE_MESSAGE))?;

    let (client, notes) = client_context(&state, current.id(), body.client_id)?;
    let reply = ai
        .chat(&body.message, client.as_ref(), &notes)
        .await
        .map_err(|e| ApiError::from_ai(e, CHAT_FAILURE_MESSAGE))?;

    let context = if reply.used_context {
        "Client context used"
    } else {
        "No client context"
    };
    Ok(Json(ChatResponse {
        response: reply.response,
        context: context.to_string(),
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/chatbot/chat", post(chat))
}
