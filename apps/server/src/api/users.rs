use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Extension, Json, Router,
};
use pitchdesk_core::users::{NewTeamMember, User, UserUpdate};

use super::{created, record_id};
use crate::{auth::CurrentUser, error::ApiResult, main_lib::AppState, models::MessageResponse};

async fn list_users(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<User>>> {
    let users = state.user_service.list_team(&current.0)?;
    Ok(Json(users))
}

async fn create_user(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(member): Json<NewTeamMember>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let user = state
        .user_service
        .create_team_member(&current.0, member)
        .await?;
    Ok(created(user))
}

async fn update_user(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(update): Json<UserUpdate>,
) -> ApiResult<Json<User>> {
    let id = record_id(&id, "User")?;
    let user = state
        .user_service
        .update_team_member(&current.0, id, update)
        .await?;
    Ok(Json(user))
}

async fn delete_user(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<MessageResponse>> {
    let id = record_id(&id, "User")?;
    state.user_service.delete_team_member(&current.0, id).await?;
    Ok(Json(MessageResponse::deleted("User")))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", put(update_user).delete(delete_user))
}
