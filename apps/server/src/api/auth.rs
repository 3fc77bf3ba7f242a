use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use pitchdesk_core::users::Registration;

use super::created;
use crate::{
    auth::CurrentUser,
    error::ApiResult,
    main_lib::AppState,
    models::{AuthResponse, LoginRequest, UserResponse},
};

#[utoipa::path(
    post,
    path = "/api/auth/register",
    responses((status = 201, body = AuthResponse), (status = 400, description = "Invalid input or duplicate email"))
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(registration): Json<Registration>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let user = state.user_service.register(registration).await?;
    let token = state.auth.issue_token(user.id)?;
    tracing::info!("Registered user {}", user.id);
    Ok(created(AuthResponse { token, user }))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses((status = 200, body = AuthResponse), (status = 401, description = "Invalid credentials"))
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let user = state.user_service.authenticate(&body.email, &body.password)?;
    let token = state.auth.issue_token(user.id)?;
    Ok(Json(AuthResponse { token, user }))
}

async fn me(Extension(current): Extension<CurrentUser>) -> Json<UserResponse> {
    Json(UserResponse { user: current.0 })
}

pub fn public_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

pub fn protected_router() -> Router<Arc<AppState>> {
    Router::new().route("/auth/me", get(me))
}
