use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use pitchdesk_core::post_history::{PostFilter, PostHistoryInput};

use super::{created, record_id};
use crate::{auth::CurrentUser, error::ApiResult, main_lib::AppState, models::PostView};

async fn list_posts(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Query(filter): Query<PostFilter>,
) -> ApiResult<Json<Vec<PostView>>> {
    let posts = state.post_history_service.list_posts(current.id(), filter)?;
    Ok(Json(posts.into_iter().map(PostView::from).collect()))
}

async fn get_post(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> ApiResult<Json<PostView>> {
    let id = record_id(&id, "Post")?;
    Ok(Json(state.post_history_service.get_post(current.id(), id)?.into()))
}

async fn create_post(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(input): Json<PostHistoryInput>,
) -> ApiResult<(StatusCode, Json<PostView>)> {
    let post = state
        .post_history_service
        .create_post(current.id(), input)
        .await?;
    Ok(created(post.into()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/post-history", get(list_posts).post(create_post))
        .route("/post-history/{id}", get(get_post))
}
