use std::{
    path::Path as StdPath,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use axum::{
    body::Bytes,
    extract::{multipart::MultipartError, Multipart, State},
    routing::post,
    Json, Router,
};
use rand::Rng;
use serde::Serialize;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::UploadedFile,
};

pub const MAX_FILES: usize = 10;

struct IncomingFile {
    original_name: String,
    mimetype: String,
    data: Bytes,
}

#[derive(Serialize)]
struct UploadedFiles {
    files: Vec<UploadedFile>,
}

fn multipart_error(err: MultipartError) -> ApiError {
    ApiError::BadRequest(err.body_text())
}

/// Subdirectory for a media type; `None` for anything but images and videos.
fn media_dir(mimetype: &str) -> Option<&'static str> {
    if mimetype.starts_with("image/") {
        Some("images")
    } else if mimetype.starts_with("video/") {
        Some("videos")
    } else {
        None
    }
}

fn stored_name(original_name: &str, millis: u128, suffix: u32) -> String {
    let extension = StdPath::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default();
    format!("{millis}-{suffix}{extension}")
}

/// Reads every part named `field`, rejecting non-media files and extra parts.
async fn collect_files(
    mut multipart: Multipart,
    field: &str,
    limit: usize,
) -> ApiResult<Vec<IncomingFile>> {
    let mut files = Vec::new();
    while let Some(part) = multipart.next_field().await.map_err(multipart_error)? {
        if part.name() != Some(field) || part.file_name().is_none() {
            continue;
        }
        let original_name = part.file_name().unwrap_or_default().to_string();
        let mimetype = part
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        if media_dir(&mimetype).is_none() {
            return Err(ApiError::BadRequest(
                "Only image and video files are allowed".to_string(),
            ));
        }
        if files.len() == limit {
            return Err(ApiError::BadRequest(format!(
                "Too many files; at most {limit} are accepted"
            )));
        }
        let data = part.bytes().await.map_err(multipart_error)?;
        files.push(IncomingFile {
            original_name,
            mimetype,
            data,
        });
    }
    Ok(files)
}

async fn store(uploads_dir: &StdPath, file: IncomingFile) -> ApiResult<UploadedFile> {
    let dir = media_dir(&file.mimetype).unwrap_or("videos");
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let suffix = rand::thread_rng().gen_range(0..1_000_000_000);
    let filename = stored_name(&file.original_name, millis, suffix);

    let target_dir = uploads_dir.join(dir);
    tokio::fs::create_dir_all(&target_dir)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to create upload directory: {e}")))?;
    tokio::fs::write(target_dir.join(&filename), &file.data)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to store upload: {e}")))?;
    tracing::debug!("Stored upload {}/{} ({} bytes)", dir, filename, file.data.len());

    Ok(UploadedFile {
        url: format!("/uploads/{dir}/{filename}"),
        size: file.data.len(),
        filename,
        original_name: file.original_name,
        mimetype: file.mimetype,
    })
}

async fn upload_single(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> ApiResult<Json<UploadedFile>> {
    let file = collect_files(multipart, "file", 1)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::BadRequest("No file uploaded".to_string()))?;
    Ok(Json(store(&state.uploads_dir, file).await?))
}

async fn upload_multiple(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> ApiResult<Json<UploadedFiles>> {
    let incoming = collect_files(multipart, "files", MAX_FILES).await?;
    if incoming.is_empty() {
        return Err(ApiError::BadRequest("No files uploaded".to_string()));
    }
    let files = store_all(&state.uploads_dir, incoming).await?;
    Ok(Json(UploadedFiles { files }))
}

/// Stores a batch. If any file fails, the ones already written are removed.
async fn store_all(
    uploads_dir: &StdPath,
    incoming: Vec<IncomingFile>,
) -> ApiResult<Vec<UploadedFile>> {
    let mut files = Vec::with_capacity(incoming.len());
    for file in incoming {
        match store(uploads_dir, file).await {
            Ok(stored) => files.push(stored),
            Err(err) => {
                for stored in &files {
                    let dir = media_dir(&stored.mimetype).unwrap_or("videos");
                    let path = uploads_dir.join(dir).join(&stored.filename);
                    if let Err(e) = tokio::fs::remove_file(&path).await {
                        tracing::warn!("Failed to remove partial upload {}: {}", path.display(), e);
                    }
                }
                return Err(err);
            }
        }
    }
    Ok(files)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/upload/single", post(upload_single))
        .route("/upload/multiple", post(upload_multiple))
}
