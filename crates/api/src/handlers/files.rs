//! Binary asset serving: item images, item sounds, the default sound.

use std::path::Path;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Response};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/default-sound
///
/// The shared fallback audio clip played for items without a custom sound.
pub async fn default_sound(State(state): State<AppState>) -> AppResult<Response<Body>> {
    let path = state.uploads.default_sound();
    serve_file(
        &path,
        AppError::NotFound("Default sound file not found".into()),
    )
    .await
}

/// Serve the bytes behind `path` with a Content-Type derived from its
/// extension. A missing file yields `not_found`; the record saying a file
/// exists is no guarantee that it does.
pub async fn serve_file(path: &Path, not_found: AppError) -> AppResult<Response<Body>> {
    let data = match tokio::fs::read(path).await {
        Ok(data) => data,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Err(not_found),
        Err(err) => {
            return Err(AppError::InternalError(format!(
                "Failed to read asset {}: {err}",
                path.display()
            )))
        }
    };

    Response::builder()
        .header(header::CONTENT_TYPE, content_type_for(path))
        .header(header::CONTENT_LENGTH, data.len().to_string())
        .body(Body::from(data))
        .map_err(|err| AppError::InternalError(format!("Failed to build response: {err}")))
}

/// Map a file extension to a Content-Type.
fn content_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("ogg") => "audio/ogg",
        _ => "application/octet-stream",
    }
}
