pub mod health;
pub mod items;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /items                 list (GET), create (POST multipart)
/// /items/{id}            get, update (PUT multipart), delete
/// /items/{id}/image      raw image bytes
/// /items/{id}/sound      raw sound bytes
/// /default-sound         shared fallback audio asset
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(items::router())
        .route("/default-sound", get(handlers::files::default_sound))
}
