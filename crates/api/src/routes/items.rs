use axum::routing::get;
use axum::Router;

use crate::handlers::items;
use crate::state::AppState;

/// Item CRUD and asset routes, mounted under `/api`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/items", get(items::list_items).post(items::create_item))
        .route(
            "/items/{id}",
            get(items::get_item)
                .put(items::update_item)
                .delete(items::delete_item),
        )
        .route("/items/{id}/image", get(items::get_item_image))
        .route("/items/{id}/sound", get(items::get_item_sound))
}
