//! Handlers for the `/api/items` resource.

use axum::body::Body;
use axum::extract::{Multipart, Path, State};
use axum::http::{Response, StatusCode};
use axum::Json;
use toyshop_core::types::DbId;
use toyshop_core::uploads::UploadKind;
use toyshop_db::models::item::Item;

use crate::error::{AppError, AppResult};
use crate::handlers::files::serve_file;
use crate::response::ApiResponse;
use crate::service::{ItemForm, ItemService, UploadPayload};
use crate::state::AppState;

/// Parse the `{id}` path segment.
///
/// Ids are extracted as strings and parsed by hand so a non-numeric id
/// produces a 400 with the standard envelope instead of Axum's plain-text
/// path rejection.
fn parse_id(raw: &str) -> AppResult<DbId> {
    raw.parse()
        .map_err(|_| AppError::BadRequest("Invalid item ID".into()))
}

fn service(state: &AppState) -> ItemService {
    ItemService::new(state.pool.clone(), state.uploads.clone())
}

/// Collect a multipart request into an [`ItemForm`].
///
/// Fields carrying a filename are uploads and are dispatched by field
/// name; `image` and `sound` are the only accepted upload fields. Text
/// fields other than `name` and `price` are ignored, as the original
/// system ignores unknown body fields.
async fn read_item_form(mut multipart: Multipart) -> AppResult<ItemForm> {
    let mut form = ItemForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        if field.file_name().is_some() {
            let kind = UploadKind::from_field(&field_name)?;
            let file_name = field.file_name().unwrap_or("upload").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?
                .to_vec();

            let payload = UploadPayload {
                file_name,
                content_type,
                data,
            };
            match kind {
                UploadKind::Image => form.image = Some(payload),
                UploadKind::Sound => form.sound = Some(payload),
            }
        } else {
            let text = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            match field_name.as_str() {
                "name" => form.name = Some(text),
                "price" => form.price = Some(text),
                _ => {}
            }
        }
    }

    Ok(form)
}

/// GET /api/items
pub async fn list_items(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Vec<Item>>>> {
    let items = service(&state).list_items().await?;
    Ok(Json(ApiResponse::ok(items)))
}

/// GET /api/items/{id}
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Item>>> {
    let id = parse_id(&id)?;
    let item = service(&state).get_item(id).await?;
    Ok(Json(ApiResponse::ok(item)))
}

/// POST /api/items (multipart: name, price, image?, sound?)
pub async fn create_item(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<ApiResponse<Item>>)> {
    let form = read_item_form(multipart).await?;
    let item = service(&state).create_item(form).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(item))))
}

/// PUT /api/items/{id} (multipart, all fields optional)
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<Item>>> {
    let id = parse_id(&id)?;
    let form = read_item_form(multipart).await?;
    let item = service(&state).update_item(id, form).await?;
    Ok(Json(ApiResponse::ok(item)))
}

/// DELETE /api/items/{id}
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let id = parse_id(&id)?;
    service(&state).delete_item(id).await?;
    Ok(Json(ApiResponse::empty()))
}

/// GET /api/items/{id}/image
pub async fn get_item_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response<Body>> {
    let id = parse_id(&id)?;
    let path = service(&state).asset_path(id, UploadKind::Image).await?;
    serve_file(&path, AppError::NotFound("Image file not found".into())).await
}

/// GET /api/items/{id}/sound
pub async fn get_item_sound(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response<Body>> {
    let id = parse_id(&id)?;
    let path = service(&state).asset_path(id, UploadKind::Sound).await?;
    serve_file(&path, AppError::NotFound("Sound file not found".into())).await
}
