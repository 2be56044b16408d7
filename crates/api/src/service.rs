//! Item service: orchestrates the item repository and the upload store
//! behind item-shaped operations.
//!
//! All field validation happens here (via `toyshop-core`), before any
//! upload is written, so an invalid request never leaves an orphaned
//! file. The HTTP layer only does shape work (id parsing, multipart
//! field collection) and status mapping.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

use toyshop_core::error::CoreError;
use toyshop_core::items;
use toyshop_core::types::DbId;
use toyshop_core::uploads::{UploadKind, UploadStore};
use toyshop_db::models::item::{CreateItem, Item, UpdateItem};
use toyshop_db::repositories::ItemRepo;
use toyshop_db::DbPool;

use crate::error::{AppError, AppResult};

/// One uploaded file as collected from a multipart field.
#[derive(Debug)]
pub struct UploadPayload {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Collected multipart form for create/update requests. Every field is
/// optional at this level; create enforces its required fields itself.
#[derive(Debug, Default)]
pub struct ItemForm {
    pub name: Option<String>,
    pub price: Option<String>,
    pub image: Option<UploadPayload>,
    pub sound: Option<UploadPayload>,
}

/// Orchestrates `ItemRepo` + `UploadStore` behind item operations.
#[derive(Clone)]
pub struct ItemService {
    pool: DbPool,
    uploads: Arc<UploadStore>,
}

impl ItemService {
    pub fn new(pool: DbPool, uploads: Arc<UploadStore>) -> Self {
        Self { pool, uploads }
    }

    /// All items, newest first.
    pub async fn list_items(&self) -> AppResult<Vec<Item>> {
        Ok(ItemRepo::list(&self.pool).await?)
    }

    /// One item, or `NotFound`.
    pub async fn get_item(&self, id: DbId) -> AppResult<Item> {
        ItemRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound { entity: "Item", id }))
    }

    /// Validate and create an item, persisting any uploads first.
    ///
    /// Name and price are checked before any file is written.
    pub async fn create_item(&self, form: ItemForm) -> AppResult<Item> {
        let name = items::validate_name(form.name.as_deref().unwrap_or(""))?;
        let price_cents = items::parse_price(form.price.as_deref().unwrap_or(""))?;

        let image_path = self.store_upload(UploadKind::Image, form.image.as_ref()).await?;
        let sound_file = self.store_upload(UploadKind::Sound, form.sound.as_ref()).await?;

        let item = ItemRepo::create(
            &self.pool,
            &CreateItem {
                name,
                price_cents,
                image_path,
                sound_file,
            },
        )
        .await?;

        tracing::info!(item_id = item.id, name = %item.name, "Item created");
        Ok(item)
    }

    /// Partial update: only supplied fields change.
    ///
    /// A newly uploaded image or sound replaces the stored locator; the
    /// previous file is left on disk (matches the original system, see
    /// DESIGN.md). An update carrying no fields at all is rejected.
    pub async fn update_item(&self, id: DbId, form: ItemForm) -> AppResult<Item> {
        self.get_item(id).await?;

        let mut update = UpdateItem::default();
        if let Some(name) = &form.name {
            update.name = Some(items::validate_name(name)?);
        }
        if let Some(price) = &form.price {
            update.price_cents = Some(items::parse_price(price)?);
        }
        update.image_path = self.store_upload(UploadKind::Image, form.image.as_ref()).await?;
        update.sound_file = self.store_upload(UploadKind::Sound, form.sound.as_ref()).await?;

        let changed = ItemRepo::update(&self.pool, id, &update).await?;
        if !changed {
            return Err(AppError::BadRequest("Failed to update item".into()));
        }

        tracing::info!(item_id = id, "Item updated");
        self.get_item(id).await
    }

    /// Delete an item, removing its files best-effort first.
    ///
    /// A missing backing file is ignored; any other removal failure is
    /// logged and never blocks the record delete.
    pub async fn delete_item(&self, id: DbId) -> AppResult<()> {
        let existing = self.get_item(id).await?;

        for locator in [existing.image_path, existing.sound_file]
            .into_iter()
            .flatten()
        {
            if let Err(err) = self.uploads.remove(&locator).await {
                if err.kind() != ErrorKind::NotFound {
                    tracing::warn!(
                        item_id = id,
                        locator = %locator,
                        error = %err,
                        "Failed to remove item asset",
                    );
                }
            }
        }

        let deleted = ItemRepo::delete(&self.pool, id).await?;
        if !deleted {
            return Err(AppError::Core(CoreError::NotFound { entity: "Item", id }));
        }

        tracing::info!(item_id = id, "Item deleted");
        Ok(())
    }

    /// Resolve the on-disk path of an item's image or sound.
    ///
    /// An item without the requested asset is "not found", the same as a
    /// missing item. Whether the backing file actually exists is decided
    /// by the caller when it opens the path.
    pub async fn asset_path(&self, id: DbId, kind: UploadKind) -> AppResult<PathBuf> {
        let item = self.get_item(id).await?;
        let locator = match kind {
            UploadKind::Image => item.image_path,
            UploadKind::Sound => item.sound_file,
        };
        let entity = match kind {
            UploadKind::Image => "Image",
            UploadKind::Sound => "Sound",
        };
        let locator = locator.ok_or(AppError::Core(CoreError::NotFound { entity, id }))?;
        Ok(self.uploads.resolve(&locator))
    }

    async fn store_upload(
        &self,
        kind: UploadKind,
        payload: Option<&UploadPayload>,
    ) -> AppResult<Option<String>> {
        let Some(payload) = payload else {
            return Ok(None);
        };
        let stored = self
            .uploads
            .save(kind, &payload.file_name, &payload.content_type, &payload.data)
            .await?;
        Ok(Some(stored.locator))
    }
}
