//! Item entity model and DTOs.

use serde::{Serialize, Serializer};
use sqlx::FromRow;
use toyshop_core::types::{DbId, Timestamp};

/// A row from the `items` table.
///
/// Serializes `price_cents` as the two-decimal `price` number used on the
/// wire, and omits absent locators entirely rather than emitting `null`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Item {
    pub id: DbId,
    pub name: String,
    #[serde(rename = "price", serialize_with = "cents_as_decimal")]
    pub price_cents: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sound_file: Option<String>,
    pub created_at: Timestamp,
}

fn cents_as_decimal<S: Serializer>(cents: &i64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(toyshop_core::items::cents_to_decimal(*cents))
}

/// Fields for inserting a new item. Built by the item service from an
/// already-validated request, so no `Deserialize` here.
#[derive(Debug, Clone)]
pub struct CreateItem {
    pub name: String,
    pub price_cents: i64,
    pub image_path: Option<String>,
    pub sound_file: Option<String>,
}

/// Partial update: only fields that are `Some` are written.
#[derive(Debug, Clone, Default)]
pub struct UpdateItem {
    pub name: Option<String>,
    pub price_cents: Option<i64>,
    pub image_path: Option<String>,
    pub sound_file: Option<String>,
}

impl UpdateItem {
    /// True when no field was supplied; such an update is a no-op.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price_cents.is_none()
            && self.image_path.is_none()
            && self.sound_file.is_none()
    }
}
