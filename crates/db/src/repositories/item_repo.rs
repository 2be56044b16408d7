//! Repository for the `items` table.

use sqlx::SqlitePool;
use toyshop_core::types::DbId;

use crate::models::item::{CreateItem, Item, UpdateItem};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, price_cents, image_path, sound_file, created_at";

/// Provides CRUD operations for items.
pub struct ItemRepo;

impl ItemRepo {
    /// Insert a new item, returning the created row.
    ///
    /// `created_at` is bound here rather than defaulted in SQL so the
    /// timestamp carries sub-second precision for stable list ordering.
    pub async fn create(pool: &SqlitePool, input: &CreateItem) -> Result<Item, sqlx::Error> {
        let query = format!(
            "INSERT INTO items (name, price_cents, image_path, sound_file, created_at)
             VALUES (?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(&input.name)
            .bind(input.price_cents)
            .bind(&input.image_path)
            .bind(&input.sound_file)
            .bind(chrono::Utc::now())
            .fetch_one(pool)
            .await
    }

    /// Find an item by id.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Item>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM items WHERE id = ?");
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all items, newest first. Id is the tiebreak so an item
    /// inserted after another always lists before it.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Item>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM items ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Item>(&query).fetch_all(pool).await
    }

    /// Apply a partial update; only supplied fields are written.
    ///
    /// Returns whether a row was changed. An update carrying no fields is
    /// a no-op and reports `false` without touching the database.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateItem,
    ) -> Result<bool, sqlx::Error> {
        if input.is_empty() {
            return Ok(false);
        }

        let mut builder = sqlx::QueryBuilder::<sqlx::Sqlite>::new("UPDATE items SET ");
        let mut fields = builder.separated(", ");
        if let Some(name) = &input.name {
            fields.push("name = ");
            fields.push_bind_unseparated(name);
        }
        if let Some(price_cents) = input.price_cents {
            fields.push("price_cents = ");
            fields.push_bind_unseparated(price_cents);
        }
        if let Some(image_path) = &input.image_path {
            fields.push("image_path = ");
            fields.push_bind_unseparated(image_path);
        }
        if let Some(sound_file) = &input.sound_file {
            fields.push("sound_file = ");
            fields.push_bind_unseparated(sound_file);
        }
        builder.push(" WHERE id = ");
        builder.push_bind(id);

        let result = builder.build().execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete an item. Returns whether a row was removed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM items WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
