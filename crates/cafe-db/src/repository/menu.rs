//! # Menu Repository
//!
//! CRUD over the `menu_items` table.
//!
//! Inputs arrive already validated as [`MenuItemDraft`] / [`MenuItemPatch`];
//! the table's CHECK constraints are the last line behind that. Deletes are
//! hard deletes: an open order keeps its own copy of name and price.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use cafe_core::{MenuItem, MenuItemDraft, MenuItemPatch};

const ENTITY: &str = "MenuItem";

/// Repository for menu item database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = MenuRepository::new(pool);
///
/// let soda = repo.create(&MenuItemDraft::parse("Soda", "60")?).await?;
/// let all = repo.list().await?;
/// ```
#[derive(Debug, Clone)]
pub struct MenuRepository {
    pool: SqlitePool,
}

impl MenuRepository {
    /// Creates a new MenuRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MenuRepository { pool }
    }

    /// Lists every menu item in the order they were added.
    pub async fn list(&self) -> DbResult<Vec<MenuItem>> {
        let items = sqlx::query_as::<_, MenuItem>(
            r#"
            SELECT id, name, price_cents, created_at, updated_at
            FROM menu_items
            ORDER BY rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = items.len(), "Listed menu items");
        Ok(items)
    }

    /// Gets a menu item by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(MenuItem))` - Item found
    /// * `Ok(None)` - No such item
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<MenuItem>> {
        let item = sqlx::query_as::<_, MenuItem>(
            r#"
            SELECT id, name, price_cents, created_at, updated_at
            FROM menu_items
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Inserts a new item with a fresh UUID and returns it.
    pub async fn create(&self, draft: &MenuItemDraft) -> DbResult<MenuItem> {
        let item = MenuItem::new(generate_menu_item_id(), draft.name.clone(), draft.price);

        debug!(id = %item.id, name = %item.name, price_cents = item.price_cents, "Creating menu item");

        sqlx::query(
            r#"
            INSERT INTO menu_items (id, name, price_cents, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(item.price_cents)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(item)
    }

    /// Applies the patch's fields and returns the stored result.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - No item with this id
    pub async fn update(&self, id: &str, patch: &MenuItemPatch) -> DbResult<MenuItem> {
        debug!(
            id = %id,
            name = ?patch.name,
            price_cents = ?patch.price.map(|p| p.cents()),
            "Updating menu item"
        );

        let result = sqlx::query(
            r#"
            UPDATE menu_items SET
                name = COALESCE(?2, name),
                price_cents = COALESCE(?3, price_cents),
                updated_at = ?4
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(patch.name.as_deref())
        .bind(patch.price.map(|p| p.cents()))
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(ENTITY, id));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found(ENTITY, id))
    }

    /// Permanently deletes an item.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - No item with this id
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting menu item");

        let result = sqlx::query("DELETE FROM menu_items WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(ENTITY, id));
        }

        Ok(())
    }

    /// Counts menu items.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menu_items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Generates a new menu item ID (UUID v4).
pub fn generate_menu_item_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
