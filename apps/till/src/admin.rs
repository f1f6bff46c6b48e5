//! # Admin Service
//!
//! Menu maintenance behind `cafe menu ...`.
//!
//! ## Flow of Every Mutation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  raw input ──► validate (cafe-core) ──► one repository call            │
//! │                    │ error                     │ error                  │
//! │                    ▼                           ▼                        │
//! │             AppError::validation        AppError (logged)               │
//! │                                                │ ok                     │
//! │                                                ▼                        │
//! │                                   list() read-back → MenuChange         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::info;

use cafe_core::validation::validate_item_id;
use cafe_core::{MenuItem, MenuItemDraft, MenuItemPatch};
use cafe_db::MenuRepository;

use crate::error::{AppError, AppResult};

/// Result of one admin mutation: the affected item and the menu as it now
/// stands in the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuChange {
    pub item: MenuItem,
    pub menu: Vec<MenuItem>,
}

/// Validates admin input and drives the menu repository.
#[derive(Debug, Clone)]
pub struct AdminService {
    menu: MenuRepository,
}

impl AdminService {
    pub fn new(menu: MenuRepository) -> Self {
        AdminService { menu }
    }

    /// The full menu.
    pub async fn list(&self) -> AppResult<Vec<MenuItem>> {
        Ok(self.menu.list().await?)
    }

    /// Creates an item from raw name and price text.
    pub async fn add(&self, name: &str, price: &str) -> AppResult<MenuChange> {
        let draft = MenuItemDraft::parse(name, price)?;
        let item = self.menu.create(&draft).await?;
        info!(id = %item.id, name = %item.name, "Menu item added");
        self.read_back(item).await
    }

    /// Changes the name and/or price of an item.
    pub async fn edit(
        &self,
        id: &str,
        name: Option<&str>,
        price: Option<&str>,
    ) -> AppResult<MenuChange> {
        validate_item_id(id)?;
        let patch = MenuItemPatch::parse(name, price)?;
        let item = self.menu.update(id.trim(), &patch).await?;
        info!(id = %item.id, "Menu item updated");
        self.read_back(item).await
    }

    /// Removes an item; returns it as it was before deletion.
    pub async fn delete(&self, id: &str) -> AppResult<MenuChange> {
        validate_item_id(id)?;
        let id = id.trim();
        let item = self
            .menu
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("MenuItem", id))?;
        self.menu.delete(id).await?;
        info!(id = %id, "Menu item deleted");
        self.read_back(item).await
    }

    async fn read_back(&self, item: MenuItem) -> AppResult<MenuChange> {
        let menu = self.menu.list().await?;
        Ok(MenuChange { item, menu })
    }
}

/// Numbered plain-text menu. Numbers match the store screen's quick keys.
pub fn render_menu(items: &[MenuItem], currency_label: &str) -> String {
    if items.is_empty() {
        return "(menu is empty)".to_string();
    }

    let name_width = items
        .iter()
        .map(|i| i.name.chars().count())
        .max()
        .unwrap_or(0);

    items
        .iter()
        .enumerate()
        .map(|(n, item)| {
            format!(
                "{:>3}. {:<width$}  {:>12}  {}",
                n + 1,
                item.name,
                item.price().format_with(currency_label),
                item.id,
                width = name_width
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorCode, MENU_SERVICE_FAILED};
    use cafe_db::{Database, DbConfig};

    async fn service() -> (Database, AdminService) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let admin = AdminService::new(db.menu_items());
        (db, admin)
    }

    #[tokio::test]
    async fn test_add_reads_back_menu() {
        let (_db, admin) = service().await;

        admin.add("Burger", "250").await.unwrap();
        let change = admin.add("Soda", "60").await.unwrap();

        assert_eq!(change.item.name, "Soda");
        assert_eq!(change.item.price_cents, 6000);
        let names: Vec<&str> = change.menu.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Burger", "Soda"]);
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_repository() {
        let (_db, admin) = service().await;

        for (name, price) in [("", "10"), ("Tea", "-5"), ("Tea", "ten"), ("Tea", "")] {
            let err = admin.add(name, price).await.unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationError, "{name:?} {price:?}");
        }

        assert!(admin.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_edit() {
        let (_db, admin) = service().await;
        let burger = admin.add("Burger", "250").await.unwrap().item;

        let change = admin.edit(&burger.id, None, Some("275.50")).await.unwrap();
        assert_eq!(change.item.price_cents, 27550);
        assert_eq!(change.menu[0].price_cents, 27550);

        let err = admin.edit(&burger.id, None, None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_edit_and_delete_unknown_ids() {
        let (_db, admin) = service().await;
        let missing = "550e8400-e29b-41d4-a716-446655440000";

        let err = admin.edit(missing, Some("Ghost"), None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = admin.delete(missing).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = admin.delete("not-a-uuid").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_delete() {
        let (_db, admin) = service().await;
        let burger = admin.add("Burger", "250").await.unwrap().item;
        admin.add("Soda", "60").await.unwrap();

        let change = admin.delete(&burger.id).await.unwrap();
        assert_eq!(change.item.id, burger.id);
        assert_eq!(change.menu.len(), 1);
        assert_eq!(change.menu[0].name, "Soda");
    }

    #[tokio::test]
    async fn test_repository_failure_is_generic() {
        let (db, admin) = service().await;
        db.close().await;

        let err = admin.add("Burger", "250").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.message, MENU_SERVICE_FAILED);
    }

    #[test]
    fn test_render_menu() {
        let items = vec![
            MenuItem::new("a", "Burger", cafe_core::Money::from_cents(25000)),
            MenuItem::new("b", "Soda", cafe_core::Money::from_cents(6000)),
        ];
        let text = render_menu(&items, "Rs.");

        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("  1. Burger"));
        assert!(lines[0].contains("Rs.250.00"));
        assert!(lines[1].starts_with("  2. Soda"));
        assert_eq!(render_menu(&[], "Rs."), "(menu is empty)");
    }
}
