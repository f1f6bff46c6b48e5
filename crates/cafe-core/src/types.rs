//! # Domain Types
//!
//! Core domain types used throughout CafeControl.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    MenuItem     │   │  MenuItemDraft  │   │  MenuItemPatch  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  name           │   │  name?          │       │
//! │  │  name           │   │  price          │   │  price?         │       │
//! │  │  price_cents    │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘        admin create          admin edit          │
//! │                                                                         │
//! │  ┌─────────────────┐                                                   │
//! │  │      Rate       │   discount and GST, in basis points               │
//! │  │  bps (u32)      │   1000 = 10%, 500 = 5%                            │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Order types live in [`crate::order`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{parse_price, validate_item_name, ValidationResult};

// =============================================================================
// Rate
// =============================================================================

/// A proportion represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000. Integer bps keep the pricing pipeline
/// in integer arithmetic: 1000 bps = 10% discount, 500 bps = 5% GST.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rate(u32);

impl Rate {
    /// One whole (100%) in basis points.
    pub const WHOLE_BPS: u32 = 10_000;

    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Creates a rate from a percentage (`10.0` → 1000 bps).
    ///
    /// Negative or non-finite input becomes zero.
    pub fn from_percentage(pct: f64) -> Self {
        if !pct.is_finite() || pct <= 0.0 {
            return Rate(0);
        }
        Rate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Receipt label: `10%`, or `8.25%` when not a whole percent.
    pub fn percent_label(&self) -> String {
        let (whole, frac) = (self.0 / 100, self.0 % 100);
        if frac == 0 {
            format!("{}%", whole)
        } else if frac % 10 == 0 {
            format!("{}.{}%", whole, frac / 10)
        } else {
            format!("{}.{:02}%", whole, frac)
        }
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Rate(0)
    }

    /// True for a proportion in [0, 1).
    #[inline]
    pub const fn is_proportion(&self) -> bool {
        self.0 < Self::WHOLE_BPS
    }
}

// =============================================================================
// Menu Item
// =============================================================================

/// A dish or drink on the menu.
///
/// Owned by the menu repository. The order copies `name` and `price_cents`
/// when a line is first added, so later edits here never touch an open bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MenuItem {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown on the store screen and on the receipt.
    pub name: String,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,

    /// When the item was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the item was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl MenuItem {
    /// Builds an item in memory with fresh timestamps.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Money) -> Self {
        let now = Utc::now();
        MenuItem {
            id: id.into(),
            name: name.into(),
            price_cents: price.cents(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Admin Inputs
// =============================================================================

/// A validated "add menu item" request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItemDraft {
    pub name: String,
    pub price: Money,
}

impl MenuItemDraft {
    /// Validates raw admin input.
    ///
    /// ```rust
    /// use cafe_core::types::MenuItemDraft;
    ///
    /// let draft = MenuItemDraft::parse("  Masala Dosa ", "120.50").unwrap();
    /// assert_eq!(draft.name, "Masala Dosa");
    /// assert_eq!(draft.price.cents(), 12050);
    ///
    /// assert!(MenuItemDraft::parse("", "10").is_err());
    /// assert!(MenuItemDraft::parse("Tea", "-1").is_err());
    /// ```
    pub fn parse(name: &str, price: &str) -> ValidationResult<Self> {
        validate_item_name(name)?;
        Ok(MenuItemDraft {
            name: name.trim().to_string(),
            price: parse_price(price)?,
        })
    }
}

/// A validated "edit menu item" request. At least one field is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItemPatch {
    pub name: Option<String>,
    pub price: Option<Money>,
}

impl MenuItemPatch {
    /// Validates raw admin input; fields left as `None` are unchanged.
    pub fn parse(name: Option<&str>, price: Option<&str>) -> ValidationResult<Self> {
        let name = match name {
            Some(n) => {
                validate_item_name(n)?;
                Some(n.trim().to_string())
            }
            None => None,
        };
        let price = price.map(parse_price).transpose()?;

        if name.is_none() && price.is_none() {
            return Err(ValidationError::EmptyPatch);
        }

        Ok(MenuItemPatch { name, price })
    }

    /// Returns a copy of `item` with this patch applied.
    pub fn apply_to(&self, item: &MenuItem) -> MenuItem {
        MenuItem {
            name: self.name.clone().unwrap_or_else(|| item.name.clone()),
            price_cents: self.price.map(|p| p.cents()).unwrap_or(item.price_cents),
            ..item.clone()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
