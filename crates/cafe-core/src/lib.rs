//! # cafe-core: Pure Business Logic for CafeControl
//!
//! Everything the till needs to turn menu taps into an invoice, with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        CafeControl Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/till (CLI)                              │   │
//! │  │    menu list/add/edit/delete        store screen (stdin)        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ cafe-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐  │   │
//! │  │   │  types  │ │  order  │ │ pricing │ │ receipt │ │navigate │  │   │
//! │  │   │MenuItem │ │ addLine │ │discount │ │  58mm   │ │ cursor  │  │   │
//! │  │   │  Rate   │ │ subtotal│ │ then GST│ │  80mm   │ │  keys   │  │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    cafe-db (Menu Repository)                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (MenuItem, Rate, admin inputs)
//! - [`money`] - Integer cents plus an exact sub-cent amount for billing
//! - [`order`] - Line-item aggregator and subtotal
//! - [`pricing`] - Discount-then-GST pipeline
//! - [`receipt`] - Plain-text bill for thermal printers
//! - [`navigation`] - Store screen focus cursor
//! - [`validation`] - Admin input rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use cafe_core::{MenuItem, Money, Order, PricingPolicy};
//!
//! let burger = MenuItem::new("burger-id", "Burger", Money::from_cents(25000));
//! let soda = MenuItem::new("soda-id", "Soda", Money::from_cents(6000));
//!
//! let order = Order::new().add_line(&burger).add_line(&soda).add_line(&burger);
//!
//! let bill = PricingPolicy::default().price(order.subtotal());
//! assert_eq!(bill.subtotal.cents(), 56000);
//! assert_eq!(bill.final_total.round_to_cents().cents(), 52920);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod navigation;
pub mod order;
pub mod pricing;
pub mod receipt;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{ExactMoney, Money};
pub use navigation::{Cursor, Focus, Key, KeyOutcome};
pub use order::{ItemRef, Order, OrderLine};
pub use pricing::{BillSummary, PricingPolicy};
pub use receipt::{PaperSize, ReceiptLayout};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Discount applied to every bill: 10%.
pub const DEFAULT_DISCOUNT_BPS: u32 = 1000;

/// GST applied after the discount: 5%.
pub const DEFAULT_GST_BPS: u32 = 500;

/// Label printed in front of every amount.
pub const DEFAULT_CURRENCY_LABEL: &str = "Rs.";

/// Longest menu item name accepted by the admin screen.
pub const MAX_ITEM_NAME_LEN: usize = 100;

/// Highest menu price accepted: Rs.1,00,00,000.00.
pub const MAX_PRICE_CENTS: i64 = 1_000_000_000;

/// Most units one bill line can hold. Further adds are ignored.
pub const MAX_LINE_QUANTITY: u32 = 999;

/// Longest currency label that still leaves room for amounts on 58mm paper.
pub const MAX_CURRENCY_LABEL_LEN: usize = 5;
