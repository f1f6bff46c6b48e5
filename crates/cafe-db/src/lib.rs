//! # cafe-db: Menu Repository for CafeControl
//!
//! SQLite storage for menu items, accessed through sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        CafeControl Data Flow                            │
//! │                                                                         │
//! │  till: `cafe menu add --name Burger --price 250`                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     cafe-db (THIS CRATE)                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repository   │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│  (menu.rs)    │    │  (embedded)  │  │   │
//! │  │   │  SqlitePool   │    │  MenuRepo     │    │ 001_menu.sql │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (cafe.db) or a private in-memory database in tests        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cafe_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("cafe.db")).await?;
//! let menu = db.menu_items().list().await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::menu::MenuRepository;
