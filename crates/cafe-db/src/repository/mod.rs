//! # Repository Module
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  till AdminService / StoreSession                                      │
//! │       │   db.menu_items().list()                                        │
//! │       ▼                                                                 │
//! │  MenuRepository                                                        │
//! │  ├── list()                                                            │
//! │  ├── get_by_id(id)                                                     │
//! │  ├── create(draft)                                                     │
//! │  ├── update(id, patch)                                                 │
//! │  ├── delete(id)                                                        │
//! │  └── count()                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  menu_items table                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod menu;
