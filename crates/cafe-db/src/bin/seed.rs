//! # Demo Menu Seeder
//!
//! Fills an empty database with a small cafe menu for development.
//!
//! ## Usage
//! ```bash
//! cargo run -p cafe-db --bin seed
//! cargo run -p cafe-db --bin seed -- --db ./data/cafe.db
//! ```

use std::env;

use cafe_core::MenuItemDraft;
use cafe_db::{Database, DbConfig};

/// (name, price) pairs, in the order they appear on the store screen.
const MENU: &[(&str, &str)] = &[
    ("Burger", "250"),
    ("Soda", "60"),
    ("Masala Dosa", "120.50"),
    ("Paneer Tikka", "220"),
    ("Veg Biryani", "180"),
    ("French Fries", "110"),
    ("Cold Coffee", "90"),
    ("Masala Chai", "30"),
    ("Gulab Jamun", "70"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let mut db_path = String::from("./cafe_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("CafeControl demo menu seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./cafe_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Database: {}", db_path);

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let menu = db.menu_items();

    let existing = menu.count().await?;
    if existing > 0 {
        println!("Database already has {} menu items; skipping.", existing);
        println!("Delete the database file to reseed.");
        return Ok(());
    }

    for (name, price) in MENU {
        let item = menu.create(&MenuItemDraft::parse(name, price)?).await?;
        println!("  + {:<16} {:>8}", item.name, item.price().to_string());
    }

    println!("Seeded {} menu items.", MENU.len());
    db.close().await;
    Ok(())
}
