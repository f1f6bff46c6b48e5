//! # cafe-till: CafeControl Command-Line Till
//!
//! ## Module Organization
//! ```text
//! cafe_till/
//! ├── lib.rs      ◄─── command dispatch, tracing setup
//! ├── cli.rs      ◄─── clap definitions
//! ├── config.rs   ◄─── AppConfig: defaults → cafe.toml → CAFE_* → validate
//! ├── admin.rs    ◄─── menu list/add/edit/delete
//! ├── store.rs    ◄─── interactive store screen
//! └── error.rs    ◄─── AppError + ErrorCode
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing
//! 2. Load configuration
//! 3. Open the database and run migrations (not needed for `config`)
//! 4. Run the command

pub mod admin;
pub mod cli;
pub mod config;
pub mod error;
pub mod store;

use serde::Serialize;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cafe_db::Database;

use admin::{render_menu, AdminService, MenuChange};
use cli::{Cli, Command, MenuCommand};
use config::AppConfig;
use error::AppResult;
use store::StoreSession;

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,cafe=debug,sqlx=warn";

/// Initializes the tracing subscriber. Logs go to stderr so stdout stays
/// clean for receipts and `--json`.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - everything at debug
/// - `RUST_LOG=cafe_db=trace` - one crate only
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs one CLI invocation.
pub async fn run(cli: Cli) -> AppResult<()> {
    let config = AppConfig::load(cli.config.clone())?;

    if let Command::Config = cli.command {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let db = Database::new(config.db_config()).await?;
    info!(path = %config.database.path.display(), "Database ready");

    let result = match cli.command {
        Command::Menu(args) => run_menu(&db, &config, args.command, cli.json).await,
        Command::Store => run_store(&db, &config).await,
        Command::Config => Ok(()),
    };

    db.close().await;
    result
}

async fn run_menu(
    db: &Database,
    config: &AppConfig,
    command: MenuCommand,
    json: bool,
) -> AppResult<()> {
    let admin = AdminService::new(db.menu_items());
    let label = config.store.currency_label.as_str();

    match command {
        MenuCommand::List => {
            let menu = admin.list().await?;
            if json {
                print_json(&menu)?;
            } else {
                println!("{}", render_menu(&menu, label));
            }
        }
        MenuCommand::Add { name, price } => {
            let change = admin.add(&name, &price).await?;
            print_change("Added", &change, label, json)?;
        }
        MenuCommand::Edit { id, name, price } => {
            let change = admin
                .edit(&id, name.as_deref(), price.as_deref())
                .await?;
            print_change("Updated", &change, label, json)?;
        }
        MenuCommand::Delete { id } => {
            let change = admin.delete(&id).await?;
            print_change("Deleted", &change, label, json)?;
        }
    }

    Ok(())
}

async fn run_store(db: &Database, config: &AppConfig) -> AppResult<()> {
    let mut session = StoreSession::open(
        db.menu_items(),
        config.pricing_policy()?,
        config.receipt_layout(),
    )
    .await?;

    let today = chrono::Local::now().date_naive();
    let stdin = BufReader::new(tokio::io::stdin());
    store::run(&mut session, stdin, tokio::io::stdout(), today).await
}

fn print_change(verb: &str, change: &MenuChange, label: &str, json: bool) -> AppResult<()> {
    if json {
        return print_json(change);
    }

    println!(
        "{} {} ({})",
        verb,
        change.item.name,
        change.item.price().format_with(label)
    );
    println!();
    println!("{}", render_menu(&change.menu, label));
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
