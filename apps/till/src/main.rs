//! # CafeControl Till Entry Point
//!
//! ```text
//! cafe menu list
//! cafe menu add --name "Masala Dosa" --price 120.50
//! cafe menu edit <id> --price 130
//! cafe menu delete <id>
//! cafe store
//! cafe config
//! ```

use clap::Parser;

use cafe_till::cli::Cli;
use cafe_till::error::AppError;

#[tokio::main]
async fn main() {
    cafe_till::init_tracing();

    let cli = Cli::parse();
    let json = cli.json;

    if let Err(err) = cafe_till::run(cli).await {
        report(&err, json);
        std::process::exit(1);
    }
}

fn report(err: &AppError, json: bool) {
    if json {
        if let Ok(text) = serde_json::to_string(err) {
            eprintln!("{}", text);
            return;
        }
    }
    eprintln!("error: {}", err);
}
