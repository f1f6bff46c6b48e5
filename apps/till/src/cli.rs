//! Command-line definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cafe")]
#[command(about = "CafeControl till: menu admin and store screen", version, long_about = None)]
pub struct Cli {
    /// Config file (default: cafe.toml in the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Menu administration
    #[command(arg_required_else_help = true)]
    Menu(MenuArgs),
    /// Interactive store screen (reads commands from stdin)
    Store,
    /// Print the effective configuration as TOML
    Config,
}

#[derive(Debug, Args)]
pub struct MenuArgs {
    #[command(subcommand)]
    pub command: MenuCommand,
}

#[derive(Debug, Subcommand)]
pub enum MenuCommand {
    /// List all menu items
    List,
    /// Add a menu item
    #[command(arg_required_else_help = true)]
    Add {
        #[arg(long, help = "Item name", value_name = "NAME")]
        name: String,
        #[arg(long, help = "Price, e.g. 120.50", value_name = "PRICE", allow_hyphen_values = true)]
        price: String,
    },
    /// Change the name and/or price of a menu item
    #[command(arg_required_else_help = true)]
    Edit {
        #[arg(help = "Menu item id", value_name = "ID")]
        id: String,
        #[arg(long, help = "New name", value_name = "NAME")]
        name: Option<String>,
        #[arg(long, help = "New price", value_name = "PRICE", allow_hyphen_values = true)]
        price: Option<String>,
    },
    /// Delete a menu item
    #[command(arg_required_else_help = true)]
    Delete {
        #[arg(help = "Menu item id", value_name = "ID")]
        id: String,
    },
}
