//! Coffee Shop CLI - inspect and drive the persisted cart and orders widgets.
//!
//! # Usage
//!
//! ```bash
//! # Print the persisted cart
//! coffee-cli show cart
//!
//! # Print the persisted orders list
//! coffee-cli show orders
//!
//! # Add a menu item to the orders list
//! coffee-cli add-order Latte '$4.50'
//!
//! # Confirm and clear the orders list
//! coffee-cli checkout
//! ```
//!
//! All commands read and write the same data directory as the storefront
//! (`COFFEE_DATA_DIR`, default `data`), unless `--data-dir` is given.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "coffee-cli")]
#[command(author, version, about = "Coffee shop CLI tools")]
struct Cli {
    /// Directory holding persisted widget state
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a widget's persisted line items and totals
    Show {
        #[command(subcommand)]
        target: ShowTarget,
    },
    /// Add one unit of a menu item to the orders list
    AddOrder {
        /// Menu item name
        name: String,

        /// Price label, e.g. "$4.50"
        price: String,
    },
    /// Confirm the orders list and clear it
    Checkout,
}

#[derive(Subcommand)]
enum ShowTarget {
    /// Show the product cart
    Cart,
    /// Show the orders list
    Orders,
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let storage = commands::open_storage(cli.data_dir)?;

    match cli.command {
        Commands::Show { target } => match target {
            ShowTarget::Cart => commands::show::cart(storage),
            ShowTarget::Orders => commands::show::orders(storage),
        },
        Commands::AddOrder { name, price } => {
            commands::orders::add(storage, &name, &price)?;
        }
        Commands::Checkout => commands::orders::checkout(storage)?,
    }
    Ok(())
}
