//! Vanilla Grove CLI - cart management and price inspection tools.
//!
//! # Usage
//!
//! ```bash
//! # Show the persisted cart
//! vg-cli cart show
//!
//! # Add a product (from a saved backend document) to the cart
//! vg-cli cart add product.json --variant 250g --quantity 2
//!
//! # Set a line's quantity, remove a line, empty the cart
//! vg-cli cart update <product-id> 3 --variant 250g
//! vg-cli cart remove <product-id> --variant 250g
//! vg-cli cart clear
//!
//! # Resolve a product's display price
//! vg-cli price product.json --currency USD
//! ```
//!
//! # Commands
//!
//! - `cart` - Inspect and mutate the persisted cart
//! - `price` - Resolve a product's display price in a currency

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use vanilla_grove_core::Currency;

mod commands;
mod config;

use config::CliConfig;

#[derive(Parser)]
#[command(name = "vg-cli")]
#[command(author, version, about = "Vanilla Grove CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and mutate the persisted cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Resolve a product's display price
    Price {
        /// Path to a product JSON document
        file: PathBuf,

        /// Variant label to price instead of the whole product
        #[arg(short, long)]
        variant: Option<String>,

        /// Currency to resolve in (defaults to `VANILLA_GROVE_CURRENCY`)
        #[arg(short, long)]
        currency: Option<Currency>,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Print the cart contents and totals
    Show,
    /// Add a product to the cart
    Add {
        /// Path to a product JSON document
        file: PathBuf,

        /// Variant label to add
        #[arg(short, long)]
        variant: Option<String>,

        /// Quantity to add (negative values decrement)
        #[arg(short, long, allow_negative_numbers = true)]
        quantity: Option<i64>,

        /// Currency the unit price is resolved in
        #[arg(short, long)]
        currency: Option<Currency>,
    },
    /// Set a line's quantity (0 removes the line)
    Update {
        /// Product id of the line
        product_id: String,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,

        /// Variant label of the line
        #[arg(short, long)]
        variant: Option<String>,
    },
    /// Remove a line from the cart
    Remove {
        /// Product id of the line
        product_id: String,

        /// Variant label of the line
        #[arg(short, long)]
        variant: Option<String>,
    },
    /// Empty the cart
    Clear,
}

fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::from_env()?;

    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&config)?,
            CartAction::Add {
                file,
                variant,
                quantity,
                currency,
            } => commands::cart::add(&config, &file, variant.as_deref(), quantity, currency)?,
            CartAction::Update {
                product_id,
                quantity,
                variant,
            } => commands::cart::update(&config, &product_id, quantity, variant.as_deref())?,
            CartAction::Remove {
                product_id,
                variant,
            } => commands::cart::remove(&config, &product_id, variant.as_deref())?,
            CartAction::Clear => commands::cart::clear(&config)?,
        },
        Commands::Price {
            file,
            variant,
            currency,
        } => commands::price::resolve(&config, &file, variant.as_deref(), currency)?,
    }
    Ok(())
}
