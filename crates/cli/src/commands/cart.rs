//! Cart management commands.
//!
//! # Usage
//!
//! ```bash
//! # Show the persisted cart
//! vg-cli cart show
//!
//! # Add two jars of the 250g variant, priced in USD
//! vg-cli cart add product.json -v 250g -q 2 -c USD
//! ```
//!
//! # Environment Variables
//!
//! - `VANILLA_GROVE_DATA_DIR` - Directory cart state is persisted under

use std::path::Path;

use thiserror::Error;
use vanilla_grove_cart::{
    AddItem, CartError, CartMutation, CartOutcome, CartStore, FileStorage, NormalizeError,
    StorageError,
};
use vanilla_grove_core::{Currency, ProductId};

use super::{ProductFileError, load_product};
use crate::config::CliConfig;

/// Errors that can occur during cart commands.
#[derive(Debug, Error)]
pub enum CartCommandError {
    /// The persisted cart could not be opened or written.
    #[error("Cart storage error: {0}")]
    Storage(#[from] StorageError),

    /// A cart operation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// The product document could not be turned into a cart item.
    #[error("Invalid item: {0}")]
    Item(#[from] NormalizeError),

    /// The product document could not be loaded.
    #[error(transparent)]
    ProductFile(#[from] ProductFileError),
}

fn open_store(config: &CliConfig) -> Result<CartStore<FileStorage>, CartCommandError> {
    Ok(CartStore::new(FileStorage::open(&config.data_dir)?))
}

/// Print the cart contents and totals.
pub fn show(config: &CliConfig) -> Result<(), CartCommandError> {
    let mut store = open_store(config)?;
    let lines = store.lines();

    if lines.is_empty() {
        tracing::info!("Cart is empty");
        return Ok(());
    }

    for line in &lines {
        tracing::info!(
            "{} x{} @ {} = {}",
            line.display_name(),
            line.quantity,
            line.price,
            line.line_total()
        );
    }
    tracing::info!(
        "{} line(s), {} unit(s), subtotal {}",
        store.line_count(),
        store.total_quantity(),
        store.subtotal()
    );
    Ok(())
}

/// Add a product (optionally a specific variant) to the cart.
pub fn add(
    config: &CliConfig,
    file: &Path,
    variant: Option<&str>,
    quantity: Option<i64>,
    currency: Option<Currency>,
) -> Result<(), CartCommandError> {
    let product = load_product(file)?;
    let currency = currency.unwrap_or(config.currency);
    let item = AddItem::from_catalog(&product, variant, currency)?;

    let mut store = open_store(config)?;
    let mutation = store.add(&item, quantity)?;
    report(&mutation);
    Ok(())
}

/// Set a line's quantity directly.
pub fn update(
    config: &CliConfig,
    product_id: &str,
    quantity: i64,
    variant: Option<&str>,
) -> Result<(), CartCommandError> {
    let mut store = open_store(config)?;
    let mutation = store.update_quantity(&ProductId::new(product_id), quantity, variant)?;
    report(&mutation);
    Ok(())
}

/// Remove a line from the cart.
pub fn remove(
    config: &CliConfig,
    product_id: &str,
    variant: Option<&str>,
) -> Result<(), CartCommandError> {
    let mut store = open_store(config)?;
    let mutation = store.remove(&ProductId::new(product_id), variant)?;
    report(&mutation);
    Ok(())
}

/// Empty the cart.
pub fn clear(config: &CliConfig) -> Result<(), CartCommandError> {
    let mut store = open_store(config)?;
    store.clear()?;
    tracing::info!("Cart emptied");
    Ok(())
}

/// Describe a mutation outcome the way the storefront's toasts do.
fn report(mutation: &CartMutation) {
    let subject = mutation.item.as_deref().unwrap_or("item");
    match mutation.outcome {
        CartOutcome::Added => tracing::info!("{subject} added to cart"),
        CartOutcome::Updated { quantity } => {
            tracing::info!("{subject} quantity updated to {quantity}");
        }
        CartOutcome::Clamped { limit } => {
            tracing::warn!("Only {limit} in stock; {subject} set to the maximum");
        }
        CartOutcome::Removed => tracing::info!("{subject} removed from cart"),
        CartOutcome::OutOfStock => tracing::warn!("{subject} is out of stock"),
        CartOutcome::NoOp => tracing::info!("Nothing to change"),
    }
}
