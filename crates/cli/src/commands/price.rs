//! Price inspection command.
//!
//! # Usage
//!
//! ```bash
//! # Product-level price (a range when variants differ)
//! vg-cli price product.json --currency USD
//!
//! # Price of one variant
//! vg-cli price product.json --variant 250g
//! ```

use std::path::Path;

use thiserror::Error;
use vanilla_grove_core::Currency;
use vanilla_grove_core::pricing::{ProductPrice, product_price, resolve_unit_price};

use super::{ProductFileError, load_product};
use crate::config::CliConfig;

/// Errors that can occur during price resolution.
#[derive(Debug, Error)]
pub enum PriceCommandError {
    /// The product document could not be loaded.
    #[error(transparent)]
    ProductFile(#[from] ProductFileError),

    /// The requested variant label does not exist on the product.
    #[error("Product has no variant labeled \"{0}\"")]
    UnknownVariant(String),
}

/// Resolve and print a product's (or one variant's) display price.
pub fn resolve(
    config: &CliConfig,
    file: &Path,
    variant: Option<&str>,
    currency: Option<Currency>,
) -> Result<(), PriceCommandError> {
    let product = load_product(file)?;
    let currency = currency.unwrap_or(config.currency);
    let symbol = currency.symbol();

    match variant {
        Some(label) => {
            let variant = product
                .variant(label)
                .ok_or_else(|| PriceCommandError::UnknownVariant(label.to_owned()))?;
            match resolve_unit_price(&variant.prices, currency) {
                Some(price) => {
                    tracing::info!("{} ({label}): {symbol}{price}", product.name);
                }
                None => tracing::warn!(
                    "{} ({label}): no price available in {currency}",
                    product.name
                ),
            }
        }
        None => match product_price(&product, currency) {
            ProductPrice::Single(price) => {
                tracing::info!("{}: {symbol}{price}", product.name);
            }
            ProductPrice::Range { min, max } => {
                tracing::info!("{}: {symbol}{min} - {symbol}{max}", product.name);
            }
            ProductPrice::Unavailable => {
                tracing::warn!("{}: no price available in {currency}", product.name);
            }
        },
    }
    Ok(())
}
