//! CLI command implementations.

pub mod cart;
pub mod price;

use std::fs;
use std::path::Path;

use vanilla_grove_core::catalog::Product;

/// Errors shared by commands that load a product document from disk.
#[derive(Debug, thiserror::Error)]
pub enum ProductFileError {
    /// The file could not be read.
    #[error("Could not read product file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a valid product document.
    #[error("Could not parse product file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Load a backend product document from a JSON file.
pub(crate) fn load_product(path: &Path) -> Result<Product, ProductFileError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
