//! Cart error types.
//!
//! Most misuse (unknown identities, over-quantity, corrupt persisted state)
//! is absorbed into safe outcomes rather than errors; see
//! [`crate::store::CartOutcome`]. The variants here are the conditions with
//! no safe local recovery.

use thiserror::Error;

use crate::input::NormalizeError;
use crate::storage::StorageError;

/// Errors surfaced by cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The persistence substrate failed; the mutation was not saved.
    #[error("cart storage error: {0}")]
    Storage(#[from] StorageError),

    /// The cart collection could not be serialized for persistence.
    #[error("cart serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The add-to-cart input could not be normalized into a cart line.
    #[error("invalid cart item: {0}")]
    Input(#[from] NormalizeError),
}
