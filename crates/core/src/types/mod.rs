//! Core types for Vanilla Grove.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod currency;
pub mod id;

pub use currency::{Currency, CurrencyError};
pub use id::ProductId;
