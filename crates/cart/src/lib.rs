//! Vanilla Grove Cart - the persisted shopping-cart subsystem.
//!
//! The cart is a single persisted collection of [`CartLine`] entries keyed
//! by product+variant identity. [`CartStore`] is the sole writer: it
//! enforces identity uniqueness, stock-bounded quantities, and removal of
//! non-positive quantities, persists the full collection after every
//! mutation, and broadcasts a change event so observers (a nav-bar badge,
//! a cart page) can re-read without sharing state.
//!
//! # Design
//!
//! - Persistence goes through the [`storage::CartStorage`] trait so tests
//!   and embedders can substitute an in-memory store for the file-backed
//!   one.
//! - Every mutation returns a [`store::CartMutation`] with an explicit
//!   [`store::CartOutcome`], so callers assert on outcomes instead of
//!   notification side effects.
//! - The two accepted add-to-cart input shapes (freshly fetched catalog
//!   product vs. previously serialized cart line) are normalized at the
//!   boundary by [`input::AddItem`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod error;
pub mod events;
pub mod input;
pub mod line;
pub mod storage;
pub mod store;

pub use error::CartError;
pub use events::{CartEvent, EventBus, ListenerId};
pub use input::{AddItem, NewLine, NormalizeError, VariantSelection};
pub use line::CartLine;
pub use storage::{CartStorage, FileStorage, MemoryStorage, StorageError};
pub use store::{CartMutation, CartOutcome, CartStore};
