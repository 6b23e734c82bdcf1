//! Integration tests for Vanilla Grove.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p vanilla-grove-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_flow` - End-to-end cart scenarios over file-backed storage
//! - `cart_persistence` - Reload, recovery, and multi-writer behavior
//!
//! The tests drive the public [`vanilla_grove_cart::CartStore`] API against
//! the real [`vanilla_grove_cart::FileStorage`] substrate in temporary
//! directories; nothing is mocked.

#![cfg_attr(not(test), forbid(unsafe_code))]
