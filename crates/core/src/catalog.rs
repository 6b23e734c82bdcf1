//! Product and variant records as served by the REST backend.
//!
//! These types mirror the JSON documents the backend returns (camelCase
//! fields, Mongo-style `_id`). They are read-side records: the storefront
//! never writes them back.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// Per-currency price tags on a product or variant.
///
/// The backend carries an explicit tag per supported currency plus a legacy
/// generic `price` field from before multi-currency support. Resolution
/// order is handled by [`crate::pricing`]; this struct only captures the raw
/// document shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTags {
    /// Price in Sri Lankan rupees.
    #[serde(
        rename = "priceInLKR",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub price_in_lkr: Option<Decimal>,
    /// Price in US dollars.
    #[serde(
        rename = "priceInUSD",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub price_in_usd: Option<Decimal>,
    /// Legacy single-currency price, kept as a fallback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
}

/// A named sub-option of a product (e.g. a pack size) with its own price
/// and stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    /// Display label, unique within the parent product (e.g. "250g").
    pub label: String,
    /// Price tags for this variant.
    #[serde(flatten)]
    pub prices: PriceTags,
    /// Units in stock; `None` means the backend did not report a limit.
    #[serde(default)]
    pub stock: Option<u32>,
    /// Descriptive weight, display-only.
    #[serde(default)]
    pub weight: Option<String>,
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Backend identifier.
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Routing key used in product URLs.
    pub slug: String,
    /// Thumbnail URL.
    #[serde(default)]
    pub image: Option<String>,
    /// Descriptive weight for variant-less products, display-only.
    #[serde(default)]
    pub weight: Option<String>,
    /// Units in stock for the base product; `None` means no known limit.
    #[serde(default)]
    pub stock: Option<u32>,
    /// Price tags for the base product.
    #[serde(flatten)]
    pub prices: PriceTags,
    /// Variants, empty for single-option products.
    #[serde(default)]
    pub variants: Vec<Variant>,
}

impl Product {
    /// Whether this product is sold in variants.
    #[must_use]
    pub fn has_variants(&self) -> bool {
        !self.variants.is_empty()
    }

    /// Find a variant by its label.
    #[must_use]
    pub fn variant(&self, label: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.label == label)
    }
}
