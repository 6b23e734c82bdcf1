//! Add-to-cart input normalization.
//!
//! Two shapes reach the add operation: a freshly fetched catalog product
//! (Mongo `_id`, optional nested `variant` selection) and a previously
//! serialized cart line being re-added (flat `productId`/`variantLabel`
//! fields). [`AddItem`] accepts both and [`AddItem::normalize`] maps them
//! into one canonical [`NewLine`] before any cart logic runs.
//!
//! Precedence rule: variant-scoped fields (`variant.label`, `variant.price`,
//! `variant.stock`, `variant.weight`) win over the item-level fields when
//! the nested selection is present; each field falls back independently.

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use vanilla_grove_core::catalog::Product;
use vanilla_grove_core::pricing::resolve_unit_price;
use vanilla_grove_core::{Currency, ProductId};

use crate::line::CartLine;

/// Errors raised while normalizing an [`AddItem`].
#[derive(Debug, Clone, Error)]
pub enum NormalizeError {
    /// Neither the variant selection nor the item carries a unit price.
    ///
    /// An unpriced item must surface as unavailable, never as a zero
    /// price; the storefront disables add-to-cart for these.
    #[error("item \"{name}\" has no unit price")]
    MissingPrice {
        /// Display name of the offending item.
        name: String,
    },

    /// The item has an empty product id.
    #[error("item has an empty product id")]
    EmptyProductId,

    /// The requested variant label does not exist on the product.
    #[error("product has no variant labeled \"{0}\"")]
    UnknownVariant(String),
}

/// Nested variant selection on a freshly fetched product.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantSelection {
    /// Variant label; becomes the line's `variant_label`.
    pub label: String,
    /// Unit price for this variant.
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Stock for this variant.
    #[serde(default)]
    pub stock: Option<u32>,
    /// Descriptive weight for this variant.
    #[serde(default)]
    pub weight: Option<String>,
}

/// Raw add-to-cart input, tolerant of both accepted schemas.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItem {
    /// Product id; `_id` on fresh catalog documents.
    #[serde(alias = "_id")]
    pub product_id: ProductId,
    /// Display name; `productName` in the legacy schema.
    #[serde(alias = "productName")]
    pub name: String,
    /// Product routing key.
    pub slug: String,
    /// Thumbnail URL.
    #[serde(default)]
    pub image: Option<String>,
    /// Item-level unit price.
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Item-level stock.
    #[serde(default)]
    pub stock: Option<u32>,
    /// Item-level descriptive weight.
    #[serde(default)]
    pub weight: Option<String>,
    /// Flat variant label from a re-added cart line.
    #[serde(default)]
    pub variant_label: Option<String>,
    /// Nested variant selection from a fresh product.
    #[serde(default)]
    pub variant: Option<VariantSelection>,
    /// Default quantity when the caller does not pass one explicitly.
    #[serde(default)]
    pub quantity: Option<u32>,
}

impl AddItem {
    /// Build an [`AddItem`] from a catalog product, resolving the unit
    /// price in the selected currency.
    ///
    /// # Errors
    ///
    /// Returns [`NormalizeError::UnknownVariant`] when `variant_label` does
    /// not name a variant of the product. An unresolvable price is not an
    /// error here; it surfaces from [`Self::normalize`].
    pub fn from_catalog(
        product: &Product,
        variant_label: Option<&str>,
        currency: Currency,
    ) -> Result<Self, NormalizeError> {
        let variant = match variant_label {
            Some(label) => {
                let variant = product
                    .variant(label)
                    .ok_or_else(|| NormalizeError::UnknownVariant(label.to_owned()))?;
                Some(VariantSelection {
                    label: variant.label.clone(),
                    price: resolve_unit_price(&variant.prices, currency),
                    stock: variant.stock,
                    weight: variant.weight.clone(),
                })
            }
            None => None,
        };

        Ok(Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            slug: product.slug.clone(),
            image: product.image.clone(),
            price: resolve_unit_price(&product.prices, currency),
            stock: product.stock,
            weight: product.weight.clone(),
            variant_label: None,
            variant,
            quantity: None,
        })
    }

    /// Map this input into the canonical [`NewLine`].
    ///
    /// # Errors
    ///
    /// Returns an error when the product id is empty or no unit price is
    /// present after applying the variant precedence rule.
    pub fn normalize(&self) -> Result<NewLine, NormalizeError> {
        if self.product_id.as_str().is_empty() {
            return Err(NormalizeError::EmptyProductId);
        }

        let (variant_label, price, stock, weight) = match &self.variant {
            Some(selection) => (
                Some(selection.label.clone()),
                selection.price.or(self.price),
                selection.stock.or(self.stock),
                selection.weight.clone().or_else(|| self.weight.clone()),
            ),
            None => (
                self.variant_label.clone(),
                self.price,
                self.stock,
                self.weight.clone(),
            ),
        };

        let price = price.ok_or_else(|| NormalizeError::MissingPrice {
            name: self.name.clone(),
        })?;

        Ok(NewLine {
            product_id: self.product_id.clone(),
            variant_label,
            name: self.name.clone(),
            slug: self.slug.clone(),
            image: self.image.clone(),
            price,
            stock,
            weight,
            // Zero is falsy in the legacy schema; it means "unspecified".
            quantity: self.quantity.filter(|q| *q > 0).unwrap_or(1),
        })
    }
}

impl From<&CartLine> for AddItem {
    /// The re-add path: a previously serialized cart line as input.
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product_id.clone(),
            name: line.name.clone(),
            slug: line.slug.clone(),
            image: line.image.clone(),
            price: Some(line.price),
            stock: line.stock,
            weight: line.weight.clone(),
            variant_label: line.variant_label.clone(),
            variant: None,
            quantity: Some(line.quantity),
        }
    }
}

/// Canonical add-to-cart request after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLine {
    /// Parent product.
    pub product_id: ProductId,
    /// Variant label, or `None` for the base product.
    pub variant_label: Option<String>,
    /// Display name.
    pub name: String,
    /// Product routing key.
    pub slug: String,
    /// Thumbnail URL.
    pub image: Option<String>,
    /// Resolved unit price.
    pub price: Decimal,
    /// Stock bound; `None` means no known limit.
    pub stock: Option<u32>,
    /// Descriptive weight.
    pub weight: Option<String>,
    /// Quantity to add when the caller passes none.
    pub quantity: u32,
}

impl NewLine {
    /// Name shown in notifications: the product name, with the variant
    /// label in parentheses when present.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.variant_label.as_ref().map_or_else(
            || self.name.clone(),
            |label| format!("{} ({label})", self.name),
        )
    }

    /// Materialize a cart line with the given quantity.
    #[must_use]
    pub fn into_line(self, quantity: u32) -> CartLine {
        CartLine {
            product_id: self.product_id,
            variant_label: self.variant_label,
            name: self.name,
            price: self.price,
            image: self.image,
            slug: self.slug,
            stock: self.stock,
            weight: self.weight,
            quantity,
        }
    }
}
