//! Multi-currency unit-price resolution.
//!
//! The backend tags products and variants with per-currency prices plus a
//! legacy generic `price` field. Resolution prefers the tag for the selected
//! currency and falls back to the legacy field. "No price" is a distinct
//! outcome from "price is zero": callers must render it as an unavailability
//! state (disabled add-to-cart), never as a zero amount.

use rust_decimal::Decimal;

use crate::catalog::{PriceTags, Product};
use crate::types::Currency;

/// The displayed price of a product in a selected currency.
///
/// Products with variants display the min/max across variants that have a
/// resolvable price; the range collapses to a single value when all priced
/// variants agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductPrice {
    /// A single unit price.
    Single(Decimal),
    /// The spread across priced variants.
    Range {
        /// Cheapest priced variant.
        min: Decimal,
        /// Most expensive priced variant.
        max: Decimal,
    },
    /// No price is available in the selected currency.
    Unavailable,
}

impl ProductPrice {
    /// Whether any price resolved.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        !matches!(self, Self::Unavailable)
    }
}

/// A tag is only usable when it carries a positive amount; zero or negative
/// tags are treated as unset.
fn usable(price: Option<Decimal>) -> Option<Decimal> {
    price.filter(|p| p > &Decimal::ZERO)
}

/// Resolve the unit price of a priceable entity in the selected currency.
///
/// Prefers the currency-specific tag, then the legacy generic `price`
/// field. Returns `None` when neither yields a positive amount.
#[must_use]
pub fn resolve_unit_price(tags: &PriceTags, currency: Currency) -> Option<Decimal> {
    let tagged = match currency {
        Currency::Lkr => tags.price_in_lkr,
        Currency::Usd => tags.price_in_usd,
    };
    usable(tagged).or_else(|| usable(tags.price))
}

/// Resolve the displayed price of a product in the selected currency.
///
/// For products with variants this is the range across variants with a
/// resolvable price; without variants, the product's own tags.
#[must_use]
pub fn product_price(product: &Product, currency: Currency) -> ProductPrice {
    if !product.has_variants() {
        return resolve_unit_price(&product.prices, currency)
            .map_or(ProductPrice::Unavailable, ProductPrice::Single);
    }

    let mut min: Option<Decimal> = None;
    let mut max: Option<Decimal> = None;
    for variant in &product.variants {
        if let Some(price) = resolve_unit_price(&variant.prices, currency) {
            min = Some(min.map_or(price, |m| m.min(price)));
            max = Some(max.map_or(price, |m| m.max(price)));
        }
    }

    match (min, max) {
        (Some(min), Some(max)) if min == max => ProductPrice::Single(min),
        (Some(min), Some(max)) => ProductPrice::Range { min, max },
        _ => ProductPrice::Unavailable,
    }
}
