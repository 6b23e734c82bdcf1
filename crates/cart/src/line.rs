//! The persisted cart line.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use vanilla_grove_core::ProductId;

/// One entry in the persisted cart collection.
///
/// Catalog fields (`name`, `price`, `image`, `slug`, `stock`, `weight`) are
/// denormalized at add time so the cart renders without re-fetching the
/// product. Identity is the `(product_id, variant_label)` pair; a `None`
/// label (the base product) and a labeled variant of the same product are
/// distinct lines.
///
/// Serializes with camelCase field names, matching the document shape the
/// storefront has always persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Parent product.
    pub product_id: ProductId,
    /// Variant label, or `None` for the base product.
    #[serde(default)]
    pub variant_label: Option<String>,
    /// Display name, denormalized at add time.
    pub name: String,
    /// Unit price in whatever currency was active when added.
    pub price: Decimal,
    /// Thumbnail URL.
    #[serde(default)]
    pub image: Option<String>,
    /// Product routing key.
    pub slug: String,
    /// Stock snapshot at add time; `None` means no known limit.
    #[serde(default)]
    pub stock: Option<u32>,
    /// Descriptive weight, display-only.
    #[serde(default)]
    pub weight: Option<String>,
    /// Units requested; always at least 1 for a stored line.
    pub quantity: u32,
}

impl CartLine {
    /// Whether this line has the given identity.
    #[must_use]
    pub fn matches(&self, product_id: &ProductId, variant_label: Option<&str>) -> bool {
        self.product_id == *product_id && self.variant_label.as_deref() == variant_label
    }

    /// Name shown in notifications: the product name, with the variant
    /// label in parentheses when present.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.variant_label.as_ref().map_or_else(
            || self.name.clone(),
            |label| format!("{} ({label})", self.name),
        )
    }

    /// `price × quantity` for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn line(variant_label: Option<&str>) -> CartLine {
        CartLine {
            product_id: ProductId::new("p1"),
            variant_label: variant_label.map(str::to_owned),
            name: "Vanilla Extract".to_owned(),
            price: Decimal::from(1000),
            image: None,
            slug: "vanilla-extract".to_owned(),
            stock: Some(5),
            weight: None,
            quantity: 2,
        }
    }

    #[test]
    fn test_matches_distinguishes_variant_labels() {
        let base = line(None);
        let variant = line(Some("250g"));
        let id = ProductId::new("p1");

        assert!(base.matches(&id, None));
        assert!(!base.matches(&id, Some("250g")));
        assert!(variant.matches(&id, Some("250g")));
        assert!(!variant.matches(&id, None));
        assert!(!base.matches(&ProductId::new("p2"), None));
    }

    #[test]
    fn test_display_name_includes_variant() {
        assert_eq!(line(None).display_name(), "Vanilla Extract");
        assert_eq!(line(Some("250g")).display_name(), "Vanilla Extract (250g)");
    }

    #[test]
    fn test_line_total() {
        assert_eq!(line(None).line_total(), Decimal::from(2000));
    }

    #[test]
    fn test_persisted_shape_is_camel_case() {
        let json = serde_json::to_value(line(Some("250g"))).unwrap();
        assert_eq!(json["productId"], "p1");
        assert_eq!(json["variantLabel"], "250g");
        assert_eq!(json["quantity"], 2);
    }
}
