//! The cart store: sole writer of the persisted cart collection.

use rust_decimal::Decimal;
use vanilla_grove_core::ProductId;

use crate::error::CartError;
use crate::events::{CartEvent, EventBus, ListenerId};
use crate::input::AddItem;
use crate::line::CartLine;
use crate::storage::CartStorage;

/// Storage key the collection is persisted under.
pub const DEFAULT_STORAGE_KEY: &str = "cart";

/// What a mutation did to the collection.
///
/// Misuse (exceeding stock, unknown identities, non-positive quantities)
/// degrades to a safe outcome rather than an error; callers branch on this
/// instead of a notification side channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOutcome {
    /// A new line was appended.
    Added,
    /// An existing line's quantity was set.
    Updated {
        /// The quantity now stored.
        quantity: u32,
    },
    /// The requested quantity exceeded the stock bound and was reduced.
    Clamped {
        /// The stock bound the quantity was reduced to.
        limit: u32,
    },
    /// The line was removed.
    Removed,
    /// The item's stock snapshot is zero; nothing was stored.
    OutOfStock,
    /// Nothing matched; the collection is unchanged.
    NoOp,
}

/// Result of a mutating cart operation.
#[derive(Debug, Clone)]
pub struct CartMutation {
    /// What happened.
    pub outcome: CartOutcome,
    /// Display name of the affected line (name plus parenthesized variant
    /// label), absent for no-ops.
    pub item: Option<String>,
    /// The collection after the mutation.
    pub lines: Vec<CartLine>,
}

/// Outcome of bounding a requested quantity against a stock snapshot.
enum Bounded {
    Allowed(u32),
    Clamped(u32),
    Blocked,
}

/// `requested` must be positive. `None` stock means no limit; a zero stock
/// snapshot blocks the line entirely rather than acting as "unlimited".
fn bound_quantity(requested: i64, stock: Option<u32>) -> Bounded {
    let requested = u32::try_from(requested).unwrap_or(u32::MAX);
    match stock {
        Some(0) => Bounded::Blocked,
        Some(limit) if requested > limit => Bounded::Clamped(limit),
        _ => Bounded::Allowed(requested),
    }
}

/// The authoritative, persisted cart for the current user.
///
/// Owns its persistence substrate and a tab-local [`EventBus`]; every
/// mutation that changes the collection rewrites the whole persisted
/// document and then emits [`CartEvent::Updated`]. Observers re-read via
/// [`Self::lines`] instead of caching snapshots.
#[derive(Debug)]
pub struct CartStore<S: CartStorage> {
    storage: S,
    key: String,
    events: EventBus,
}

impl<S: CartStorage> CartStore<S> {
    /// Create a store persisting under [`DEFAULT_STORAGE_KEY`].
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    /// Create a store persisting under a custom key.
    #[must_use]
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            events: EventBus::new(),
        }
    }

    /// Consume the store, returning its storage substrate.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Subscribe to change notifications.
    pub fn on_update(&mut self, listener: impl FnMut(CartEvent) + 'static) -> ListenerId {
        self.events.subscribe(listener)
    }

    /// Drop a change-notification subscription.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Current collection.
    ///
    /// Initializes persistence to an empty collection when no value exists
    /// yet. Persisted data that fails to parse as a line array is treated
    /// as corrupted: the condition is logged and persistence is reset to
    /// empty. Never fails.
    pub fn lines(&mut self) -> Vec<CartLine> {
        match self.storage.read(&self.key) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<CartLine>>(&raw) {
                Ok(lines) => lines,
                Err(err) => {
                    tracing::warn!(key = %self.key, error = %err, "discarding unreadable cart state");
                    self.reset_to_empty();
                    Vec::new()
                }
            },
            Ok(None) => {
                self.reset_to_empty();
                Vec::new()
            }
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "cart storage read failed");
                Vec::new()
            }
        }
    }

    /// Add an item, accumulating quantity into an existing line with the
    /// same `(product, variant)` identity.
    ///
    /// `quantity` falls back to the item's own quantity field, then 1. A
    /// negative quantity decrements; an accumulated quantity of zero or
    /// less removes the line. Quantities above a positive stock snapshot
    /// clamp to it; a zero stock snapshot refuses the add.
    ///
    /// # Errors
    ///
    /// Fails when the item cannot be normalized into a line or the
    /// substrate write fails.
    pub fn add(&mut self, item: &AddItem, quantity: Option<i64>) -> Result<CartMutation, CartError> {
        let seed = item.normalize()?;
        let delta = quantity.unwrap_or_else(|| i64::from(seed.quantity));
        let mut lines = self.lines();

        let existing = lines.iter().enumerate().find_map(|(index, line)| {
            line.matches(&seed.product_id, seed.variant_label.as_deref())
                .then(|| (index, line.quantity, line.stock, line.display_name()))
        });

        let (outcome, subject) = match existing {
            Some((index, current, stock, subject)) => {
                let requested = i64::from(current) + delta;
                if requested <= 0 {
                    lines.remove(index);
                    (CartOutcome::Removed, Some(subject))
                } else {
                    match bound_quantity(requested, stock) {
                        Bounded::Blocked => {
                            lines.remove(index);
                            (CartOutcome::OutOfStock, Some(subject))
                        }
                        Bounded::Clamped(limit) => {
                            set_quantity(&mut lines, index, limit);
                            (CartOutcome::Clamped { limit }, Some(subject))
                        }
                        Bounded::Allowed(quantity) => {
                            set_quantity(&mut lines, index, quantity);
                            (CartOutcome::Updated { quantity }, Some(subject))
                        }
                    }
                }
            }
            None if delta <= 0 => (CartOutcome::NoOp, None),
            None => {
                let subject = seed.display_name();
                match bound_quantity(delta, seed.stock) {
                    Bounded::Blocked => (CartOutcome::OutOfStock, Some(subject)),
                    Bounded::Clamped(limit) => {
                        lines.push(seed.into_line(limit));
                        (CartOutcome::Clamped { limit }, Some(subject))
                    }
                    Bounded::Allowed(quantity) => {
                        lines.push(seed.into_line(quantity));
                        (CartOutcome::Added, Some(subject))
                    }
                }
            }
        };

        self.commit(outcome, subject, lines)
    }

    /// Set a line's quantity directly (not additive).
    ///
    /// A quantity of zero or less removes the line; a quantity above a
    /// positive stock snapshot clamps to it. An unknown identity is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Fails when the substrate write fails.
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
        variant_label: Option<&str>,
    ) -> Result<CartMutation, CartError> {
        if quantity <= 0 {
            return self.remove(product_id, variant_label);
        }

        let mut lines = self.lines();
        let existing = lines.iter().enumerate().find_map(|(index, line)| {
            line.matches(product_id, variant_label)
                .then(|| (index, line.stock, line.display_name()))
        });

        let Some((index, stock, subject)) = existing else {
            return Ok(CartMutation {
                outcome: CartOutcome::NoOp,
                item: None,
                lines,
            });
        };

        let outcome = match bound_quantity(quantity, stock) {
            Bounded::Blocked => {
                lines.remove(index);
                CartOutcome::OutOfStock
            }
            Bounded::Clamped(limit) => {
                set_quantity(&mut lines, index, limit);
                CartOutcome::Clamped { limit }
            }
            Bounded::Allowed(quantity) => {
                set_quantity(&mut lines, index, quantity);
                CartOutcome::Updated { quantity }
            }
        };

        self.commit(outcome, Some(subject), lines)
    }

    /// Remove the line with the given identity, if present.
    ///
    /// # Errors
    ///
    /// Fails when the substrate write fails.
    pub fn remove(
        &mut self,
        product_id: &ProductId,
        variant_label: Option<&str>,
    ) -> Result<CartMutation, CartError> {
        let mut lines = self.lines();
        let position = lines
            .iter()
            .position(|line| line.matches(product_id, variant_label));

        let Some(index) = position else {
            return Ok(CartMutation {
                outcome: CartOutcome::NoOp,
                item: None,
                lines,
            });
        };

        let removed = lines.remove(index);
        self.commit(CartOutcome::Removed, Some(removed.display_name()), lines)
    }

    /// Clear the whole collection.
    ///
    /// # Errors
    ///
    /// Fails when the substrate write fails.
    pub fn clear(&mut self) -> Result<(), CartError> {
        self.persist(&[])?;
        self.events.emit(CartEvent::Updated);
        Ok(())
    }

    /// Sum of `price × quantity` over all lines.
    pub fn subtotal(&mut self) -> Decimal {
        self.lines().iter().map(CartLine::line_total).sum()
    }

    /// Number of distinct lines (not units).
    pub fn line_count(&mut self) -> usize {
        self.lines().len()
    }

    /// Sum of quantities over all lines (total units).
    pub fn total_quantity(&mut self) -> u64 {
        self.lines().iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Whether a line with the given identity exists.
    pub fn contains(&mut self, product_id: &ProductId, variant_label: Option<&str>) -> bool {
        self.lines()
            .iter()
            .any(|line| line.matches(product_id, variant_label))
    }

    /// Quantity of the matching line, or 0 when absent.
    pub fn quantity_of(&mut self, product_id: &ProductId, variant_label: Option<&str>) -> u32 {
        self.lines()
            .iter()
            .find(|line| line.matches(product_id, variant_label))
            .map_or(0, |line| line.quantity)
    }

    /// Persist the collection and notify, unless nothing changed.
    fn commit(
        &mut self,
        outcome: CartOutcome,
        item: Option<String>,
        lines: Vec<CartLine>,
    ) -> Result<CartMutation, CartError> {
        if outcome != CartOutcome::NoOp {
            self.persist(&lines)?;
            self.events.emit(CartEvent::Updated);
        }
        Ok(CartMutation {
            outcome,
            item,
            lines,
        })
    }

    fn persist(&mut self, lines: &[CartLine]) -> Result<(), CartError> {
        let raw = serde_json::to_string(lines)?;
        self.storage.write(&self.key, &raw)?;
        Ok(())
    }

    /// `lines` never fails, so a failing initialization write is logged and
    /// the empty collection is served from memory.
    fn reset_to_empty(&mut self) {
        if let Err(err) = self.storage.write(&self.key, "[]") {
            tracing::warn!(key = %self.key, error = %err, "cart storage write failed");
        }
    }
}

fn set_quantity(lines: &mut [CartLine], index: usize, quantity: u32) {
    if let Some(line) = lines.get_mut(index) {
        line.quantity = quantity;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use crate::input::VariantSelection;
    use crate::storage::MemoryStorage;

    use super::*;

    fn store() -> CartStore<MemoryStorage> {
        CartStore::new(MemoryStorage::new())
    }

    fn extract(stock: Option<u32>) -> AddItem {
        AddItem {
            product_id: ProductId::new("p1"),
            name: "Vanilla Extract".to_owned(),
            slug: "vanilla-extract".to_owned(),
            image: None,
            price: Some(Decimal::from(1000)),
            stock,
            weight: None,
            variant_label: None,
            variant: None,
            quantity: Some(1),
        }
    }

    fn extract_250g() -> AddItem {
        AddItem {
            variant: Some(VariantSelection {
                label: "250g".to_owned(),
                price: Some(Decimal::from(2000)),
                stock: Some(3),
                weight: Some("250g".to_owned()),
            }),
            ..extract(Some(5))
        }
    }

    #[test]
    fn test_first_add_creates_line() {
        let mut store = store();
        let mutation = store.add(&extract(Some(5)), None).unwrap();

        assert_eq!(mutation.outcome, CartOutcome::Added);
        assert_eq!(mutation.item.as_deref(), Some("Vanilla Extract"));

        let lines = store.lines();
        assert_eq!(lines.len(), 1);
        let line = lines.first().unwrap();
        assert_eq!(line.product_id, ProductId::new("p1"));
        assert_eq!(line.variant_label, None);
        assert_eq!(line.quantity, 1);
        assert_eq!(line.price, Decimal::from(1000));
        assert_eq!(line.stock, Some(5));
    }

    #[test]
    fn test_quantity_accumulates() {
        let mut store = store();
        store.add(&extract(Some(5)), None).unwrap();
        let mutation = store.add(&extract(Some(5)), Some(3)).unwrap();

        assert_eq!(mutation.outcome, CartOutcome::Updated { quantity: 4 });
        assert_eq!(store.line_count(), 1);
        assert_eq!(store.quantity_of(&ProductId::new("p1"), None), 4);
    }

    #[test]
    fn test_accumulated_quantity_clamps_to_stock() {
        let mut store = store();
        store.add(&extract(Some(5)), None).unwrap();
        store.add(&extract(Some(5)), Some(3)).unwrap();
        let mutation = store.add(&extract(Some(5)), Some(10)).unwrap();

        assert_eq!(mutation.outcome, CartOutcome::Clamped { limit: 5 });
        assert_eq!(store.quantity_of(&ProductId::new("p1"), None), 5);
    }

    #[test]
    fn test_fresh_add_clamps_to_stock() {
        let mut store = store();
        let mutation = store.add(&extract(Some(5)), Some(10)).unwrap();

        assert_eq!(mutation.outcome, CartOutcome::Clamped { limit: 5 });
        assert_eq!(store.quantity_of(&ProductId::new("p1"), None), 5);
    }

    #[test]
    fn test_no_stock_snapshot_means_no_clamp() {
        let mut store = store();
        let mutation = store.add(&extract(None), Some(10_000)).unwrap();

        assert_eq!(mutation.outcome, CartOutcome::Added);
        assert_eq!(store.quantity_of(&ProductId::new("p1"), None), 10_000);
    }

    #[test]
    fn test_zero_stock_refuses_add() {
        let mut store = store();
        let mutation = store.add(&extract(Some(0)), None).unwrap();

        assert_eq!(mutation.outcome, CartOutcome::OutOfStock);
        assert_eq!(store.line_count(), 0);
    }

    #[test]
    fn test_variant_and_base_are_distinct_lines() {
        let mut store = store();
        store.add(&extract(Some(5)), None).unwrap();
        store.add(&extract_250g(), None).unwrap();

        let lines = store.lines();
        assert_eq!(lines.len(), 2);
        assert!(store.contains(&ProductId::new("p1"), None));
        assert!(store.contains(&ProductId::new("p1"), Some("250g")));

        let variant = lines.iter().find(|l| l.variant_label.is_some()).unwrap();
        assert_eq!(variant.price, Decimal::from(2000));
        assert_eq!(variant.stock, Some(3));
    }

    #[test]
    fn test_identity_never_duplicates() {
        let mut store = store();
        for _ in 0..4 {
            store.add(&extract(None), None).unwrap();
            store.add(&extract_250g(), None).unwrap();
        }

        let lines = store.lines();
        assert_eq!(lines.len(), 2);
        for line in &lines {
            let duplicates = lines
                .iter()
                .filter(|other| {
                    line.matches(&other.product_id, other.variant_label.as_deref())
                })
                .count();
            assert_eq!(duplicates, 1);
        }
    }

    #[test]
    fn test_negative_add_decrements_and_removes() {
        let mut store = store();
        store.add(&extract(None), Some(3)).unwrap();

        let mutation = store.add(&extract(None), Some(-1)).unwrap();
        assert_eq!(mutation.outcome, CartOutcome::Updated { quantity: 2 });

        let mutation = store.add(&extract(None), Some(-5)).unwrap();
        assert_eq!(mutation.outcome, CartOutcome::Removed);
        assert_eq!(store.line_count(), 0);
    }

    #[test]
    fn test_negative_add_on_absent_line_is_noop() {
        let mut store = store();
        let mutation = store.add(&extract(None), Some(-2)).unwrap();

        assert_eq!(mutation.outcome, CartOutcome::NoOp);
        assert_eq!(mutation.item, None);
        assert_eq!(store.line_count(), 0);
    }

    #[test]
    fn test_update_quantity_sets_directly() {
        let mut store = store();
        store.add(&extract(Some(5)), Some(2)).unwrap();

        let mutation = store
            .update_quantity(&ProductId::new("p1"), 4, None)
            .unwrap();
        assert_eq!(mutation.outcome, CartOutcome::Updated { quantity: 4 });
        assert_eq!(store.quantity_of(&ProductId::new("p1"), None), 4);
    }

    #[test]
    fn test_update_quantity_clamps() {
        let mut store = store();
        store.add(&extract(Some(5)), None).unwrap();

        let mutation = store
            .update_quantity(&ProductId::new("p1"), 9, None)
            .unwrap();
        assert_eq!(mutation.outcome, CartOutcome::Clamped { limit: 5 });
        assert_eq!(store.quantity_of(&ProductId::new("p1"), None), 5);
    }

    #[test]
    fn test_update_to_zero_or_negative_removes() {
        let mut store = store();
        store.add(&extract(None), None).unwrap();
        store.add(&extract_250g(), None).unwrap();

        let mutation = store
            .update_quantity(&ProductId::new("p1"), 0, None)
            .unwrap();
        assert_eq!(mutation.outcome, CartOutcome::Removed);
        // The variant line is unaffected.
        assert!(store.contains(&ProductId::new("p1"), Some("250g")));
        assert!(!store.contains(&ProductId::new("p1"), None));

        let mutation = store
            .update_quantity(&ProductId::new("p1"), -3, Some("250g"))
            .unwrap();
        assert_eq!(mutation.outcome, CartOutcome::Removed);
        assert_eq!(store.line_count(), 0);
    }

    #[test]
    fn test_update_unknown_identity_is_noop() {
        let mut store = store();
        store.add(&extract(None), None).unwrap();

        let mutation = store
            .update_quantity(&ProductId::new("ghost"), 2, None)
            .unwrap();
        assert_eq!(mutation.outcome, CartOutcome::NoOp);
        assert_eq!(mutation.lines.len(), 1);
    }

    #[test]
    fn test_remove_reports_display_name() {
        let mut store = store();
        store.add(&extract_250g(), None).unwrap();

        let mutation = store
            .remove(&ProductId::new("p1"), Some("250g"))
            .unwrap();
        assert_eq!(mutation.outcome, CartOutcome::Removed);
        assert_eq!(mutation.item.as_deref(), Some("Vanilla Extract (250g)"));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut store = store();
        let mutation = store.remove(&ProductId::new("ghost"), None).unwrap();
        assert_eq!(mutation.outcome, CartOutcome::NoOp);
        assert_eq!(mutation.item, None);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut store = store();
        store.add(&extract(None), Some(2)).unwrap();
        store.add(&extract_250g(), None).unwrap();

        store.clear().unwrap();
        assert_eq!(store.lines(), Vec::new());
        assert_eq!(store.subtotal(), Decimal::ZERO);
        assert_eq!(store.line_count(), 0);

        store.clear().unwrap();
        assert_eq!(store.lines(), Vec::new());
    }

    #[test]
    fn test_corrupt_state_recovers_to_empty() {
        let mut storage = MemoryStorage::new();
        storage.write("cart", "definitely not json").unwrap();
        let mut store = CartStore::new(storage);

        assert_eq!(store.lines(), Vec::new());
        // Recovery is stable: persistence was reset, not just ignored.
        assert_eq!(store.lines(), Vec::new());

        let raw = store.into_storage().read("cart").unwrap().unwrap();
        assert_eq!(raw, "[]");
    }

    #[test]
    fn test_non_array_json_recovers_to_empty() {
        let mut storage = MemoryStorage::new();
        storage.write("cart", "{\"productId\":\"p1\"}").unwrap();
        let mut store = CartStore::new(storage);

        assert_eq!(store.lines(), Vec::new());
        assert_eq!(store.lines(), Vec::new());
    }

    #[test]
    fn test_first_read_initializes_persistence() {
        let mut store = store();
        assert_eq!(store.lines(), Vec::new());

        let raw = store.into_storage().read("cart").unwrap().unwrap();
        assert_eq!(raw, "[]");
    }

    #[test]
    fn test_events_fire_once_per_effective_mutation() {
        let mut store = store();
        let updates = Rc::new(Cell::new(0));
        let counter = Rc::clone(&updates);
        store.on_update(move |_| counter.set(counter.get() + 1));

        store.add(&extract(Some(5)), None).unwrap(); // 1
        store.add(&extract(Some(5)), Some(2)).unwrap(); // 2
        store
            .update_quantity(&ProductId::new("p1"), 1, None)
            .unwrap(); // 3
        store.remove(&ProductId::new("p1"), None).unwrap(); // 4
        store.clear().unwrap(); // 5

        // No-ops stay silent.
        store.remove(&ProductId::new("ghost"), None).unwrap();
        store
            .update_quantity(&ProductId::new("ghost"), 2, None)
            .unwrap();

        assert_eq!(updates.get(), 5);
    }

    #[test]
    fn test_unsubscribed_listener_is_silent() {
        let mut store = store();
        let updates = Rc::new(Cell::new(0));
        let counter = Rc::clone(&updates);
        let id = store.on_update(move |_| counter.set(counter.get() + 1));

        store.add(&extract(None), None).unwrap();
        assert!(store.unsubscribe(id));
        store.add(&extract(None), None).unwrap();

        assert_eq!(updates.get(), 1);
    }

    #[test]
    fn test_totals() {
        let mut store = store();
        store.add(&extract(None), Some(2)).unwrap(); // 2 × 1000
        store.add(&extract_250g(), None).unwrap(); // 1 × 2000

        assert_eq!(store.subtotal(), Decimal::from(4000));
        assert_eq!(store.line_count(), 2);
        assert_eq!(store.total_quantity(), 3);
    }

    #[test]
    fn test_custom_storage_key() {
        let mut store = CartStore::with_key(MemoryStorage::new(), "wishlist");
        store.add(&extract(None), None).unwrap();

        let storage = store.into_storage();
        assert!(storage.read("wishlist").unwrap().is_some());
        assert_eq!(storage.read("cart").unwrap(), None);
    }
}
