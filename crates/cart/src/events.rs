//! Change notification for cart observers.
//!
//! A tab-local, synchronous pub/sub channel: the store emits one
//! [`CartEvent::Updated`] after every mutation that changed the persisted
//! collection, and observers re-read the cart rather than caching a stale
//! snapshot. Delivery happens within the mutating call; there is no queue
//! and no cross-process delivery (see
//! [`FileStorage`](crate::storage::FileStorage) for the multi-writer
//! caveat).

use core::fmt;

/// Events broadcast by the cart store.
///
/// Carries no payload: observers call
/// [`CartStore::lines`](crate::store::CartStore::lines) to get the current
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartEvent {
    /// The persisted collection changed.
    Updated,
}

/// Handle identifying a subscribed listener, for unsubscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(CartEvent)>;

/// Synchronous listener registry.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u64,
}

impl EventBus {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; returns a handle for [`Self::unsubscribe`].
    pub fn subscribe(&mut self, listener: impl FnMut(CartEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if the handle was already removed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Deliver `event` to every listener, in subscription order.
    pub fn emit(&mut self, event: CartEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_emit_reaches_all_listeners() {
        let mut bus = EventBus::new();
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));

        let counter = Rc::clone(&first);
        bus.subscribe(move |_| counter.set(counter.get() + 1));
        let counter = Rc::clone(&second);
        bus.subscribe(move |_| counter.set(counter.get() + 1));

        bus.emit(CartEvent::Updated);
        bus.emit(CartEvent::Updated);

        assert_eq!(first.get(), 2);
        assert_eq!(second.get(), 2);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let mut bus = EventBus::new();
        let calls = Rc::new(Cell::new(0));

        let counter = Rc::clone(&calls);
        let id = bus.subscribe(move |_| counter.set(counter.get() + 1));

        bus.emit(CartEvent::Updated);
        assert!(bus.unsubscribe(id));
        bus.emit(CartEvent::Updated);

        assert_eq!(calls.get(), 1);
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn test_unsubscribe_twice_is_false() {
        let mut bus = EventBus::new();
        let id = bus.subscribe(|_| {});
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
    }
}
