use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

use pharmacure_types::Cart;

use crate::error::{StoreError, StoreResult};
use crate::traits::CartStore;

/// In-memory cart store.
///
/// Intended for tests and embedding. The cart is held behind a `RwLock` and
/// cloned on load/save. The store can be flipped read-only to simulate an
/// unwritable medium.
pub struct InMemoryCartStore {
    cart: RwLock<Cart>,
    read_only: AtomicBool,
    saves: AtomicUsize,
}

impl InMemoryCartStore {
    /// Create a new store holding an empty cart.
    pub fn new() -> Self {
        Self::with_cart(Cart::new())
    }

    /// Create a store pre-seeded with `cart`, normalized.
    pub fn with_cart(mut cart: Cart) -> Self {
        cart.normalize();
        Self {
            cart: RwLock::new(cart),
            read_only: AtomicBool::new(false),
            saves: AtomicUsize::new(0),
        }
    }

    /// Reject (or accept again) subsequent saves.
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl Default for InMemoryCartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStore for InMemoryCartStore {
    fn load(&self) -> Cart {
        self.cart.read().expect("lock poisoned").clone()
    }

    fn save(&self, cart: &Cart) -> StoreResult<()> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(StoreError::ReadOnly);
        }
        *self.cart.write().expect("lock poisoned") = cart.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl std::fmt::Debug for InMemoryCartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lines = self.cart.read().expect("lock poisoned").len();
        f.debug_struct("InMemoryCartStore")
            .field("lines", &lines)
            .field("read_only", &self.read_only.load(Ordering::SeqCst))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pharmacure_types::{CartLine, Price};

    #[test]
    fn seeded_cart_is_normalized() {
        let five = Price::new(5.0).unwrap();
        let store = InMemoryCartStore::with_cart(Cart::from(vec![
            CartLine::new("Aspirin", five),
            CartLine::new("Aspirin", five),
        ]));
        let cart = store.load();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn starts_empty() {
        let store = InMemoryCartStore::new();
        assert!(store.load().is_empty());
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn save_replaces_cart() {
        let store = InMemoryCartStore::new();
        let mut cart = Cart::new();
        cart.add_unit("Calpol", Price::new(35.0).unwrap());
        store.save(&cart).unwrap();
        assert_eq!(store.load(), cart);
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn load_returns_a_copy() {
        let store = InMemoryCartStore::new();
        let mut cart = store.load();
        cart.add_unit("Calpol", Price::new(35.0).unwrap());
        assert!(store.load().is_empty());
    }

    #[test]
    fn read_only_rejects_saves() {
        let store = InMemoryCartStore::new();
        store.set_read_only(true);
        let err = store.save(&Cart::new()).unwrap_err();
        assert!(matches!(err, StoreError::ReadOnly));
        assert_eq!(store.save_count(), 0);

        store.set_read_only(false);
        store.save(&Cart::new()).unwrap();
    }

    #[test]
    fn arc_store_delegates() {
        let store = std::sync::Arc::new(InMemoryCartStore::new());
        let mut cart = Cart::new();
        cart.add_unit("Aspirin", Price::new(5.0).unwrap());
        CartStore::save(&store, &cart).unwrap();
        assert_eq!(store.load(), cart);
    }
}
