use std::sync::{Mutex, PoisonError};

use pharmacure_store::CartStore;
use pharmacure_types::{AddOutcome, Cart, RemoveOutcome};
use tracing::debug;

use crate::error::ServiceResult;
use crate::validation::{validate_price, validate_product};

/// Cart operations over a single store.
///
/// `add_item` and `remove_item` each run their load-mutate-save sequence
/// under a per-service write guard, so mutations against one store are
/// applied strictly one after another. `get_cart` takes no lock.
///
/// Writers in other processes sharing the same backing file are not
/// coordinated with.
pub struct CartService<S> {
    store: S,
    write_guard: Mutex<()>,
}

impl<S: CartStore> CartService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_guard: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The current cart, exactly as the store returns it.
    pub fn get_cart(&self) -> Cart {
        self.store.load()
    }

    /// Add one unit of `product` and return the updated cart.
    ///
    /// `price` is recorded only when the product is new to the cart.
    pub fn add_item(&self, product: &str, price: f64) -> ServiceResult<Cart> {
        validate_product(product)?;
        let price = validate_price(price)?;

        self.mutate(|cart| match cart.add_unit(product, price) {
            AddOutcome::Merged { quantity } => {
                debug!(product, quantity, "merged into existing cart line");
            }
            AddOutcome::Appended => {
                debug!(product, %price, "appended cart line");
            }
        })
    }

    /// Take one unit of `product` off the cart and return the updated cart.
    ///
    /// Removing a product that is not in the cart is not an error; the cart
    /// is persisted and returned unchanged.
    pub fn remove_item(&self, product: &str) -> ServiceResult<Cart> {
        validate_product(product)?;

        self.mutate(|cart| match cart.remove_unit(product) {
            RemoveOutcome::Decremented { quantity } => {
                debug!(product, quantity, "decremented cart line");
            }
            RemoveOutcome::Removed => debug!(product, "removed cart line"),
            RemoveOutcome::Absent => debug!(product, "product not in cart; nothing to remove"),
        })
    }

    fn mutate(&self, apply: impl FnOnce(&mut Cart)) -> ServiceResult<Cart> {
        let _guard = self
            .write_guard
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut cart = self.store.load();
        apply(&mut cart);
        self.store.save(&cart)?;
        debug!(lines = cart.len(), items = cart.total_quantity(), "cart persisted");
        Ok(cart)
    }
}

impl<S: std::fmt::Debug> std::fmt::Debug for CartService<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartService")
            .field("store", &self.store)
            .finish()
    }
}
