use pharmacure_types::Cart;

use crate::error::StoreResult;

/// Durable home of a single cart.
///
/// All implementations must satisfy these invariants:
/// - `load` never fails. A record that does not exist, cannot be read, or
///   cannot be decoded is reported as an empty cart.
/// - `load` returns a cart that holds the data-model invariants. Duplicate
///   lines are folded and lines with a zero quantity or an invalid price are
///   dropped, see [`Cart::normalize`].
/// - `save` replaces the whole record. After a successful `save`, `load`
///   returns an equal cart.
/// - A concurrent `load` sees either the previous or the new record, never a
///   mix of both.
/// - Write errors are propagated, never silently ignored.
pub trait CartStore: Send + Sync {
    /// Read the current cart.
    fn load(&self) -> Cart;

    /// Overwrite the stored cart with `cart`.
    fn save(&self, cart: &Cart) -> StoreResult<()>;
}

impl<S: CartStore + ?Sized> CartStore for std::sync::Arc<S> {
    fn load(&self) -> Cart {
        (**self).load()
    }

    fn save(&self, cart: &Cart) -> StoreResult<()> {
        (**self).save(cart)
    }
}
