//! Cart data model for the Pharmacure storefront.
//!
//! Every other Pharmacure crate depends on `pharmacure-types`. The types here
//! define the persisted and wire representation of a shopping cart: a JSON
//! array of `{product, price, quantity}` objects.
//!
//! # Key Types
//!
//! - [`Price`]: Non-negative unit price that serializes whole values as JSON integers
//! - [`CartLine`]: One product's entry in the cart
//! - [`Cart`]: Ordered lines, at most one per product name
//!
//! # Invariants
//!
//! 1. Product names are compared case-sensitively and exactly.
//! 2. Adding a product that is already present increments its quantity and
//!    keeps the price recorded by the first add.
//! 3. A line whose quantity would drop to zero is removed from the cart.
//! 4. Decoding does not enforce one line per product, positive quantities or
//!    valid prices; [`Cart::normalize`] restores them.

pub mod cart;
pub mod error;
pub mod price;

pub use cart::{AddOutcome, Cart, CartLine, RemoveOutcome};
pub use error::TypeError;
pub use price::Price;
