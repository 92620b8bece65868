//! Client cart controller for the Pharmacure storefront.
//!
//! [`CartClient`] talks to the cart endpoints and keeps the last cart the
//! server returned in a [`CartCache`]. The cache has a single update rule:
//! every successful response replaces it wholesale. Totals are always
//! recomputed from the cached cart, never accumulated from deltas.

pub mod cache;
pub mod client;
pub mod error;

pub use cache::CartCache;
pub use client::CartClient;
pub use error::{ClientError, ClientResult};
