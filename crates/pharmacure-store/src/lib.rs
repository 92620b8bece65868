//! Cart persistence for the Pharmacure storefront.
//!
//! A cart is stored as a whole: every load reads the full record and every
//! save overwrites it. There is no partial update and no versioning.
//!
//! # Storage Backends
//!
//! All backends implement the [`CartStore`] trait:
//!
//! - [`JsonFileCartStore`] -- a single pretty-printed JSON file, replaced atomically
//! - [`InMemoryCartStore`] -- `RwLock`-guarded cart for tests and embedding
//!
//! # Design Rules
//!
//! 1. A missing or unreadable record loads as an empty cart; read failures
//!    never reach the caller.
//! 2. Write failures are always propagated.
//! 3. A reader never observes a partially written record.
//! 4. Stores do not serialize read-modify-write sequences; callers that
//!    mutate must hold their own write guard.

pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use file::JsonFileCartStore;
pub use memory::InMemoryCartStore;
pub use traits::CartStore;
