//! HTTP server for the Pharmacure storefront.
//!
//! Exposes the cart over three JSON endpoints and, optionally, serves the
//! storefront's static pages from a directory:
//!
//! | Method | Path | Body | Success |
//! |---|---|---|---|
//! | `GET` | `/get-cart` | none | `200`, cart array |
//! | `POST` | `/add-to-cart` | `{product, price}` | `200`, updated cart |
//! | `POST` | `/remove-from-cart` | `{product}` | `200`, updated cart |
//!
//! Missing or invalid input answers `400`; a failed cart write answers `500`.
//! Both carry a `{"error": ..., "details": ...}` body.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ErrorBody, ServerError, ServerResult};
pub use handler::{AddToCartRequest, AppState, HealthResponse, RemoveFromCartRequest};
pub use router::{build_router, endpoints};
pub use server::CartServer;
