use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::handler::{self, AppState};

/// HTTP endpoint paths. These are fixed by the storefront's browser script.
pub mod endpoints {
    pub const GET_CART: &str = "/get-cart";
    pub const ADD_TO_CART: &str = "/add-to-cart";
    pub const REMOVE_FROM_CART: &str = "/remove-from-cart";
    pub const HEALTH: &str = "/health";
}

/// Build the axum router with the cart endpoints and, when configured, the
/// static asset fallback.
pub fn build_router(config: &ServerConfig, state: AppState) -> Router {
    let mut router = Router::new()
        .route(endpoints::GET_CART, get(handler::get_cart_handler))
        .route(endpoints::ADD_TO_CART, post(handler::add_to_cart_handler))
        .route(
            endpoints::REMOVE_FROM_CART,
            post(handler::remove_from_cart_handler),
        )
        .route(endpoints::HEALTH, get(handler::health_handler));

    if let Some(dir) = &config.static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
