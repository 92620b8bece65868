use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use pharmacure_service::{CartService, ServiceError, ValidationError};
use pharmacure_store::CartStore;
use pharmacure_types::Cart;

use crate::error::{ServerError, ServerResult};

/// Service shared by all handlers.
pub type SharedCartService = Arc<CartService<Arc<dyn CartStore>>>;

#[derive(Clone)]
pub struct AppState {
    pub service: SharedCartService,
}

impl AppState {
    pub fn new(store: Arc<dyn CartStore>) -> Self {
        Self {
            service: Arc::new(CartService::new(store)),
        }
    }

    /// Run a blocking cart operation off the async executor.
    async fn run<T, F>(&self, op: F) -> ServerResult<T>
    where
        F: FnOnce(&CartService<Arc<dyn CartStore>>) -> T + Send + 'static,
        T: Send + 'static,
    {
        let service = Arc::clone(&self.service);
        tokio::task::spawn_blocking(move || op(&service))
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

const ADD_REQUIRED: &str = "Product and price are required";
const ADD_INVALID: &str = "Invalid price";
const ADD_FAILED: &str = "Failed to add item to cart";
const REMOVE_REQUIRED: &str = "Product is required";
const REMOVE_FAILED: &str = "Failed to remove item from cart";

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AddToCartRequest {
    pub product: Option<String>,
    pub price: Option<f64>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RemoveFromCartRequest {
    pub product: Option<String>,
}

/// Health check response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".into(),
            version: env!("CARGO_PKG_VERSION").into(),
        }
    }
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// `GET /get-cart`
pub async fn get_cart_handler(State(state): State<AppState>) -> ServerResult<Json<Cart>> {
    let cart = state.run(|service| service.get_cart()).await?;
    Ok(Json(cart))
}

/// `POST /add-to-cart` with `{product, price}`
pub async fn add_to_cart_handler(
    State(state): State<AppState>,
    payload: Result<Json<AddToCartRequest>, JsonRejection>,
) -> ServerResult<Json<Cart>> {
    let Json(request) = payload.map_err(|e| ServerError::bad_request_with(ADD_REQUIRED, e.body_text()))?;
    let (Some(product), Some(price)) = (request.product, request.price) else {
        return Err(ServerError::bad_request(ADD_REQUIRED));
    };

    let cart = state
        .run(move |service| service.add_item(&product, price))
        .await?
        .map_err(|e| {
            let invalid = match e {
                ServiceError::Validation(ValidationError::EmptyProduct) => ADD_REQUIRED,
                _ => ADD_INVALID,
            };
            ServerError::from_service(e, invalid, ADD_FAILED)
        })?;
    Ok(Json(cart))
}

/// `POST /remove-from-cart` with `{product}`
pub async fn remove_from_cart_handler(
    State(state): State<AppState>,
    payload: Result<Json<RemoveFromCartRequest>, JsonRejection>,
) -> ServerResult<Json<Cart>> {
    let Json(request) =
        payload.map_err(|e| ServerError::bad_request_with(REMOVE_REQUIRED, e.body_text()))?;
    let Some(product) = request.product else {
        return Err(ServerError::bad_request(REMOVE_REQUIRED));
    };

    let cart = state
        .run(move |service| service.remove_item(&product))
        .await?
        .map_err(|e| ServerError::from_service(e, REMOVE_REQUIRED, REMOVE_FAILED))?;
    Ok(Json(cart))
}
