use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use pharmacure_types::Cart;

use crate::cache::CartCache;
use crate::error::{ClientError, ClientResult};

const GET_CART: &str = "/get-cart";
const ADD_TO_CART: &str = "/add-to-cart";
const REMOVE_FROM_CART: &str = "/remove-from-cart";

#[derive(Serialize)]
struct AddToCart<'a> {
    product: &'a str,
    price: f64,
}

#[derive(Serialize)]
struct RemoveFromCart<'a> {
    product: &'a str,
}

#[derive(Deserialize)]
struct ErrorPayload {
    error: String,
    #[serde(default)]
    details: Option<String>,
}

/// Blocking client for the cart endpoints.
///
/// Every successful call replaces the cache with the cart in the response.
/// A failed call leaves the cache as it was.
pub struct CartClient {
    base_url: String,
    agent: ureq::Agent,
    cache: CartCache,
}

impl CartClient {
    /// Client for a server at `base_url`, e.g. `http://127.0.0.1:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();
        Self::with_agent(base_url, agent)
    }

    pub fn with_agent(base_url: impl Into<String>, agent: ureq::Agent) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            agent,
            cache: CartCache::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn cache(&self) -> &CartCache {
        &self.cache
    }

    /// Re-read the cart from the server.
    pub fn fetch(&mut self) -> ClientResult<&CartCache> {
        let url = self.url(GET_CART);
        let response = self
            .agent
            .get(&url)
            .set("Accept", "application/json")
            .call();
        self.accept(response)
    }

    /// Add one unit of `product` at `price`.
    pub fn add(&mut self, product: &str, price: f64) -> ClientResult<&CartCache> {
        let response = self.post(ADD_TO_CART, &AddToCart { product, price })?;
        self.accept(response)
    }

    /// Take one unit of `product` off the cart.
    pub fn remove(&mut self, product: &str) -> ClientResult<&CartCache> {
        let response = self.post(REMOVE_FROM_CART, &RemoveFromCart { product })?;
        self.accept(response)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn post<T: Serialize>(
        &self,
        path: &str,
        body: &T,
    ) -> ClientResult<Result<ureq::Response, ureq::Error>> {
        let payload = serde_json::to_string(body).map_err(|e| ClientError::Encode(e.to_string()))?;
        Ok(self
            .agent
            .post(&self.url(path))
            .set("Accept", "application/json")
            .set("Content-Type", "application/json")
            .send_string(&payload))
    }

    fn accept(
        &mut self,
        response: Result<ureq::Response, ureq::Error>,
    ) -> ClientResult<&CartCache> {
        let cart = match response {
            Ok(resp) => resp
                .into_json::<Cart>()
                .map_err(|e| ClientError::Decode(e.to_string()))?,
            Err(ureq::Error::Status(code, resp)) => return Err(parse_error_response(code, resp)),
            Err(ureq::Error::Transport(err)) => {
                return Err(ClientError::Transport(err.to_string()))
            }
        };
        debug!(lines = cart.len(), items = cart.total_quantity(), "cart cache replaced");
        self.cache.replace(cart);
        Ok(&self.cache)
    }
}

fn parse_error_response(status: u16, response: ureq::Response) -> ClientError {
    let body = response.into_string().unwrap_or_default();
    let message = match serde_json::from_str::<ErrorPayload>(&body) {
        Ok(ErrorPayload {
            error,
            details: Some(details),
        }) => format!("{error} ({details})"),
        Ok(ErrorPayload { error, .. }) => error,
        Err(_) => format!("remote error status {status}"),
    };
    ClientError::Status { status, message }
}
