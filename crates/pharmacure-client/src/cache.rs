use pharmacure_types::{Cart, CartLine};

/// Local copy of the last cart the server returned.
///
/// The only way to change the cached cart is [`CartCache::replace`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CartCache {
    cart: Cart,
}

impl CartCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in an authoritative cart received from the server.
    pub fn replace(&mut self, cart: Cart) {
        self.cart = cart;
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Line items for rendering, in cart order.
    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    /// Sum of quantities, shown as the cart badge count.
    pub fn total_items(&self) -> u64 {
        self.cart.total_quantity()
    }

    /// Sum of `price * quantity` over all lines.
    pub fn total_price(&self) -> f64 {
        self.cart.total_price()
    }

    /// Whether `product` has a line, i.e. whether its remove button shows.
    pub fn contains(&self, product: &str) -> bool {
        self.cart.contains(product)
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pharmacure_types::Price;

    fn cart(lines: &[(&str, f64, u64)]) -> Cart {
        Cart::from(
            lines
                .iter()
                .map(|(product, price, quantity)| CartLine {
                    product: product.to_string(),
                    price: Price::new(*price).unwrap(),
                    quantity: *quantity,
                })
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn starts_empty() {
        let cache = CartCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.total_items(), 0);
        assert_eq!(cache.total_price(), 0.0);
    }

    #[test]
    fn replace_is_wholesale() {
        let mut cache = CartCache::new();
        cache.replace(cart(&[("Aspirin", 5.0, 2), ("Calpol", 35.0, 1)]));
        cache.replace(cart(&[("Calpol", 35.0, 1)]));
        assert_eq!(cache.lines().len(), 1);
        assert!(!cache.contains("Aspirin"));
        assert!(cache.contains("Calpol"));
    }

    #[test]
    fn totals_follow_the_cached_cart() {
        let mut cache = CartCache::new();
        cache.replace(cart(&[("Aspirin", 5.0, 2), ("Cough Syrup", 42.5, 3)]));
        assert_eq!(cache.total_items(), 5);
        assert_eq!(cache.total_price(), 137.5);

        cache.replace(cart(&[("Cough Syrup", 42.5, 1)]));
        assert_eq!(cache.total_items(), 1);
        assert_eq!(cache.total_price(), 42.5);
    }
}
