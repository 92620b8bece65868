use serde::{Deserialize, Serialize};

use crate::price::Price;

/// One product's entry in the cart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product name; the unique key of the line within a cart.
    pub product: String,
    /// Unit price recorded when the product was first added.
    pub price: Price,
    /// Number of units, always at least 1 for a line that is in a cart.
    pub quantity: u64,
}

impl CartLine {
    /// A fresh line holding a single unit.
    pub fn new(product: impl Into<String>, price: Price) -> Self {
        Self {
            product: product.into(),
            price,
            quantity: 1,
        }
    }

    /// `price * quantity` for this line.
    pub fn subtotal(&self) -> f64 {
        self.price.times(self.quantity)
    }
}

/// What [`Cart::add_unit`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddOutcome {
    /// The product was already present; its quantity is now `quantity`.
    Merged { quantity: u64 },
    /// A new line with quantity 1 was appended.
    Appended,
}

/// What [`Cart::remove_unit`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// One unit was taken off; `quantity` units remain.
    Decremented { quantity: u64 },
    /// The last unit was taken off and the line removed.
    Removed,
    /// No line matched the product.
    Absent,
}

/// An ordered list of cart lines with at most one line per product.
///
/// Serializes as a bare JSON array, which is also the on-disk format.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart(Vec<CartLine>);

impl Cart {
    /// An empty cart.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.0
    }

    pub fn into_lines(self) -> Vec<CartLine> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The line for `product`, if present.
    pub fn find(&self, product: &str) -> Option<&CartLine> {
        self.0.iter().find(|line| line.product == product)
    }

    pub fn contains(&self, product: &str) -> bool {
        self.find(product).is_some()
    }

    /// Total number of units across all lines.
    pub fn total_quantity(&self) -> u64 {
        self.0
            .iter()
            .fold(0, |total, line| total.saturating_add(line.quantity))
    }

    /// Sum of `price * quantity` over all lines.
    pub fn total_price(&self) -> f64 {
        self.0.iter().map(CartLine::subtotal).sum()
    }

    /// Add one unit of `product`.
    ///
    /// An existing line keeps its recorded price; `price` is only used when a
    /// new line is appended. Quantities saturate at `u64::MAX`.
    pub fn add_unit(&mut self, product: &str, price: Price) -> AddOutcome {
        match self.0.iter_mut().find(|line| line.product == product) {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(1);
                AddOutcome::Merged {
                    quantity: line.quantity,
                }
            }
            None => {
                self.0.push(CartLine::new(product, price));
                AddOutcome::Appended
            }
        }
    }

    /// Restore the cart invariants on lines decoded from outside.
    ///
    /// Lines with a zero quantity or an invalid price are dropped. Repeated
    /// lines for one product are folded into the first, which keeps its price
    /// and gains their quantities. Returns how many lines went away.
    pub fn normalize(&mut self) -> usize {
        let before = self.0.len();
        let mut kept: Vec<CartLine> = Vec::with_capacity(before);
        for line in self.0.drain(..) {
            if line.quantity == 0 || Price::new(line.price.value()).is_err() {
                continue;
            }
            match kept.iter_mut().find(|k| k.product == line.product) {
                Some(first) => first.quantity = first.quantity.saturating_add(line.quantity),
                None => kept.push(line),
            }
        }
        self.0 = kept;
        before - self.0.len()
    }

    /// Take one unit of `product` off the cart, removing the line when its
    /// last unit goes.
    pub fn remove_unit(&mut self, product: &str) -> RemoveOutcome {
        let Some(index) = self.0.iter().position(|line| line.product == product) else {
            return RemoveOutcome::Absent;
        };
        let line = &mut self.0[index];
        if line.quantity > 1 {
            line.quantity -= 1;
            RemoveOutcome::Decremented {
                quantity: line.quantity,
            }
        } else {
            self.0.remove(index);
            RemoveOutcome::Removed
        }
    }
}

impl From<Vec<CartLine>> for Cart {
    fn from(lines: Vec<CartLine>) -> Self {
        Self(lines)
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartLine;
    type IntoIter = std::slice::Iter<'a, CartLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price(v: f64) -> Price {
        Price::new(v).unwrap()
    }

    #[test]
    fn empty_cart_serializes_as_empty_array() {
        assert_eq!(serde_json::to_string(&Cart::new()).unwrap(), "[]");
    }

    #[test]
    fn line_field_order_matches_storefront() {
        let cart = Cart::from(vec![CartLine::new("Aspirin", price(5.0))]);
        assert_eq!(
            serde_json::to_string(&cart).unwrap(),
            r#"[{"product":"Aspirin","price":5,"quantity":1}]"#
        );
    }

    #[test]
    fn add_merges_and_keeps_first_price() {
        let mut cart = Cart::new();
        assert_eq!(cart.add_unit("Aspirin", price(5.0)), AddOutcome::Appended);
        assert_eq!(
            cart.add_unit("Aspirin", price(9.0)),
            AddOutcome::Merged { quantity: 2 }
        );
        assert_eq!(cart.len(), 1);
        let line = cart.find("Aspirin").unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(line.price, price(5.0));
    }

    #[test]
    fn product_match_is_case_sensitive() {
        let mut cart = Cart::new();
        cart.add_unit("Aspirin", price(5.0));
        cart.add_unit("aspirin", price(5.0));
        assert_eq!(cart.len(), 2);
        assert!(!cart.contains("ASPIRIN"));
    }

    #[test]
    fn add_appends_in_order() {
        let mut cart = Cart::new();
        cart.add_unit("Paracetamol", price(20.0));
        cart.add_unit("Calpol", price(35.5));
        let names: Vec<&str> = cart.lines().iter().map(|l| l.product.as_str()).collect();
        assert_eq!(names, ["Paracetamol", "Calpol"]);
    }

    #[test]
    fn remove_decrements_then_removes() {
        let mut cart = Cart::new();
        cart.add_unit("Aspirin", price(5.0));
        cart.add_unit("Aspirin", price(5.0));
        assert_eq!(
            cart.remove_unit("Aspirin"),
            RemoveOutcome::Decremented { quantity: 1 }
        );
        assert_eq!(cart.remove_unit("Aspirin"), RemoveOutcome::Removed);
        assert!(cart.is_empty());
        assert_eq!(cart.remove_unit("Aspirin"), RemoveOutcome::Absent);
    }

    #[test]
    fn remove_absent_leaves_cart_untouched() {
        let mut cart = Cart::new();
        cart.add_unit("Cetirizine", price(15.0));
        let before = cart.clone();
        assert_eq!(cart.remove_unit("Aspirin"), RemoveOutcome::Absent);
        assert_eq!(cart, before);
    }

    #[test]
    fn totals() {
        let mut cart = Cart::new();
        cart.add_unit("Aspirin", price(5.0));
        cart.add_unit("Aspirin", price(5.0));
        cart.add_unit("Cough Syrup", price(42.5));
        assert_eq!(cart.total_quantity(), 3);
        assert_eq!(cart.total_price(), 52.5);
        assert_eq!(Cart::new().total_price(), 0.0);
    }

    #[test]
    fn decodes_storefront_file() {
        let json = r#"[
  {
    "product": "Paracip-500",
    "price": 30,
    "quantity": 3
  }
]"#;
        let cart: Cart = serde_json::from_str(json).unwrap();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 3);
        assert_eq!(cart.total_price(), 90.0);
    }

    #[test]
    fn decodes_quantity_beyond_u32() {
        let json = r#"[{"product":"Aspirin","price":5,"quantity":5000000000}]"#;
        let mut cart: Cart = serde_json::from_str(json).unwrap();
        assert_eq!(cart.total_quantity(), 5_000_000_000);
        assert_eq!(
            cart.add_unit("Aspirin", price(5.0)),
            AddOutcome::Merged { quantity: 5_000_000_001 }
        );
        assert_eq!(serde_json::to_string(&cart).unwrap(), json.replace("5000000000", "5000000001"));
    }

    #[test]
    fn normalize_folds_duplicates_and_drops_bad_lines() {
        let json = r#"[
  {"product": "Aspirin", "price": 5, "quantity": 2},
  {"product": "Calpol", "price": 35, "quantity": 0},
  {"product": "Aspirin", "price": 9, "quantity": 1},
  {"product": "Cetirizine", "price": -15, "quantity": 1},
  {"product": "Cough Syrup", "price": 42.5, "quantity": 1}
]"#;
        let mut cart: Cart = serde_json::from_str(json).unwrap();
        assert_eq!(cart.normalize(), 3);
        assert_eq!(
            cart.lines(),
            [
                CartLine { product: "Aspirin".into(), price: price(5.0), quantity: 3 },
                CartLine::new("Cough Syrup", price(42.5)),
            ]
        );
    }

    #[test]
    fn normalize_leaves_valid_cart_alone() {
        let mut cart = Cart::new();
        cart.add_unit("Aspirin", price(5.0));
        cart.add_unit("Calpol", price(0.0));
        let before = cart.clone();
        assert_eq!(cart.normalize(), 0);
        assert_eq!(cart, before);
    }
}
