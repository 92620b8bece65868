use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypeError;

/// Largest magnitude at which every integer is exactly representable as `f64`.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Unit price of a product, in the storefront's currency unit.
///
/// Whole prices serialize as JSON integers (`5`) and fractional prices as
/// JSON floats (`12.5`), matching the representation a browser client sends.
/// Decoding is permissive so that a hand-edited cart file still loads;
/// [`Price::new`] is the validating constructor.
#[derive(Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Price(f64);

impl Price {
    /// The zero price.
    pub const ZERO: Price = Price(0.0);

    /// Create a price, rejecting `NaN`, infinities and negative values.
    pub fn new(value: f64) -> Result<Self, TypeError> {
        if !value.is_finite() {
            return Err(TypeError::NonFinitePrice(value));
        }
        if value < 0.0 {
            return Err(TypeError::NegativePrice(value));
        }
        // Normalize -0.0 so it serializes as `0`.
        Ok(Self(value + 0.0))
    }

    /// The price as a plain number.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Price of `quantity` units.
    pub fn times(self, quantity: u64) -> f64 {
        self.0 * quantity as f64
    }

    fn is_whole(self) -> bool {
        self.0.fract() == 0.0 && self.0.abs() < MAX_EXACT_INTEGER
    }
}

impl fmt::Debug for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Price({})", self.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl TryFrom<f64> for Price {
    type Error = TypeError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_whole() {
            serializer.serialize_i64(self.0 as i64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Price)
    }
}
