//! Input checks for cart operations.
//!
//! Product names:
//! - Must be non-empty
//! - Must not consist solely of whitespace
//!
//! Prices:
//! - Must be finite
//! - Must not be negative (zero is allowed)

use pharmacure_types::Price;

use crate::error::ValidationError;

/// Validate a product name, returning `Ok(())` if it can key a cart line.
///
/// The name is not trimmed or normalized; lines match on the exact string.
pub fn validate_product(product: &str) -> Result<(), ValidationError> {
    if product.trim().is_empty() {
        return Err(ValidationError::EmptyProduct);
    }
    Ok(())
}

/// Validate a raw price, returning the checked [`Price`].
pub fn validate_price(price: f64) -> Result<Price, ValidationError> {
    Ok(Price::new(price)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pharmacure_types::TypeError;

    #[test]
    fn valid_products() {
        assert!(validate_product("Aspirin").is_ok());
        assert!(validate_product("Ayurvedic Cough Syrup").is_ok());
        assert!(validate_product(" padded ").is_ok());
    }

    #[test]
    fn empty_products() {
        assert_eq!(validate_product(""), Err(ValidationError::EmptyProduct));
        assert_eq!(validate_product("  \t"), Err(ValidationError::EmptyProduct));
    }

    #[test]
    fn prices() {
        assert_eq!(validate_price(5.0).unwrap().value(), 5.0);
        assert_eq!(validate_price(0.0).unwrap(), Price::ZERO);
        assert_eq!(
            validate_price(-0.5),
            Err(ValidationError::InvalidPrice(TypeError::NegativePrice(-0.5)))
        );
        assert!(validate_price(f64::NAN).is_err());
    }
}
