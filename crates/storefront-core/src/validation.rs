//! # Validation Module
//!
//! Input validation for admin product edits, search input, and the checkout
//! forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Storefront UI                                                │
//! │  └── "required" markers, immediate feedback                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Command deserialization (apps/storefront)                    │
//! │  └── Type validation (serde)                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: THIS MODULE                                                  │
//! │  └── Business rules, checked before any state changes                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{validate_card_number, validate_search_query};
//!
//! assert!(validate_card_number("4111 1111 1111 1111").is_ok());
//! assert!(validate_search_query("grip").is_ok());
//! ```

use crate::checkout::{PaymentDetails, ShippingAddress};
use crate::error::ValidationError;
use crate::types::Product;
use crate::{MAX_PRICE_MINOR, MAX_SEARCH_QUERY_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Helpers
// =============================================================================

fn required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

fn max_len(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
    Ok(())
}

fn digits_only(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

// =============================================================================
// Product Validators
// =============================================================================

/// Validates a product before an admin add/update.
///
/// ## Rules
/// - `id`, `name` and `category` are required
/// - `name` at most 200 characters
/// - `price` must not be negative (zero is a free item)
/// - `price` at most [`MAX_PRICE_MINOR`]
/// - `rating` between 0 and 5
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    required("id", &product.id)?;
    required("name", &product.name)?;
    max_len("name", &product.name, 200)?;
    required("category", &product.category)?;

    if product.price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }
    if product.price.minor() > MAX_PRICE_MINOR {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_MINOR,
        });
    }

    if !(0.0..=5.0).contains(&product.rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: 0,
            max: 5,
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (shows every product)
/// - At most 100 characters
///
/// The query is not trimmed: it is matched exactly as typed.
pub fn validate_search_query(query: &str) -> ValidationResult<()> {
    max_len("query", query, MAX_SEARCH_QUERY_LEN)
}

// =============================================================================
// Checkout Validators
// =============================================================================

/// Validates the shipping step of checkout.
///
/// ## Rules
/// Required: first name, last name, address line 1, city, postal code,
/// country. Address line 2 and state are optional.
pub fn validate_shipping_address(address: &ShippingAddress) -> ValidationResult<()> {
    required("first name", &address.first_name)?;
    required("last name", &address.last_name)?;
    required("address line 1", &address.address1)?;
    required("city", &address.city)?;
    required("postal code", &address.zip)?;
    required("country", &address.country)?;
    Ok(())
}

/// Validates the payment step of checkout.
pub fn validate_payment_details(payment: &PaymentDetails) -> ValidationResult<()> {
    required("name on card", &payment.card_name)?;
    validate_card_number(&payment.card_number)?;
    validate_expiry(&payment.exp_date)?;
    validate_cvv(&payment.cvv)?;
    Ok(())
}

/// Validates a card number: 12-19 digits once spaces and hyphens are removed.
///
/// ```rust
/// use storefront_core::validation::validate_card_number;
///
/// assert!(validate_card_number("4111-1111-1111-1111").is_ok());
/// assert!(validate_card_number("4111").is_err());
/// assert!(validate_card_number("4111 1111 1111 abcd").is_err());
/// ```
pub fn validate_card_number(card_number: &str) -> ValidationResult<()> {
    required("card number", card_number)?;

    let digits = normalize_card_number(card_number);
    if !digits_only(&digits) {
        return Err(ValidationError::InvalidFormat {
            field: "card number".to_string(),
            reason: "must contain only digits".to_string(),
        });
    }
    if !(12..=19).contains(&digits.len()) {
        return Err(ValidationError::InvalidFormat {
            field: "card number".to_string(),
            reason: "must be 12 to 19 digits".to_string(),
        });
    }
    Ok(())
}

/// Strips the separators people type between digit groups.
pub fn normalize_card_number(card_number: &str) -> String {
    card_number
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect()
}

/// Validates an expiry date in `MM/YY` form.
pub fn validate_expiry(exp_date: &str) -> ValidationResult<()> {
    required("expiry date", exp_date)?;

    let invalid = || ValidationError::InvalidFormat {
        field: "expiry date".to_string(),
        reason: "must be MM/YY".to_string(),
    };

    let (month, year) = exp_date.trim().split_once('/').ok_or_else(invalid)?;
    if month.len() != 2 || year.len() != 2 || !digits_only(month) || !digits_only(year) {
        return Err(invalid());
    }

    let month: i64 = month.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(ValidationError::OutOfRange {
            field: "expiry month".to_string(),
            min: 1,
            max: 12,
        });
    }
    Ok(())
}

/// Validates a CVV: 3 or 4 digits.
pub fn validate_cvv(cvv: &str) -> ValidationResult<()> {
    required("cvv", cvv)?;
    let cvv = cvv.trim();
    if !digits_only(cvv) || !(3..=4).contains(&cvv.len()) {
        return Err(ValidationError::InvalidFormat {
            field: "cvv".to_string(),
            reason: "must be 3 or 4 digits".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use std::collections::BTreeMap;

    fn product() -> Product {
        Product {
            id: "1".to_string(),
            name: "Pro Racket".to_string(),
            description: String::new(),
            price: Money::from_minor(0),
            image_url: String::new(),
            category: "rackets".to_string(),
            sub_category: None,
            stock: 0,
            rating: 0.0,
            specifications: BTreeMap::new(),
            featured: false,
        }
    }

    fn address() -> ShippingAddress {
        ShippingAddress {
            first_name: "Asha".to_string(),
            last_name: "Rao".to_string(),
            address1: "12 Court Road".to_string(),
            address2: String::new(),
            city: "Pune".to_string(),
            state: String::new(),
            zip: "411001".to_string(),
            country: "India".to_string(),
            save_address: false,
        }
    }

    fn payment() -> PaymentDetails {
        PaymentDetails {
            card_name: "Asha Rao".to_string(),
            card_number: "4111 1111 1111 1111".to_string(),
            exp_date: "09/29".to_string(),
            cvv: "123".to_string(),
            save_card: false,
        }
    }

    #[test]
    fn test_validate_product() {
        assert!(validate_product(&product()).is_ok());

        let mut p = product();
        p.name = "   ".to_string();
        assert_eq!(
            validate_product(&p),
            Err(ValidationError::Required {
                field: "name".to_string()
            })
        );

        let mut p = product();
        p.price = Money::from_minor(-1);
        assert_eq!(
            validate_product(&p),
            Err(ValidationError::Negative {
                field: "price".to_string()
            })
        );

        let mut p = product();
        p.price = Money::from_minor(MAX_PRICE_MINOR);
        assert!(validate_product(&p).is_ok());

        p.price = Money::from_minor(i64::MAX / 2 + 1);
        assert_eq!(
            validate_product(&p),
            Err(ValidationError::OutOfRange {
                field: "price".to_string(),
                min: 0,
                max: MAX_PRICE_MINOR,
            })
        );

        let mut p = product();
        p.rating = 5.5;
        assert!(validate_product(&p).is_err());

        let mut p = product();
        p.category = String::new();
        assert!(validate_product(&p).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert!(validate_search_query("").is_ok());
        assert!(validate_search_query(&"a".repeat(100)).is_ok());
        assert!(validate_search_query(&"a".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_shipping_address() {
        assert!(validate_shipping_address(&address()).is_ok());

        let mut a = address();
        a.zip = String::new();
        assert_eq!(
            validate_shipping_address(&a),
            Err(ValidationError::Required {
                field: "postal code".to_string()
            })
        );
    }

    #[test]
    fn test_validate_payment_details() {
        assert!(validate_payment_details(&payment()).is_ok());

        let mut p = payment();
        p.card_name = String::new();
        assert!(validate_payment_details(&p).is_err());
    }

    #[test]
    fn test_validate_card_number() {
        assert!(validate_card_number("411111111111").is_ok());
        assert!(validate_card_number("4111111111111111111").is_ok());
        assert!(validate_card_number("41111111111").is_err());
        assert!(validate_card_number("41111111111111111111").is_err());
        assert!(validate_card_number("").is_err());
    }

    #[test]
    fn test_validate_expiry() {
        assert!(validate_expiry("01/30").is_ok());
        assert!(validate_expiry("12/25").is_ok());
        assert!(validate_expiry("13/25").is_err());
        assert!(validate_expiry("00/25").is_err());
        assert!(validate_expiry("1/25").is_err());
        assert!(validate_expiry("0125").is_err());
        assert!(validate_expiry("ab/cd").is_err());
    }

    #[test]
    fn test_validate_cvv() {
        assert!(validate_cvv("123").is_ok());
        assert!(validate_cvv("1234").is_ok());
        assert!(validate_cvv("12").is_err());
        assert!(validate_cvv("12a").is_err());
    }
}
