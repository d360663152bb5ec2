//! # Validation Module
//!
//! Business-rule validation for Trapitos POS.
//!
//! Cart lines arrive from the presentation layer as typed records, but the
//! values inside them are still operator input (or, for promotions, data
//! read back from the database) and get checked here before pricing.

use crate::error::{ValidationError, ValidationResult};
use crate::types::CartLine;
use crate::MAX_DISCOUNT_BPS;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a resolved discount percentage in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
///
/// Anything outside that range means corrupted promotional data or a
/// malformed manual entry, and aborts the whole sale.
///
/// ## Example
/// ```rust
/// use trapitos_core::validation::validate_discount_bps;
///
/// assert!(validate_discount_bps(2000).is_ok());   // 20%
/// assert!(validate_discount_bps(10000).is_ok());  // 100%
/// assert!(validate_discount_bps(10001).is_err());
/// assert!(validate_discount_bps(-1).is_err());
/// ```
pub fn validate_discount_bps(bps: i64) -> ValidationResult<()> {
    if !(0..=MAX_DISCOUNT_BPS).contains(&bps) {
        return Err(ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 0,
            max: MAX_DISCOUNT_BPS,
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (zero is allowed: promotional giveaways)
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates the authenticated operator identifier.
///
/// The auth layer owns the identifier; the engine only requires that one
/// is present.
pub fn validate_clerk_id(clerk_id: i64) -> ValidationResult<()> {
    if clerk_id <= 0 {
        return Err(ValidationError::Required {
            field: "clerk".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates a cart line at the engine boundary.
///
/// ## Rules
/// - Unit price must be non-negative
///
/// Quantity is deliberately NOT checked here: lines with `quantity <= 0`
/// are skipped by the engine, not rejected. The manual discount is checked
/// later, after precedence resolution, so the winning value is the one
/// reported.
pub fn validate_cart_line(line: &CartLine) -> ValidationResult<()> {
    validate_price_cents(line.unit_price_cents)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_discount_bps() {
        assert!(validate_discount_bps(0).is_ok());
        assert!(validate_discount_bps(825).is_ok());
        assert!(validate_discount_bps(10000).is_ok());

        assert!(validate_discount_bps(10001).is_err());
        assert!(validate_discount_bps(-1).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(1099).is_ok());
        assert!(validate_price_cents(-100).is_err());
    }

    #[test]
    fn test_validate_clerk_id() {
        assert!(validate_clerk_id(1).is_ok());
        assert!(validate_clerk_id(0).is_err());
        assert!(validate_clerk_id(-3).is_err());
    }

    #[test]
    fn test_validate_cart_line() {
        let mut line = CartLine {
            variant_id: 1,
            quantity: 0, // allowed: skipped, not rejected
            unit_price_cents: 500,
            manual_discount_bps: 0,
        };
        assert!(validate_cart_line(&line).is_ok());

        line.unit_price_cents = -1;
        assert!(validate_cart_line(&line).is_err());
    }
}
