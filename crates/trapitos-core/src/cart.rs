//! # Cart Math
//!
//! The pure half of the sale engine: cart totals and discount precedence.
//!
//! ## Discount Precedence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Which percentage applies?                             │
//! │                                                                         │
//! │  manual > 0 ? ──── yes ──► manual wins OUTRIGHT                        │
//! │       │                    (never combined with the automatic one)     │
//! │       no                                                                │
//! │       ▼                                                                 │
//! │  automatic > 0 ? ── yes ──► automatic promotion applies                │
//! │       │                                                                 │
//! │       no                                                                │
//! │       ▼                                                                 │
//! │  no discount (0 bps)                                                   │
//! │                                                                         │
//! │  Then: winning bps must be in 0..=10000 or the whole sale aborts.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A human operator's explicit per-line override must always take priority
//! over a background promotion; silently stacking both could produce
//! double-discounted or negative prices.

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{CartLine, DiscountSource, PricedLine};
use crate::validation::validate_discount_bps;

/// Sums `unit price × quantity` over the cart, with no discount applied.
///
/// Used for the pre-checkout estimate shown to the operator. Pure function:
/// no side effects, never fails, and idempotent by construction.
pub fn compute_cart_total(lines: &[CartLine]) -> Money {
    lines
        .iter()
        .fold(Money::zero(), |acc, line| acc + line.line_total())
}

/// Decides the single percentage to apply to a line.
///
/// Returns the winning basis points and which rule produced them. The
/// result is NOT yet range-checked; callers validate before pricing so the
/// offending value can be reported.
pub fn resolve_discount(manual_bps: i64, auto_bps: i64) -> (i64, DiscountSource) {
    if manual_bps > 0 {
        (manual_bps, DiscountSource::Manual)
    } else if auto_bps > 0 {
        (auto_bps, DiscountSource::Automatic)
    } else {
        (0, DiscountSource::None)
    }
}

/// Computes the final per-unit price for a line given an already-validated
/// winning percentage.
///
/// ## Invariant
/// `unit_price_cents = base − discount_cents` with rounding done once, in
/// [`Money::percentage_of`].
pub fn apply_discount(line: &CartLine, bps: i64, source: DiscountSource) -> PricedLine {
    debug_assert!((0..=crate::MAX_DISCOUNT_BPS).contains(&bps));

    let base = Money::from_cents(line.unit_price_cents);
    let discount = base.percentage_of(bps);

    PricedLine {
        variant_id: line.variant_id,
        quantity: line.quantity,
        unit_price_cents: (base - discount).cents(),
        discount_cents: discount.cents(),
        source,
    }
}

/// Resolves, validates and applies the discount for one cart line.
///
/// ## Example
/// ```rust
/// use trapitos_core::cart::price_line;
/// use trapitos_core::types::{CartLine, DiscountSource};
///
/// let line = CartLine {
///     variant_id: 1,
///     quantity: 2,
///     unit_price_cents: 10_000, // $100.00
///     manual_discount_bps: 0,
/// };
///
/// // 20% promotion active on the product
/// let priced = price_line(&line, 2000).unwrap();
/// assert_eq!(priced.unit_price_cents, 8000);
/// assert_eq!(priced.source, DiscountSource::Automatic);
/// ```
pub fn price_line(line: &CartLine, auto_bps: i64) -> Result<PricedLine, ValidationError> {
    let (bps, source) = resolve_discount(line.manual_discount_bps, auto_bps);
    validate_discount_bps(bps)?;
    Ok(apply_discount(line, bps, source))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(qty: i64, price_cents: i64, manual_bps: i64) -> CartLine {
        CartLine {
            variant_id: 7,
            quantity: qty,
            unit_price_cents: price_cents,
            manual_discount_bps: manual_bps,
        }
    }

    #[test]
    fn test_compute_cart_total() {
        let cart = vec![line(2, 10000, 0), line(1, 550, 0)];
        assert_eq!(compute_cart_total(&cart).cents(), 20550);
    }

    #[test]
    fn test_compute_cart_total_ignores_discounts() {
        // The estimate is pre-discount by contract.
        let cart = vec![line(2, 10000, 5000)];
        assert_eq!(compute_cart_total(&cart).cents(), 20000);
    }

    #[test]
    fn test_compute_cart_total_empty() {
        assert!(compute_cart_total(&[]).is_zero());
    }

    #[test]
    fn test_manual_wins_outright() {
        // Manual 5% beats automatic 90%: it replaces, never compares.
        let (bps, source) = resolve_discount(500, 9000);
        assert_eq!(bps, 500);
        assert_eq!(source, DiscountSource::Manual);
    }

    #[test]
    fn test_automatic_when_no_manual() {
        let (bps, source) = resolve_discount(0, 2000);
        assert_eq!(bps, 2000);
        assert_eq!(source, DiscountSource::Automatic);
    }

    #[test]
    fn test_no_discount() {
        let (bps, source) = resolve_discount(0, 0);
        assert_eq!(bps, 0);
        assert_eq!(source, DiscountSource::None);
    }

    #[test]
    fn test_price_line_automatic() {
        // $100.00 with 20% promotion → $80.00, $20.00 off per unit.
        let priced = price_line(&line(2, 10000, 0), 2000).unwrap();
        assert_eq!(priced.unit_price_cents, 8000);
        assert_eq!(priced.discount_cents, 2000);
        assert_eq!(priced.source, DiscountSource::Automatic);
        assert_eq!(priced.line_total().cents(), 16000);
    }

    #[test]
    fn test_price_line_manual_overrides() {
        // Manual 50% on the same line → $50.00 per unit.
        let priced = price_line(&line(2, 10000, 5000), 2000).unwrap();
        assert_eq!(priced.unit_price_cents, 5000);
        assert_eq!(priced.source, DiscountSource::Manual);
        assert_eq!(priced.line_total().cents(), 10000);
    }

    #[test]
    fn test_price_line_rejects_out_of_range() {
        assert!(price_line(&line(1, 10000, 15000), 0).is_err());
        assert!(price_line(&line(1, 10000, -500), 0).is_ok()); // negative manual = no manual
        assert!(price_line(&line(1, 10000, 0), 10001).is_err());
    }

    #[test]
    fn test_negative_manual_is_not_a_discount() {
        // manual <= 0 means "no manual entry"; the automatic one applies.
        let (bps, source) = resolve_discount(-500, 1000);
        assert_eq!(bps, 1000);
        assert_eq!(source, DiscountSource::Automatic);
    }
}
