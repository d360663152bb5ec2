//! # Domain Types
//!
//! Core domain types used throughout Trapitos POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  transient (one checkout)          persisted (survive the commit)      │
//! │  ────────────────────────          ───────────────────────────────     │
//! │  CartLine   ──► PricedLine   ──►   Sale (header) 1──N SaleLine         │
//! │                                    Variant.stock_on_hand (decremented) │
//! │                                                                         │
//! │  catalog                            parties                            │
//! │  ───────                            ───────                            │
//! │  Product 1──N Variant               Customer                           │
//! │  Product 1──N Discount                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Persisted rows keep raw `*_cents` integer fields (what the database
//! stores) and expose [`Money`] through accessor methods.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Discount Source
// =============================================================================

/// Which discount rule won for a sale line. Recorded for auditability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum DiscountSource {
    /// No discount applied.
    None,
    /// Operator-entered percentage; always wins over a promotion.
    Manual,
    /// Time-windowed promotion found in the database.
    Automatic,
}

impl Default for DiscountSource {
    fn default() -> Self {
        DiscountSource::None
    }
}

// =============================================================================
// Payment Method
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Card payment on external terminal.
    Card,
    /// Bank transfer.
    Transfer,
}

// =============================================================================
// Cart Line
// =============================================================================

/// One entry of the operator's shopping cart, as collected by the
/// presentation layer. Exists only in memory for the duration of a single
/// checkout attempt.
///
/// The unit price is a snapshot of the catalog price at selection time: if
/// the product price changes mid-checkout, the cart keeps what the operator
/// quoted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Stocked variant being sold.
    pub variant_id: i64,

    /// Units requested. Lines with `quantity <= 0` are skipped, not errors.
    pub quantity: i64,

    /// Catalog price per unit at selection time, in cents.
    pub unit_price_cents: i64,

    /// Operator-entered discount in basis points (0 = none).
    pub manual_discount_bps: i64,
}

impl CartLine {
    /// Line total before any discount (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.unit_price_cents).multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Priced Line
// =============================================================================

/// A cart line after discount precedence has been resolved.
///
/// ## Invariant
/// `unit_price_cents = original price − discount_cents`, with the winning
/// percentage validated to `0..=10000` bps before this value is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedLine {
    pub variant_id: i64,
    pub quantity: i64,
    /// Final per-unit price, after discount, in cents.
    pub unit_price_cents: i64,
    /// Amount taken off per unit, in cents.
    pub discount_cents: i64,
    /// Which rule produced the discount.
    pub source: DiscountSource,
}

impl PricedLine {
    /// Final line total (discounted unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.unit_price_cents).multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Sale (persisted)
// =============================================================================

/// A committed sale ticket header. Created exactly once per successful
/// checkout, never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: i64,
    /// Authenticated operator who rang the sale up.
    pub clerk_id: i64,
    pub customer_id: Option<i64>,
    pub payment_method: PaymentMethod,
    pub total_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl Sale {
    /// Returns the ticket total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

/// A committed line item of a sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleLine {
    pub id: i64,
    pub sale_id: i64,
    pub variant_id: i64,
    pub quantity: i64,
    /// Price the unit was FINALLY sold at (post-discount), in cents.
    pub unit_price_cents: i64,
    /// Per-unit amount taken off, in cents.
    pub discount_cents: i64,
    pub discount_source: DiscountSource,
}

impl SaleLine {
    /// Returns the recorded unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }
}

// =============================================================================
// Catalog (persisted)
// =============================================================================

/// A priced article in the catalog ("Denim Jacket").
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    pub base_price_cents: i64,
    /// Soft-delete flag; inactive products disappear from the inventory view.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Returns the base price as Money.
    #[inline]
    pub fn base_price(&self) -> Money {
        Money::from_cents(self.base_price_cents)
    }
}

/// A sellable unit of a product, distinguished by size/color, with its own
/// stock count. This is the row the sale transaction decrements.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Variant {
    pub id: i64,
    pub product_id: i64,
    pub size: String,
    pub color: String,
    pub stock_on_hand: i64,
}

/// One row of the inventory view (variant joined to its product).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct InventoryRow {
    pub variant_id: i64,
    pub product_id: i64,
    pub name: String,
    pub size: String,
    pub color: String,
    pub stock_on_hand: i64,
    pub base_price_cents: i64,
}

/// A promotion window: `percent_bps` off the product while the current date
/// falls inside `starts_on..=ends_on`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Discount {
    pub id: i64,
    pub product_id: i64,
    pub percent_bps: i64,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
}

// =============================================================================
// Customer (persisted)
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: i64,
    pub full_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub is_active: bool,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_line_total() {
        let line = CartLine {
            variant_id: 1,
            quantity: 3,
            unit_price_cents: 2999,
            manual_discount_bps: 0,
        };
        assert_eq!(line.line_total().cents(), 8997);
    }

    #[test]
    fn test_discount_source_default() {
        assert_eq!(DiscountSource::default(), DiscountSource::None);
    }
}
