//! # trapitos-core: Pure Business Logic for Trapitos POS
//!
//! This crate is the **heart** of Trapitos POS. It contains the cart math,
//! discount precedence rules and validation as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Trapitos POS Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               Presentation (external to workspace)              │   │
//! │  │    collects cart lines ──► invokes engine ──► shows result     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    trapitos-engine                              │   │
//! │  │      process_sale: ticket → lines → stock, all-or-nothing      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ trapitos-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │ CartLine  │  │   Money   │  │  totals   │  │   rules   │  │   │
//! │  │   │   Sale    │  │ bps math  │  │ discounts │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Basis Points**: Discount percentages are bps (2000 = 20%), never floats

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{compute_cart_total, price_line, resolve_discount};
pub use error::ValidationError;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Discount percentages are expressed in basis points: 10000 bps = 100%.
///
/// A resolved percentage outside `0..=MAX_DISCOUNT_BPS` aborts the whole
/// sale; it can only come from corrupted promotional data or a malformed
/// manual entry, never from a valid configuration.
pub const MAX_DISCOUNT_BPS: i64 = 10_000;
