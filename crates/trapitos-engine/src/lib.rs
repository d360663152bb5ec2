//! # Trapitos Engine
//!
//! The checkout layer of the Trapitos POS: takes a validated cart from the
//! presentation layer and turns it into a committed sale, or a classified
//! error with no side effects.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      trapitos-engine                        │
//! │                                                             │
//! │   SaleRequest ──► SaleEngine::process_sale ──► SaleReceipt  │
//! │                        │                                    │
//! │        pricing (trapitos-core) + one transaction            │
//! │                  (trapitos-db repositories)                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pricing rules live in `trapitos-core`; SQL lives in `trapitos-db`. This
//! crate owns only the sequencing and the atomicity boundary.

pub mod engine;
pub mod error;

pub use engine::{SaleEngine, SaleReceipt, SaleRequest};
pub use error::SaleError;

// Re-exported so presentation code can show a running total without
// touching the database.
pub use trapitos_core::cart::compute_cart_total;
