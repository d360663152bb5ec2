//! # trapitos-db: Database Layer for Trapitos POS
//!
//! This crate provides database access for the Trapitos POS system.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types (constraint-kind classified)
//! - [`repository`] - Repository implementations (catalog, discount,
//!   customer, sale)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use trapitos_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/trapitos.db")).await?;
//!
//! let inventory = db.catalog().list_inventory().await?;
//! ```
//!
//! The checkout transaction itself lives in `trapitos-engine`; this crate
//! only supplies the pool, the per-statement operations and the error
//! classification the engine builds on.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::catalog::CatalogRepository;
pub use repository::customer::CustomerRepository;
pub use repository::discount::DiscountRepository;
pub use repository::sale::SaleRepository;
