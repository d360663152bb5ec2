//! # Repository Implementations
//!
//! One repository per aggregate:
//!
//! - [`catalog`] - products, variants and stock
//! - [`discount`] - promotion windows and the active-percentage lookup
//! - [`customer`] - customer records
//! - [`sale`] - ticket headers, line items and the stock decrement
//!
//! Single-shot operations take `&self` and run on the pool. Operations
//! that belong to the checkout transaction are
//! associated functions taking an explicit `&mut SqliteConnection`, so the
//! caller decides which unit of work they join - there is no implicit
//! "maybe transactional" session.

pub mod catalog;
pub mod customer;
pub mod discount;
pub mod sale;
