//! # Sale Error Taxonomy
//!
//! What a checkout attempt can fail with, classified for the caller:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  EmptyCart / MissingClerk / InvalidLine  - input validation,            │
//! │                                            no session was opened        │
//! │  Connectivity                            - could not open a session,    │
//! │                                            fatal for this attempt       │
//! │  InvalidDiscount                         - resolved percentage out of   │
//! │                                            [0,100]; corrupted promo     │
//! │  InsufficientStock                       - decrement affected no row,   │
//! │                                            or tripped the stock CHECK   │
//! │  Db                                      - anything else; rolled back,  │
//! │                                            detail kept for the operator │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant's `Display` is the user-facing message. Nothing is
//! retried by the engine itself; the caller must resubmit.

use thiserror::Error;

use trapitos_core::ValidationError;
use trapitos_db::DbError;

/// A failed checkout attempt.
#[derive(Debug, Error)]
pub enum SaleError {
    /// The cart had no lines. Checked before any resource is acquired.
    #[error("The cart is empty")]
    EmptyCart,

    /// No authenticated operator identifier was supplied.
    #[error("Clerk not identified")]
    MissingClerk,

    /// A cart line failed boundary validation (e.g. negative unit price).
    #[error("Invalid cart line for variant {variant_id}: {reason}")]
    InvalidLine {
        variant_id: i64,
        reason: ValidationError,
    },

    /// A transactional session could not be opened. Fatal for this
    /// attempt; the engine never retries.
    #[error("Could not reach the database: {0}")]
    Connectivity(String),

    /// The resolved discount percentage fell outside 0-100%. Guards
    /// against corrupted promotional data or a malformed manual entry.
    #[error("Invalid discount ({bps} bps) on variant {variant_id}")]
    InvalidDiscount { variant_id: i64, bps: i64 },

    /// Stock could not cover the requested quantity - either the decrement
    /// matched no row (stale id, or a concurrent sale emptied it) or the
    /// non-negative CHECK constraint fired.
    #[error("Insufficient stock to complete the sale (variant {variant_id})")]
    InsufficientStock { variant_id: i64 },

    /// Any other persistence failure. The raw detail is included so the
    /// operator can report it; the full error is also logged.
    #[error("An error occurred while processing the sale: {0}")]
    Db(DbError),
}

impl From<DbError> for SaleError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConnectionFailed(msg) => SaleError::Connectivity(msg),
            DbError::PoolExhausted => {
                SaleError::Connectivity("connection pool exhausted".to_string())
            }
            other => SaleError::Db(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(SaleError::EmptyCart.to_string(), "The cart is empty");
        assert_eq!(
            SaleError::InsufficientStock { variant_id: 7 }.to_string(),
            "Insufficient stock to complete the sale (variant 7)"
        );
    }

    #[test]
    fn test_connection_failures_classify_as_connectivity() {
        let err: SaleError = DbError::ConnectionFailed("no route".to_string()).into();
        assert!(matches!(err, SaleError::Connectivity(_)));

        let err: SaleError = DbError::PoolExhausted.into();
        assert!(matches!(err, SaleError::Connectivity(_)));
    }

    #[test]
    fn test_other_db_errors_keep_detail() {
        let err: SaleError = DbError::QueryFailed("disk I/O error".to_string()).into();
        assert!(err.to_string().contains("disk I/O error"));
    }
}
