//! # Sale Transaction Engine
//!
//! Orchestrates one checkout: price every cart line (resolving discount
//! precedence), then write ticket header, line items and stock decrements
//! as a single atomic unit of work.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  NotStarted                                                             │
//! │      │  validate cart + clerk (no session yet)                          │
//! │      ▼                                                                  │
//! │  SessionOpen      pool.begin()  ── failure: Connectivity, no retry     │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  LinesPriced      per line: promotion lookup (same session),           │
//! │      │            manual-wins precedence, range check, total += line   │
//! │      ▼                                                                  │
//! │  HeaderInserted   INSERT sales → generated id                          │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  Lines+Stock      per line: decrement stock, then INSERT sale_lines;   │
//! │      │            zero rows affected or CHECK trip = insufficient      │
//! │      ▼                                                                  │
//! │  Committed        tx.commit()                                          │
//! │                                                                         │
//! │  Any failure after SessionOpen → RolledBack (explicitly; sqlx also     │
//! │  rolls back when the transaction is dropped, covering panics).         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Steps are strictly sequential - each depends on state from the previous
//! one (the sale id must exist before lines can reference it). Concurrent
//! checkouts each get their own transaction; the database's isolation and
//! the stock CHECK are the only oversell guards, and losing that race is a
//! normal "insufficient stock" outcome, not a bug.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::{Sqlite, Transaction};
use tracing::{error, info, warn};

use crate::error::SaleError;
use trapitos_core::cart::{apply_discount, resolve_discount};
use trapitos_core::validation::{validate_cart_line, validate_clerk_id, validate_discount_bps};
use trapitos_core::{CartLine, Money, PaymentMethod, PricedLine};
use trapitos_db::repository::discount::DiscountRepository;
use trapitos_db::repository::sale::SaleRepository;
use trapitos_db::{Database, DbError};

// =============================================================================
// Request / Receipt
// =============================================================================

/// Everything the presentation layer hands over for one checkout attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRequest {
    /// Authenticated operator identifier (owned by the external auth layer).
    pub clerk_id: i64,
    /// Optional customer the ticket is attributed to.
    pub customer_id: Option<i64>,
    pub payment_method: PaymentMethod,
    pub lines: Vec<CartLine>,
}

/// The result of a committed sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleReceipt {
    /// Generated ticket id.
    pub sale_id: i64,
    /// Grand total actually charged, in cents.
    pub total_cents: i64,
    /// Ready-to-display confirmation, e.g. "Sale recorded. Total: $160.00".
    pub message: String,
}

impl SaleReceipt {
    /// Returns the charged total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Engine
// =============================================================================

/// The sale transaction engine.
///
/// Holds a database handle and opens one transaction per
/// [`process_sale`](Self::process_sale) call. Cheap to clone.
#[derive(Debug, Clone)]
pub struct SaleEngine {
    db: Database,
}

impl SaleEngine {
    /// Creates an engine over an initialized database.
    pub fn new(db: Database) -> Self {
        SaleEngine { db }
    }

    /// Processes one sale atomically.
    ///
    /// ## Postconditions
    /// - On success: header + all lines persisted, stock decremented
    ///   exactly once per unit sold, receipt carries the generated id.
    /// - On failure: no header, no lines, no stock change; the session is
    ///   always released (committed or rolled back) before returning.
    ///
    /// Every persistence call may block on I/O; invoke this from a context
    /// that tolerates blocking, never a thread that must stay responsive.
    pub async fn process_sale(&self, request: &SaleRequest) -> Result<SaleReceipt, SaleError> {
        // Preconditions, before any resource is acquired.
        if request.lines.is_empty() {
            warn!(clerk_id = request.clerk_id, "Sale attempted with an empty cart");
            return Err(SaleError::EmptyCart);
        }
        if validate_clerk_id(request.clerk_id).is_err() {
            return Err(SaleError::MissingClerk);
        }
        for line in &request.lines {
            validate_cart_line(line).map_err(|reason| SaleError::InvalidLine {
                variant_id: line.variant_id,
                reason,
            })?;
        }

        // Fatal if the session cannot be opened: the caller has no retry
        // policy, so report and stop.
        let mut tx = self.db.pool().begin().await.map_err(|e| {
            error!(error = %e, "Failed to open a database session for the sale");
            SaleError::Connectivity(e.to_string())
        })?;

        match Self::execute(&mut tx, request).await {
            Ok(receipt) => {
                tx.commit().await.map_err(|e| {
                    error!(error = %e, "Commit failed");
                    SaleError::Db(DbError::from(e))
                })?;
                info!(
                    sale_id = receipt.sale_id,
                    total = %receipt.total(),
                    "Sale committed"
                );
                Ok(receipt)
            }
            Err(err) => {
                // Dropping the transaction would roll back too; doing it
                // explicitly lets a rollback failure be logged.
                if let Err(rb_err) = tx.rollback().await {
                    error!(error = %rb_err, "Rollback failed after sale error");
                }
                error!(error = %err, clerk_id = request.clerk_id, "Sale transaction rolled back");
                Err(err)
            }
        }
    }

    /// Runs the write sequence inside the caller's transaction. Any error
    /// returned here makes `process_sale` roll the whole thing back.
    async fn execute(
        tx: &mut Transaction<'_, Sqlite>,
        request: &SaleRequest,
    ) -> Result<SaleReceipt, SaleError> {
        let today = Utc::now().date_naive();

        // -- Price every line ------------------------------------------------
        let mut priced = Vec::with_capacity(request.lines.len());
        let mut total = Money::zero();

        for line in &request.lines {
            // Zero/negative quantity lines are skipped, not errors.
            if line.quantity <= 0 {
                continue;
            }

            // Promotion lookup reads through this transaction's session for
            // consistency with the writes that follow.
            let auto_bps =
                DiscountRepository::active_discount_bps(&mut *tx, line.variant_id, today).await?;

            let (bps, source) = resolve_discount(line.manual_discount_bps, auto_bps);
            validate_discount_bps(bps).map_err(|_| SaleError::InvalidDiscount {
                variant_id: line.variant_id,
                bps,
            })?;

            let priced_line: PricedLine = apply_discount(line, bps, source);
            total += priced_line.line_total();
            priced.push(priced_line);
        }

        info!(
            clerk_id = request.clerk_id,
            total = %total,
            lines = priced.len(),
            "Starting sale"
        );

        // -- Ticket header ---------------------------------------------------
        let sale_id = SaleRepository::insert_header(
            &mut *tx,
            request.clerk_id,
            request.customer_id,
            request.payment_method,
            total.cents(),
        )
        .await?;

        // -- Stock + line items, interleaved per line -------------------------
        // Stock first: a stale variant id surfaces as a failed decrement
        // (insufficient stock) rather than a foreign key violation on the
        // line insert.
        for line in &priced {
            let affected = SaleRepository::decrement_stock(&mut *tx, line.variant_id, line.quantity)
                .await
                .map_err(|e| match e {
                    // The non-negative stock CHECK fired: same outcome as a
                    // plain out-of-stock, classified structurally.
                    DbError::CheckViolation(_) => SaleError::InsufficientStock {
                        variant_id: line.variant_id,
                    },
                    other => SaleError::from(other),
                })?;

            if !affected {
                // Stale variant id, or a concurrent sale emptied the row.
                return Err(SaleError::InsufficientStock {
                    variant_id: line.variant_id,
                });
            }

            SaleRepository::insert_line(&mut *tx, sale_id, line).await?;
        }

        Ok(SaleReceipt {
            sale_id,
            total_cents: total.cents(),
            message: format!("Sale recorded. Total: {}", total),
        })
    }
}
