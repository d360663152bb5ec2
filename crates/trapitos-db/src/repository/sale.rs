//! # Sale Repository
//!
//! Database operations for sale tickets, line items and the stock
//! decrement.
//!
//! ## Transaction Scoping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The write path belongs to ONE transaction                              │
//! │                                                                         │
//! │  trapitos-engine: let mut tx = pool.begin()                            │
//! │       │                                                                 │
//! │       ├── insert_header(&mut tx, ...)  → sale id                       │
//! │       ├── decrement_stock(&mut tx, ...)┐ repeated                      │
//! │       ├── insert_line(&mut tx, ...)    ┘ per line                      │
//! │       │                                                                 │
//! │       └── tx.commit()  (or rollback on any failure)                    │
//! │                                                                         │
//! │  These are associated functions taking &mut SqliteConnection: the      │
//! │  caller's session is explicit, never implied by a default.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Readbacks (`get_sale`, `get_lines`) run on the pool like any other
//! repository query.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use trapitos_core::{PaymentMethod, PricedLine, Sale, SaleLine};

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    // =========================================================================
    // Transaction-scoped writes (checkout path)
    // =========================================================================

    /// Inserts the ticket header and returns its generated id.
    pub async fn insert_header(
        conn: &mut SqliteConnection,
        clerk_id: i64,
        customer_id: Option<i64>,
        payment_method: PaymentMethod,
        total_cents: i64,
    ) -> DbResult<i64> {
        debug!(clerk_id, total_cents, "Inserting sale header");

        let result = sqlx::query(
            r#"
            INSERT INTO sales (clerk_id, customer_id, payment_method, total_cents)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(clerk_id)
        .bind(customer_id)
        .bind(payment_method)
        .bind(total_cents)
        .execute(&mut *conn)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Inserts one line item of a sale.
    ///
    /// The line records the price the unit FINALLY sold at and the per-unit
    /// discount taken, so the ticket stays correct even if the catalog
    /// price or the promotion changes later.
    pub async fn insert_line(
        conn: &mut SqliteConnection,
        sale_id: i64,
        line: &PricedLine,
    ) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO sale_lines
                (sale_id, variant_id, quantity, unit_price_cents, discount_cents, discount_source)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(sale_id)
        .bind(line.variant_id)
        .bind(line.quantity)
        .bind(line.unit_price_cents)
        .bind(line.discount_cents)
        .bind(line.source)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    /// Decrements a variant's stock by the quantity sold.
    ///
    /// Returns `true` when a row was updated. `false` means the variant id
    /// is stale or gone - the caller treats that as insufficient stock. A
    /// decrement that would drive the count negative trips the table's
    /// CHECK constraint instead, surfacing as `DbError::CheckViolation`.
    pub async fn decrement_stock(
        conn: &mut SqliteConnection,
        variant_id: i64,
        quantity: i64,
    ) -> DbResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE variants
            SET stock_on_hand = stock_on_hand - ?1
            WHERE id = ?2
            "#,
        )
        .bind(quantity)
        .bind(variant_id)
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    // =========================================================================
    // Readbacks
    // =========================================================================

    /// Gets a sale header by id.
    pub async fn get_sale(&self, id: i64) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, clerk_id, customer_id, payment_method, total_cents, created_at
            FROM sales
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Gets all line items of a sale, in insertion order.
    pub async fn get_lines(&self, sale_id: i64) -> DbResult<Vec<SaleLine>> {
        let lines = sqlx::query_as::<_, SaleLine>(
            r#"
            SELECT id, sale_id, variant_id, quantity,
                   unit_price_cents, discount_cents, discount_source
            FROM sale_lines
            WHERE sale_id = ?1
            ORDER BY id
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }
}
