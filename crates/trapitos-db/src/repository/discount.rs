//! # Discount Repository
//!
//! Promotion windows and the active-percentage lookup.
//!
//! A promotion is attached to a product and applies to all its variants
//! while the current date falls inside its validity window. When several
//! windows overlap, the largest percentage wins.

use chrono::NaiveDate;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use crate::error::DbResult;

/// Repository for promotion database operations.
#[derive(Debug, Clone)]
pub struct DiscountRepository {
    pool: SqlitePool,
}

impl DiscountRepository {
    /// Creates a new DiscountRepository.
    pub fn new(pool: SqlitePool) -> Self {
        DiscountRepository { pool }
    }

    /// Registers a promotion window and returns its generated id.
    ///
    /// The percentage is stored as given; range enforcement happens at the
    /// pricing step, which guards against rows edited behind our back too.
    pub async fn create(
        &self,
        product_id: i64,
        percent_bps: i64,
        starts_on: NaiveDate,
        ends_on: NaiveDate,
    ) -> DbResult<i64> {
        debug!(product_id, percent_bps, %starts_on, %ends_on, "Registering discount");

        let result = sqlx::query(
            r#"
            INSERT INTO discounts (product_id, percent_bps, starts_on, ends_on)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(product_id)
        .bind(percent_bps)
        .bind(starts_on)
        .bind(ends_on)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Returns the active promotion percentage for a variant on a date,
    /// or 0 when none applies.
    ///
    /// Takes an explicit connection so the lookup reads through the same
    /// transaction as the sale being priced - a promotion created or
    /// expired mid-checkout cannot make two lines of one ticket disagree.
    pub async fn active_discount_bps(
        conn: &mut SqliteConnection,
        variant_id: i64,
        on: NaiveDate,
    ) -> DbResult<i64> {
        let bps: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT d.percent_bps
            FROM discounts d
            JOIN variants v ON v.product_id = d.product_id
            WHERE v.id = ?1
              AND d.starts_on <= ?2
              AND d.ends_on >= ?2
            ORDER BY d.percent_bps DESC
            LIMIT 1
            "#,
        )
        .bind(variant_id)
        .bind(on)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(bps.unwrap_or(0))
    }

    /// Pool-scoped variant of [`Self::active_discount_bps`], for display
    /// outside any transaction (e.g. showing the promoted price in a list).
    pub async fn active_for_variant(&self, variant_id: i64, on: NaiveDate) -> DbResult<i64> {
        let mut conn = self.pool.acquire().await?;
        Self::active_discount_bps(&mut conn, variant_id, on).await
    }
}
