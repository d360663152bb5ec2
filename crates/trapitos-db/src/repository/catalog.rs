//! # Catalog Repository
//!
//! Database operations for products, variants and stock.
//!
//! A product is the priced article; each variant (size/color) carries its
//! own `stock_on_hand`. Deleting a product is a soft delete: the row is
//! flagged inactive and drops out of the inventory view, so historical
//! sale lines keep their reference.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use trapitos_core::{InventoryRow, Variant};

/// Repository for catalog database operations.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    /// Creates a new CatalogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    /// Inserts a new product and returns its generated id.
    pub async fn create_product(
        &self,
        name: &str,
        category: Option<&str>,
        base_price_cents: i64,
    ) -> DbResult<i64> {
        debug!(name = %name, price = base_price_cents, "Creating product");

        let result = sqlx::query(
            r#"
            INSERT INTO products (name, category, base_price_cents)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(name)
        .bind(category)
        .bind(base_price_cents)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Inserts a variant of a product and returns its generated id.
    pub async fn create_variant(
        &self,
        product_id: i64,
        size: &str,
        color: &str,
        initial_stock: i64,
    ) -> DbResult<i64> {
        debug!(product_id, size = %size, color = %color, "Creating variant");

        let result = sqlx::query(
            r#"
            INSERT INTO variants (product_id, size, color, stock_on_hand)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(product_id)
        .bind(size)
        .bind(color)
        .bind(initial_stock)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Gets a variant by id.
    pub async fn get_variant(&self, id: i64) -> DbResult<Option<Variant>> {
        let variant = sqlx::query_as::<_, Variant>(
            r#"
            SELECT id, product_id, size, color, stock_on_hand
            FROM variants
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(variant)
    }

    /// Lists the inventory: every variant of every active product.
    pub async fn list_inventory(&self) -> DbResult<Vec<InventoryRow>> {
        let rows = sqlx::query_as::<_, InventoryRow>(
            r#"
            SELECT
                v.id            AS variant_id,
                p.id            AS product_id,
                p.name          AS name,
                v.size          AS size,
                v.color         AS color,
                v.stock_on_hand AS stock_on_hand,
                p.base_price_cents AS base_price_cents
            FROM variants v
            JOIN products p ON v.product_id = p.id
            WHERE p.is_active = 1
            ORDER BY p.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Overwrites the stock of a variant (inventory correction, restock).
    ///
    /// This is the administrative path; sales never call it - they go
    /// through the guarded decrement inside the checkout transaction.
    pub async fn set_stock(&self, variant_id: i64, new_stock: i64) -> DbResult<()> {
        let result = sqlx::query("UPDATE variants SET stock_on_hand = ?1 WHERE id = ?2")
            .bind(new_stock)
            .bind(variant_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Variant", variant_id));
        }

        Ok(())
    }

    /// Updates the base price of a product.
    pub async fn update_price(&self, product_id: i64, new_price_cents: i64) -> DbResult<()> {
        let result = sqlx::query("UPDATE products SET base_price_cents = ?1 WHERE id = ?2")
            .bind(new_price_cents)
            .bind(product_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", product_id));
        }

        Ok(())
    }

    /// Soft-deletes a product (marks it inactive).
    pub async fn deactivate_product(&self, product_id: i64) -> DbResult<()> {
        debug!(product_id, "Deactivating product");

        let result = sqlx::query("UPDATE products SET is_active = 0 WHERE id = ?1")
            .bind(product_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", product_id));
        }

        Ok(())
    }
}
