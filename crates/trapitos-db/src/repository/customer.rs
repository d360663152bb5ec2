//! # Customer Repository
//!
//! Database operations for customer records. Customers are optional on a
//! sale; deletion is soft, like the rest of the catalog.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use trapitos_core::Customer;

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Registers a customer and returns the generated id.
    pub async fn register(
        &self,
        full_name: &str,
        phone: Option<&str>,
        email: Option<&str>,
        address: Option<&str>,
    ) -> DbResult<i64> {
        debug!(name = %full_name, "Registering customer");

        let result = sqlx::query(
            r#"
            INSERT INTO customers (full_name, phone, email, address)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(full_name)
        .bind(phone)
        .bind(email)
        .bind(address)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Finds an active customer by phone number (the lookup cashiers use).
    pub async fn find_by_phone(&self, phone: &str) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, full_name, phone, email, address, is_active
            FROM customers
            WHERE is_active = 1 AND phone = ?1
            "#,
        )
        .bind(phone)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Lists active customers, alphabetically.
    pub async fn list_active(&self) -> DbResult<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, full_name, phone, email, address, is_active
            FROM customers
            WHERE is_active = 1
            ORDER BY full_name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    /// Soft-deletes a customer.
    pub async fn deactivate(&self, customer_id: i64) -> DbResult<()> {
        let result = sqlx::query("UPDATE customers SET is_active = 0 WHERE id = ?1")
            .bind(customer_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", customer_id));
        }

        Ok(())
    }
}
