//! Customer repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use domain::error::DomainError;
use domain::models::Customer;
use domain::store::CustomerStore;

use crate::entities::CustomerEntity;
use crate::metrics::QueryTimer;

use super::map_sqlx_error;

/// Repository for customer database operations.
#[derive(Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerStore for CustomerRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, DomainError> {
        let timer = QueryTimer::new("find_customer_by_id");
        let result = sqlx::query_as::<_, CustomerEntity>(
            r#"
            SELECT id, name, email, created_at, updated_at
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result.map_err(map_sqlx_error)?.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DomainError> {
        let timer = QueryTimer::new("find_customer_by_email");
        let result = sqlx::query_as::<_, CustomerEntity>(
            r#"
            SELECT id, name, email, created_at, updated_at
            FROM customers
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result.map_err(map_sqlx_error)?.map(Into::into))
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Customer>, DomainError> {
        let timer = QueryTimer::new("list_customers");
        let result = sqlx::query_as::<_, CustomerEntity>(
            r#"
            SELECT id, name, email, created_at, updated_at
            FROM customers
            ORDER BY created_at DESC
            OFFSET $1 LIMIT $2
            "#,
        )
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        Ok(result
            .map_err(map_sqlx_error)?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    async fn count(&self) -> Result<i64, DomainError> {
        let timer = QueryTimer::new("count_customers");
        let result: Result<(i64,), _> = sqlx::query_as(r#"SELECT COUNT(*) FROM customers"#)
            .fetch_one(&self.pool)
            .await;
        timer.record();
        Ok(result.map_err(map_sqlx_error)?.0)
    }

    async fn insert(&self, name: &str, email: &str) -> Result<Customer, DomainError> {
        let timer = QueryTimer::new("insert_customer");
        let result = sqlx::query_as::<_, CustomerEntity>(
            r#"
            INSERT INTO customers (name, email)
            VALUES ($1, $2)
            RETURNING id, name, email, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(email)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(result.map_err(map_sqlx_error)?.into())
    }

    async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<Customer, DomainError> {
        let timer = QueryTimer::new("update_customer");
        let result = sqlx::query_as::<_, CustomerEntity>(
            r#"
            UPDATE customers
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, email, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(result.map_err(map_sqlx_error)?.into())
    }

    async fn delete(&self, id: Uuid) -> Result<Customer, DomainError> {
        let timer = QueryTimer::new("delete_customer");
        let result = sqlx::query_as::<_, CustomerEntity>(
            r#"
            DELETE FROM customers
            WHERE id = $1
            RETURNING id, name, email, created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(result.map_err(map_sqlx_error)?.into())
    }
}
