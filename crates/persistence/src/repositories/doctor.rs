//! Doctor repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use domain::error::DomainError;
use domain::models::Doctor;
use domain::store::DoctorStore;

use crate::entities::DoctorEntity;
use crate::metrics::QueryTimer;

use super::map_sqlx_error;

/// Repository for doctor database operations.
#[derive(Clone)]
pub struct DoctorRepository {
    pool: PgPool,
}

impl DoctorRepository {
    /// Creates a new DoctorRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DoctorStore for DoctorRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Doctor>, DomainError> {
        let timer = QueryTimer::new("find_doctor_by_id");
        let result = sqlx::query_as::<_, DoctorEntity>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM doctors
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result.map_err(map_sqlx_error)?.map(Into::into))
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Doctor>, DomainError> {
        let timer = QueryTimer::new("list_doctors");
        let result = sqlx::query_as::<_, DoctorEntity>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM doctors
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
        let timer = QueryTimer::new("count_doctors");
        let result: Result<(i64,), _> = sqlx::query_as(r#"SELECT COUNT(*) FROM doctors"#)
            .fetch_one(&self.pool)
            .await;
        timer.record();
        Ok(result.map_err(map_sqlx_error)?.0)
    }

    async fn insert(&self, name: &str) -> Result<Doctor, DomainError> {
        let timer = QueryTimer::new("insert_doctor");
        let result = sqlx::query_as::<_, DoctorEntity>(
            r#"
            INSERT INTO doctors (name)
            VALUES ($1)
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(result.map_err(map_sqlx_error)?.into())
    }

    async fn update(&self, id: Uuid, name: Option<&str>) -> Result<Doctor, DomainError> {
        let timer = QueryTimer::new("update_doctor");
        let result = sqlx::query_as::<_, DoctorEntity>(
            r#"
            UPDATE doctors
            SET name = COALESCE($2, name),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(result.map_err(map_sqlx_error)?.into())
    }

    async fn delete(&self, id: Uuid) -> Result<Doctor, DomainError> {
        let timer = QueryTimer::new("delete_doctor");
        let result = sqlx::query_as::<_, DoctorEntity>(
            r#"
            DELETE FROM doctors
            WHERE id = $1
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(result.map_err(map_sqlx_error)?.into())
    }
}
