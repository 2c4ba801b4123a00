//! Schedule repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use domain::error::DomainError;
use domain::models::{Schedule, ScheduleDetails};
use domain::store::ScheduleStore;

use crate::entities::{ScheduleEntity, ScheduleWithRelationsEntity};
use crate::metrics::QueryTimer;

use super::map_sqlx_error;

/// Repository for schedule database operations.
#[derive(Clone)]
pub struct ScheduleRepository {
    pool: PgPool,
}

impl ScheduleRepository {
    /// Creates a new ScheduleRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScheduleStore for ScheduleRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Schedule>, DomainError> {
        let timer = QueryTimer::new("find_schedule_by_id");
        let result = sqlx::query_as::<_, ScheduleEntity>(
            r#"
            SELECT id, objective, customer_id, doctor_id, scheduled_at, created_at, updated_at
            FROM schedules
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result.map_err(map_sqlx_error)?.map(Into::into))
    }

    async fn find_by_doctor_and_time(
        &self,
        doctor_id: Uuid,
        scheduled_at: DateTime<Utc>,
    ) -> Result<Option<Schedule>, DomainError> {
        let timer = QueryTimer::new("find_schedule_by_doctor_and_time");
        // Single equality match on the pair, mirroring the unique index.
        let result = sqlx::query_as::<_, ScheduleEntity>(
            r#"
            SELECT id, objective, customer_id, doctor_id, scheduled_at, created_at, updated_at
            FROM schedules
            WHERE doctor_id = $1 AND scheduled_at = $2
            "#,
        )
        .bind(doctor_id)
        .bind(scheduled_at)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result.map_err(map_sqlx_error)?.map(Into::into))
    }

    async fn find_with_relations(
        &self,
        id: Uuid,
    ) -> Result<Option<ScheduleDetails>, DomainError> {
        let timer = QueryTimer::new("find_schedule_with_relations");
        let result = sqlx::query_as::<_, ScheduleWithRelationsEntity>(
            r#"
            SELECT s.id, s.objective, s.customer_id, s.doctor_id, s.scheduled_at,
                   s.created_at, s.updated_at,
                   c.name AS customer_name, c.email AS customer_email,
                   c.created_at AS customer_created_at, c.updated_at AS customer_updated_at,
                   d.name AS doctor_name,
                   d.created_at AS doctor_created_at, d.updated_at AS doctor_updated_at
            FROM schedules s
            JOIN customers c ON c.id = s.customer_id
            JOIN doctors d ON d.id = s.doctor_id
            WHERE s.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        Ok(result.map_err(map_sqlx_error)?.map(Into::into))
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Schedule>, DomainError> {
        let timer = QueryTimer::new("list_schedules");
        let result = sqlx::query_as::<_, ScheduleEntity>(
            r#"
            SELECT id, objective, customer_id, doctor_id, scheduled_at, created_at, updated_at
            FROM schedules
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
        let timer = QueryTimer::new("count_schedules");
        let result: Result<(i64,), _> = sqlx::query_as(r#"SELECT COUNT(*) FROM schedules"#)
            .fetch_one(&self.pool)
            .await;
        timer.record();
        Ok(result.map_err(map_sqlx_error)?.0)
    }

    async fn insert(
        &self,
        objective: &str,
        customer_id: Uuid,
        doctor_id: Uuid,
        scheduled_at: DateTime<Utc>,
    ) -> Result<Schedule, DomainError> {
        let timer = QueryTimer::new("insert_schedule");
        let result = sqlx::query_as::<_, ScheduleEntity>(
            r#"
            INSERT INTO schedules (objective, customer_id, doctor_id, scheduled_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, objective, customer_id, doctor_id, scheduled_at, created_at, updated_at
            "#,
        )
        .bind(objective)
        .bind(customer_id)
        .bind(doctor_id)
        .bind(scheduled_at)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(result.map_err(map_sqlx_error)?.into())
    }

    async fn delete(&self, id: Uuid) -> Result<Schedule, DomainError> {
        let timer = QueryTimer::new("delete_schedule");
        let result = sqlx::query_as::<_, ScheduleEntity>(
            r#"
            DELETE FROM schedules
            WHERE id = $1
            RETURNING id, objective, customer_id, doctor_id, scheduled_at, created_at, updated_at
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(result.map_err(map_sqlx_error)?.into())
    }
}
