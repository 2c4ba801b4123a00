//! Notification job repository.
//!
//! Postgres-backed implementation of the durable notification queue:
//! enqueue appends a pending row, the dispatch job claims due rows, and
//! attempt bookkeeping drives the bounded-retry backoff schedule.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use domain::error::DomainError;
use domain::models::{AppointmentNotice, NotificationJob, NotificationKind};
use domain::store::NotificationQueue;

use crate::entities::notification_job::{MAX_ATTEMPTS, RETRY_BACKOFF_SECONDS};
use crate::entities::NotificationJobEntity;
use crate::metrics::QueryTimer;

use super::map_sqlx_error;

/// Repository for notification job queue operations.
#[derive(Clone)]
pub struct NotificationJobRepository {
    pool: PgPool,
}

impl NotificationJobRepository {
    /// Creates a new NotificationJobRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Computes the status transition for a delivery attempt.
///
/// Returns the new status string and, for a retryable failure, the backoff
/// to apply before the next attempt.
fn attempt_transition(new_attempts: i32, success: bool) -> (&'static str, Option<Duration>) {
    if success {
        ("success", None)
    } else if new_attempts >= MAX_ATTEMPTS {
        ("failed", None)
    } else {
        let index = (new_attempts as usize).min(RETRY_BACKOFF_SECONDS.len() - 1);
        ("pending", Some(Duration::seconds(RETRY_BACKOFF_SECONDS[index])))
    }
}

#[async_trait]
impl NotificationQueue for NotificationJobRepository {
    async fn enqueue(
        &self,
        kind: NotificationKind,
        notice: &AppointmentNotice,
    ) -> Result<Uuid, DomainError> {
        let payload = serde_json::to_value(notice)
            .map_err(|e| DomainError::Internal(format!("Failed to encode job payload: {}", e)))?;

        let timer = QueryTimer::new("enqueue_notification_job");
        let result: Result<(Uuid,), _> = sqlx::query_as(
            r#"
            INSERT INTO notification_jobs (kind, payload, status, attempts)
            VALUES ($1, $2, 'pending', 0)
            RETURNING id
            "#,
        )
        .bind(kind.as_str())
        .bind(payload)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        Ok(result.map_err(map_sqlx_error)?.0)
    }

    async fn claim_due(&self, limit: i64) -> Result<Vec<NotificationJob>, DomainError> {
        let now = Utc::now();
        let timer = QueryTimer::new("claim_due_notification_jobs");
        let result = sqlx::query_as::<_, NotificationJobEntity>(
            r#"
            SELECT id, kind, payload, status, attempts, last_attempt_at, next_retry_at,
                   last_error, created_at
            FROM notification_jobs
            WHERE status = 'pending'
              AND (next_retry_at IS NULL OR next_retry_at <= $1)
            ORDER BY COALESCE(next_retry_at, created_at) ASC
            LIMIT $2
            "#,
        )
        .bind(now)
        .bind(limit)
        .fetch_all(&self.pool)
        .await;
        timer.record();

        result
            .map_err(map_sqlx_error)?
            .into_iter()
            .map(TryInto::try_into)
            .collect()
    }

    async fn record_attempt(
        &self,
        job_id: Uuid,
        success: bool,
        error: Option<&str>,
    ) -> Result<(), DomainError> {
        let now = Utc::now();

        let timer = QueryTimer::new("record_notification_attempt");
        let current: Result<(i32,), _> =
            sqlx::query_as(r#"SELECT attempts FROM notification_jobs WHERE id = $1"#)
                .bind(job_id)
                .fetch_one(&self.pool)
                .await;
        let new_attempts = current.map_err(map_sqlx_error)?.0 + 1;

        let (new_status, backoff) = attempt_transition(new_attempts, success);
        let next_retry_at: Option<DateTime<Utc>> = backoff.map(|b| now + b);

        let result = sqlx::query(
            r#"
            UPDATE notification_jobs
            SET status = $2,
                attempts = $3,
                last_attempt_at = $4,
                next_retry_at = $5,
                last_error = $6
            WHERE id = $1
            "#,
        )
        .bind(job_id)
        .bind(new_status)
        .bind(new_attempts)
        .bind(now)
        .bind(next_retry_at)
        .bind(error)
        .execute(&self.pool)
        .await;
        timer.record();

        result.map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn delete_finished_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError> {
        let timer = QueryTimer::new("delete_finished_notification_jobs");
        let result = sqlx::query(
            r#"
            DELETE FROM notification_jobs
            WHERE status IN ('success', 'failed')
              AND created_at < $1
            "#,
        )
        .bind(cutoff)
        .execute(&self.pool)
        .await;
        timer.record();
        Ok(result.map_err(map_sqlx_error)?.rows_affected())
    }
}
