//! Notification job entity definitions.
//!
//! Maps to the notification_jobs table backing the durable queue.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::error::DomainError;
use domain::models::{AppointmentNotice, NotificationJob};

/// Database row mapping for the notification_jobs table.
#[derive(Debug, Clone, FromRow)]
pub struct NotificationJobEntity {
    pub id: Uuid,
    pub kind: String,
    pub payload: serde_json::Value,
    pub status: String,
    pub attempts: i32,
    pub last_attempt_at: Option<DateTime<Utc>>,
    pub next_retry_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Maximum delivery attempts before a job is marked failed.
pub const MAX_ATTEMPTS: i32 = 5;

/// Backoff intervals in seconds indexed by attempt count.
/// Attempt 1: 60s, attempt 2: 300s, attempts 3+: 900s.
pub const RETRY_BACKOFF_SECONDS: [i64; 4] = [0, 60, 300, 900];

impl TryFrom<NotificationJobEntity> for NotificationJob {
    type Error = DomainError;

    fn try_from(entity: NotificationJobEntity) -> Result<Self, Self::Error> {
        let kind = entity
            .kind
            .parse()
            .map_err(|e: String| DomainError::Internal(e))?;
        let notice: AppointmentNotice = serde_json::from_value(entity.payload)
            .map_err(|e| DomainError::Internal(format!("Invalid job payload: {}", e)))?;
        let status = entity
            .status
            .parse()
            .map_err(|e: String| DomainError::Internal(e))?;

        Ok(Self {
            id: entity.id,
            kind,
            notice,
            status,
            attempts: entity.attempts,
            next_retry_at: entity.next_retry_at,
            last_error: entity.last_error,
            created_at: entity.created_at,
        })
    }
}
