//! Notification job cleanup.
//!
//! Daily retention sweep of delivered and failed jobs. Pending jobs are
//! never touched.

use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::info;

use domain::store::NotificationQueue;

use super::scheduler::{Job, JobFrequency};

/// Default retention period in days for terminal notification jobs.
const DEFAULT_RETENTION_DAYS: i64 = 7;

pub struct NotificationCleanupJob {
    queue: Arc<dyn NotificationQueue>,
    retention_days: i64,
}

impl NotificationCleanupJob {
    pub fn new(queue: Arc<dyn NotificationQueue>, retention_days: Option<i64>) -> Self {
        Self {
            queue,
            retention_days: retention_days.unwrap_or(DEFAULT_RETENTION_DAYS),
        }
    }
}

#[async_trait::async_trait]
impl Job for NotificationCleanupJob {
    fn name(&self) -> &'static str {
        "notification_cleanup"
    }

    fn frequency(&self) -> JobFrequency {
        JobFrequency::Daily
    }

    async fn execute(&self) -> Result<(), String> {
        let cutoff = Utc::now() - Duration::days(self.retention_days);

        let deleted = self
            .queue
            .delete_finished_before(cutoff)
            .await
            .map_err(|e| format!("Failed to clean up notification jobs: {}", e))?;

        info!(
            deleted = deleted,
            retention_days = self.retention_days,
            "Cleaned up finished notification jobs"
        );

        Ok(())
    }
}
