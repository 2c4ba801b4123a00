//! Notification dispatch background job.
//!
//! Claims due jobs from the durable queue, composes the notice, and calls
//! the delivery channel. Retry policy belongs to the queue: a failed
//! attempt is recorded and the queue reschedules or gives up per its own
//! backoff limits.

use std::sync::Arc;
use tracing::{error, info, warn};

use domain::models::{NotificationJob, NotificationKind};
use domain::store::NotificationQueue;

use crate::services::Mailer;

use super::scheduler::{Job, JobFrequency};

pub struct NotificationDispatchJob {
    queue: Arc<dyn NotificationQueue>,
    mailer: Mailer,
    batch_size: i64,
}

impl NotificationDispatchJob {
    pub fn new(queue: Arc<dyn NotificationQueue>, mailer: Mailer, batch_size: i64) -> Self {
        Self {
            queue,
            mailer,
            batch_size,
        }
    }

    /// Processes one claimed job.
    ///
    /// An unconfigured delivery channel records the job as delivered after
    /// a warning, so missing outbound configuration never wedges the
    /// queue or the scheduling flow behind it.
    async fn process(&self, job: &NotificationJob) -> Result<(), String> {
        if !self.mailer.is_configured() {
            warn!(
                job_id = %job.id,
                to = %job.notice.customer_email,
                "Delivery channel not configured; recording job as delivered"
            );
            return self
                .queue
                .record_attempt(job.id, true, None)
                .await
                .map_err(|e| e.to_string());
        }

        let (subject, body) = compose_notice(job);

        match self
            .mailer
            .deliver(&job.notice.customer_email, &subject, &body)
            .await
        {
            Ok(()) => {
                info!(
                    job_id = %job.id,
                    kind = %job.kind,
                    to = %job.notice.customer_email,
                    "Notice delivered"
                );
                self.queue.record_attempt(job.id, true, None).await
            }
            Err(e) => {
                error!(
                    job_id = %job.id,
                    kind = %job.kind,
                    attempts = job.attempts,
                    error = %e,
                    "Notice delivery failed"
                );
                self.queue
                    .record_attempt(job.id, false, Some(&e.to_string()))
                    .await
            }
        }
        .map_err(|e| e.to_string())
    }
}

/// Composes the delivery subject and body for a job.
pub fn compose_notice(job: &NotificationJob) -> (String, String) {
    let notice = &job.notice;
    let when = notice.scheduled_at.format("%A, %B %e, %Y at %H:%M UTC");

    match job.kind {
        NotificationKind::AppointmentCreated => (
            "Your appointment is confirmed - Clinic Scheduler".to_string(),
            format!(
                r#"Hi {name},

Your appointment has been scheduled:

  Doctor: {doctor}
  When:   {when}
  Reason: {objective}

Best regards,
The Clinic Scheduler Team"#,
                name = notice.customer_name,
                doctor = notice.doctor_name,
                when = when,
                objective = notice.objective,
            ),
        ),
        NotificationKind::AppointmentCancelled => (
            "Your appointment was cancelled - Clinic Scheduler".to_string(),
            format!(
                r#"Hi {name},

Your appointment has been cancelled:

  Doctor: {doctor}
  When:   {when}
  Reason: {objective}

If you did not request this change, please contact us.

Best regards,
The Clinic Scheduler Team"#,
                name = notice.customer_name,
                doctor = notice.doctor_name,
                when = when,
                objective = notice.objective,
            ),
        ),
    }
}

#[async_trait::async_trait]
impl Job for NotificationDispatchJob {
    fn name(&self) -> &'static str {
        "notification_dispatch"
    }

    fn frequency(&self) -> JobFrequency {
        JobFrequency::Minutes(1)
    }

    async fn execute(&self) -> Result<(), String> {
        let jobs = self
            .queue
            .claim_due(self.batch_size)
            .await
            .map_err(|e| format!("Failed to claim due notification jobs: {}", e))?;

        if jobs.is_empty() {
            return Ok(());
        }

        let mut processed = 0u32;
        for job in &jobs {
            match self.process(job).await {
                Ok(()) => processed += 1,
                Err(e) => {
                    error!(job_id = %job.id, error = %e, "Failed to process notification job");
                }
            }
        }

        info!(
            processed = processed,
            claimed = jobs.len(),
            "Processed notification jobs"
        );

        Ok(())
    }
}
