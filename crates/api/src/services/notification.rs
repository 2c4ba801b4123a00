//! Notification producer.
//!
//! Enqueue-only wrapper over the durable queue; delivery happens on the
//! dispatch job's execution path, never on the request path.

use std::sync::Arc;
use tracing::info;

use domain::error::DomainError;
use domain::models::{AppointmentNotice, NotificationKind};
use domain::store::NotificationQueue;

/// Producer side of the notification queue.
#[derive(Clone)]
pub struct NotificationService {
    queue: Arc<dyn NotificationQueue>,
}

impl NotificationService {
    pub fn new(queue: Arc<dyn NotificationQueue>) -> Self {
        Self { queue }
    }

    /// Enqueues an appointment-created notice.
    pub async fn appointment_created(
        &self,
        notice: AppointmentNotice,
    ) -> Result<(), DomainError> {
        self.enqueue(NotificationKind::AppointmentCreated, notice).await
    }

    /// Enqueues an appointment-cancelled notice.
    pub async fn appointment_cancelled(
        &self,
        notice: AppointmentNotice,
    ) -> Result<(), DomainError> {
        self.enqueue(NotificationKind::AppointmentCancelled, notice).await
    }

    async fn enqueue(
        &self,
        kind: NotificationKind,
        notice: AppointmentNotice,
    ) -> Result<(), DomainError> {
        let job_id = self.queue.enqueue(kind, &notice).await?;
        info!(
            job_id = %job_id,
            kind = %kind,
            to = %notice.customer_email,
            "Notification job queued"
        );
        Ok(())
    }
}
