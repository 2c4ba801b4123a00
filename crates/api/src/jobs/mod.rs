//! Background job scheduler and job implementations.

mod notification_cleanup;
mod notification_dispatch;
mod scheduler;

pub use notification_cleanup::NotificationCleanupJob;
pub use notification_dispatch::NotificationDispatchJob;
pub use scheduler::{Job, JobFrequency, JobScheduler};
