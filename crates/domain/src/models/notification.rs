//! Notification job models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Kind of appointment notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    AppointmentCreated,
    AppointmentCancelled,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::AppointmentCreated => "appointment-created",
            NotificationKind::AppointmentCancelled => "appointment-cancelled",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NotificationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "appointment-created" => Ok(NotificationKind::AppointmentCreated),
            "appointment-cancelled" => Ok(NotificationKind::AppointmentCancelled),
            _ => Err(format!("Invalid notification kind: {}", s)),
        }
    }
}

/// Payload carried by an appointment notification job.
///
/// Captured at enqueue time; for cancellations the customer and doctor data
/// is read before the schedule row is deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentNotice {
    pub customer_email: String,
    pub customer_name: String,
    pub doctor_name: String,
    pub objective: String,
    pub scheduled_at: DateTime<Utc>,
}

/// Processing status of a queued job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Success,
    Failed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Success => "success",
            JobStatus::Failed => "failed",
        }
    }
}

impl FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(JobStatus::Pending),
            "success" => Ok(JobStatus::Success),
            "failed" => Ok(JobStatus::Failed),
            _ => Err(format!("Invalid job status: {}", s)),
        }
    }
}

/// A durable notification job.
///
/// Jobs are immutable once enqueued; only status, attempt bookkeeping, and
/// retry scheduling change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationJob {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub notice: AppointmentNotice,
    pub status: JobStatus,
    pub attempts: i32,
    pub next_retry_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    pub created_at: DateTime<Utc>,
}
