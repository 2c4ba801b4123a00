//! Store ports.
//!
//! The relational store and the durable notification queue are external
//! collaborators; the services depend on these traits and the persistence
//! crate provides the Postgres implementations. List reads are always
//! ordered by descending creation time.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::DomainError;
use crate::models::{
    AppointmentNotice, Customer, Doctor, NotificationJob, NotificationKind, Schedule,
    ScheduleDetails, User,
};

/// Record store operations for customers.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, DomainError>;

    /// Uniqueness probe on the email field.
    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DomainError>;

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Customer>, DomainError>;

    async fn count(&self) -> Result<i64, DomainError>;

    async fn insert(&self, name: &str, email: &str) -> Result<Customer, DomainError>;

    async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<Customer, DomainError>;

    /// Deletes the row and returns its last value.
    async fn delete(&self, id: Uuid) -> Result<Customer, DomainError>;
}

/// Record store operations for doctors.
#[async_trait]
pub trait DoctorStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Doctor>, DomainError>;

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Doctor>, DomainError>;

    async fn count(&self) -> Result<i64, DomainError>;

    async fn insert(&self, name: &str) -> Result<Doctor, DomainError>;

    async fn update(&self, id: Uuid, name: Option<&str>) -> Result<Doctor, DomainError>;

    async fn delete(&self, id: Uuid) -> Result<Doctor, DomainError>;
}

/// Record store operations for schedules.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Schedule>, DomainError>;

    /// Compound-uniqueness probe: an atomic equality match on both fields
    /// together, not two independent checks.
    async fn find_by_doctor_and_time(
        &self,
        doctor_id: Uuid,
        scheduled_at: DateTime<Utc>,
    ) -> Result<Option<Schedule>, DomainError>;

    /// Reads a schedule together with its customer and doctor rows.
    async fn find_with_relations(&self, id: Uuid)
        -> Result<Option<ScheduleDetails>, DomainError>;

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Schedule>, DomainError>;

    async fn count(&self) -> Result<i64, DomainError>;

    async fn insert(
        &self,
        objective: &str,
        customer_id: Uuid,
        doctor_id: Uuid,
        scheduled_at: DateTime<Utc>,
    ) -> Result<Schedule, DomainError>;

    async fn delete(&self, id: Uuid) -> Result<Schedule, DomainError>;
}

/// Record store operations for user accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    async fn insert(&self, email: &str, password_hash: &str) -> Result<User, DomainError>;
}

/// Durable notification queue.
///
/// Enqueue appends and returns fast; delivery happens on a separate
/// execution path. Retry policy (bounded attempts with backoff) belongs to
/// the queue, not to the processor.
#[async_trait]
pub trait NotificationQueue: Send + Sync {
    /// Appends a job and returns its identifier. Must not block on delivery.
    async fn enqueue(
        &self,
        kind: NotificationKind,
        notice: &AppointmentNotice,
    ) -> Result<Uuid, DomainError>;

    /// Returns pending jobs that are due, oldest first.
    async fn claim_due(&self, limit: i64) -> Result<Vec<NotificationJob>, DomainError>;

    /// Records the outcome of a delivery attempt. A failed attempt either
    /// reschedules the job per the backoff policy or marks it failed once
    /// the attempt limit is reached.
    async fn record_attempt(
        &self,
        job_id: Uuid,
        success: bool,
        error: Option<&str>,
    ) -> Result<(), DomainError>;

    /// Deletes terminal jobs created before the cutoff. Returns the number
    /// of rows removed.
    async fn delete_finished_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError>;
}
