//! Repository implementations of the domain store ports.

pub mod customer;
pub mod doctor;
pub mod notification_job;
pub mod schedule;
pub mod user;

pub use customer::CustomerRepository;
pub use doctor::DoctorRepository;
pub use notification_job::NotificationJobRepository;
pub use schedule::ScheduleRepository;
pub use user::UserRepository;

use domain::error::DomainError;

/// Maps a sqlx error onto the domain taxonomy.
///
/// Unique-constraint violations (23505) become Conflict and foreign-key
/// violations (23503) become NotFound, so the store-level constraints back
/// up the application-level probes with the same observable errors.
pub(crate) fn map_sqlx_error(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::RowNotFound => DomainError::NotFound("Record not found".into()),
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            Some("23505") => DomainError::Conflict("Record already exists".into()),
            Some("23503") => DomainError::NotFound("Referenced record not found".into()),
            _ => DomainError::Internal(format!("Database error: {}", err)),
        },
        _ => DomainError::Internal(format!("Database error: {}", err)),
    }
}
