//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod customer;
pub mod doctor;
pub mod notification_job;
pub mod schedule;
pub mod user;

pub use customer::CustomerEntity;
pub use doctor::DoctorEntity;
pub use notification_job::NotificationJobEntity;
pub use schedule::{ScheduleEntity, ScheduleWithRelationsEntity};
pub use user::UserEntity;
