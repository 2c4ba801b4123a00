//! Schedule entity definitions.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::{Customer, Doctor, Schedule, ScheduleDetails};

/// Database row mapping for the schedules table.
#[derive(Debug, Clone, FromRow)]
pub struct ScheduleEntity {
    pub id: Uuid,
    pub objective: String,
    pub customer_id: Uuid,
    pub doctor_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ScheduleEntity> for Schedule {
    fn from(entity: ScheduleEntity) -> Self {
        Self {
            id: entity.id,
            objective: entity.objective,
            customer_id: entity.customer_id,
            doctor_id: entity.doctor_id,
            scheduled_at: entity.scheduled_at,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Flat row produced by joining a schedule with its customer and doctor.
///
/// Used by the deletion path, which needs the denormalized relation data
/// before the schedule row disappears.
#[derive(Debug, Clone, FromRow)]
pub struct ScheduleWithRelationsEntity {
    pub id: Uuid,
    pub objective: String,
    pub customer_id: Uuid,
    pub doctor_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_created_at: DateTime<Utc>,
    pub customer_updated_at: DateTime<Utc>,
    pub doctor_name: String,
    pub doctor_created_at: DateTime<Utc>,
    pub doctor_updated_at: DateTime<Utc>,
}

impl From<ScheduleWithRelationsEntity> for ScheduleDetails {
    fn from(entity: ScheduleWithRelationsEntity) -> Self {
        Self {
            schedule: Schedule {
                id: entity.id,
                objective: entity.objective,
                customer_id: entity.customer_id,
                doctor_id: entity.doctor_id,
                scheduled_at: entity.scheduled_at,
                created_at: entity.created_at,
                updated_at: entity.updated_at,
            },
            customer: Customer {
                id: entity.customer_id,
                name: entity.customer_name,
                email: entity.customer_email,
                created_at: entity.customer_created_at,
                updated_at: entity.customer_updated_at,
            },
            doctor: Doctor {
                id: entity.doctor_id,
                name: entity.doctor_name,
                created_at: entity.doctor_created_at,
                updated_at: entity.doctor_updated_at,
            },
        }
    }
}
