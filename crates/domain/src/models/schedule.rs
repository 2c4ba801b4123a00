//! Schedule (appointment) domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{Customer, Doctor};

/// A booked appointment.
///
/// The pair `(doctor_id, scheduled_at)` is unique: a doctor cannot hold two
/// appointments at the identical instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: Uuid,
    /// Reason for the visit.
    pub objective: String,
    pub customer_id: Uuid,
    pub doctor_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A schedule together with its referenced customer and doctor.
///
/// Returned by the deletion path, which reads the relations before the row
/// disappears so the cancellation notice can carry the denormalized names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDetails {
    #[serde(flatten)]
    pub schedule: Schedule,
    pub customer: Customer,
    pub doctor: Doctor,
}

/// Request body for booking an appointment.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduleRequest {
    #[validate(length(min = 1, message = "Objective is required"))]
    pub objective: String,
    pub customer_id: Uuid,
    pub doctor_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_valid() {
        let request = CreateScheduleRequest {
            objective: "Checkup".to_string(),
            customer_id: Uuid::new_v4(),
            doctor_id: Uuid::new_v4(),
            scheduled_at: Utc::now(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_request_rejects_empty_objective() {
        let request = CreateScheduleRequest {
            objective: String::new(),
            customer_id: Uuid::new_v4(),
            doctor_id: Uuid::new_v4(),
            scheduled_at: Utc::now(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_details_flatten_schedule_fields() {
        let now = Utc::now();
        let details = ScheduleDetails {
            schedule: Schedule {
                id: Uuid::nil(),
                objective: "Checkup".to_string(),
                customer_id: Uuid::nil(),
                doctor_id: Uuid::nil(),
                scheduled_at: now,
                created_at: now,
                updated_at: now,
            },
            customer: Customer {
                id: Uuid::nil(),
                name: "A".to_string(),
                email: "a@x.com".to_string(),
                created_at: now,
                updated_at: now,
            },
            doctor: Doctor {
                id: Uuid::nil(),
                name: "Dr. B".to_string(),
                created_at: now,
                updated_at: now,
            },
        };

        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["objective"], "Checkup");
        assert_eq!(json["customer"]["name"], "A");
        assert_eq!(json["doctor"]["name"], "Dr. B");
    }
}
