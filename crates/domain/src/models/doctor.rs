//! Doctor domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A practicing doctor. No uniqueness constraint on the name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for doctor registration.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDoctorRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
}

/// Partial-field patch for an existing doctor.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDoctorRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_valid() {
        let request = CreateDoctorRequest {
            name: "Dr. B".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_request_rejects_empty_name() {
        let request = CreateDoctorRequest {
            name: String::new(),
        };
        assert!(request.validate().is_err());
    }
}
