//! Common validation utilities.
//!
//! Explicit validation helpers invoked at the service boundary, plus
//! custom validators referenced from request DTO derives.

use validator::{ValidateEmail, ValidationError};

use crate::pagination::MAX_LIMIT;

/// Validates that a string field is non-empty after trimming.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("not_blank");
        err.message = Some("Value must not be empty".into());
        Err(err)
    } else {
        Ok(())
    }
}

/// Validates an email address.
pub fn validate_email_address(email: &str) -> Result<(), ValidationError> {
    if email.validate_email() {
        Ok(())
    } else {
        let mut err = ValidationError::new("email_format");
        err.message = Some("Invalid email".into());
        Err(err)
    }
}

/// Validates a 1-based page number.
pub fn validate_page(page: i64) -> Result<(), ValidationError> {
    if page >= 1 {
        Ok(())
    } else {
        let mut err = ValidationError::new("page_range");
        err.message = Some("Page must be at least 1".into());
        Err(err)
    }
}

/// Validates a page size against the accepted range.
pub fn validate_limit(limit: i64) -> Result<(), ValidationError> {
    if (1..=MAX_LIMIT).contains(&limit) {
        Ok(())
    } else {
        let mut err = ValidationError::new("limit_range");
        err.message = Some("Limit must be between 1 and 100".into());
        Err(err)
    }
}

/// Validates a row offset.
pub fn validate_offset(offset: i64) -> Result<(), ValidationError> {
    if offset >= 0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("offset_range");
        err.message = Some("Offset must be non-negative".into());
        Err(err)
    }
}
