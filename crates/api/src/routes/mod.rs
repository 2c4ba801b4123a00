//! HTTP route handlers.

pub mod auth;
pub mod customers;
pub mod doctors;
pub mod health;
pub mod schedules;

use shared::pagination::PageParams;
use shared::validation::{validate_limit, validate_offset, validate_page};
use validator::ValidationError;

use crate::error::ApiError;

/// Validates list query parameters before any domain call.
pub(crate) fn check_page_params(params: &PageParams) -> Result<(), ApiError> {
    validate_page(params.page).map_err(validation_error)?;
    validate_limit(params.limit).map_err(validation_error)?;
    if let Some(offset) = params.offset {
        validate_offset(offset).map_err(validation_error)?;
    }
    Ok(())
}

fn validation_error(err: ValidationError) -> ApiError {
    ApiError::Validation(
        err.message
            .map(|m| m.to_string())
            .unwrap_or_else(|| err.code.to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_pass() {
        assert!(check_page_params(&PageParams::default()).is_ok());
    }

    #[test]
    fn test_zero_page_rejected() {
        let result = check_page_params(&PageParams::new(0, 10));
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_oversized_limit_rejected() {
        let result = check_page_params(&PageParams::new(1, 500));
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_negative_offset_rejected() {
        let params = PageParams {
            page: 1,
            limit: 10,
            offset: Some(-1),
        };
        assert!(check_page_params(&params).is_err());
    }
}
