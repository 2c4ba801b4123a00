//! Authentication endpoint handlers.
//!
//! These routes are public: registration and login precede any token, and
//! the validate endpoint is the target the authorization gate calls.

use axum::{extract::State, Json};
use serde::Deserialize;
use validator::Validate;

use domain::models::{AuthenticatedUser, LoginRequest, LoginResponse, RegisterRequest, User};

use crate::app::AppState;
use crate::error::ApiError;

/// Request body for token validation.
#[derive(Debug, Deserialize)]
pub struct ValidateTokenRequest {
    pub token: String,
}

/// Register a user account.
///
/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<User>, ApiError> {
    request.validate()?;
    let user = state.auth.register(request).await?;
    Ok(Json(user))
}

/// Exchange credentials for an access token.
///
/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    request.validate()?;
    let response = state.auth.login(request).await?;
    Ok(Json(response))
}

/// Validate an access token and return the caller identity.
///
/// POST /api/v1/auth/validate
pub async fn validate(
    State(state): State<AppState>,
    Json(request): Json<ValidateTokenRequest>,
) -> Result<Json<AuthenticatedUser>, ApiError> {
    let user = state.auth.validate_token(&request.token).await?;
    Ok(Json(user))
}
