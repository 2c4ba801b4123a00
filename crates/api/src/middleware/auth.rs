//! Remote authorization gate.
//!
//! Every customer/doctor/schedule route requires a bearer token validated
//! by the authentication service's token-validation endpoint. The gate
//! never fails open: a transport failure, timeout, or malformed response
//! is treated the same as a rejected token.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use domain::models::AuthenticatedUser;

use crate::app::AppState;
use crate::error::ApiError;

/// Middleware that requires a remotely validated bearer token.
///
/// On success the caller identity is stored in request extensions for
/// downstream handlers.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok());

    let token = match auth_header {
        Some(header) if header.starts_with("Bearer ") => header[7..].trim(),
        _ => {
            return ApiError::Unauthorized("Authorization header not found".into())
                .into_response();
        }
    };

    if token.is_empty() {
        return ApiError::Unauthorized("Invalid token".into()).into_response();
    }

    match validate_remote(&state, token).await {
        Ok(user) => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Err(e) => {
            tracing::debug!(error = %e, "Remote token validation failed");
            ApiError::Unauthorized("Failed to validate token".into()).into_response()
        }
    }
}

/// Calls the authentication service's validate endpoint.
async fn validate_remote(state: &AppState, token: &str) -> Result<AuthenticatedUser, String> {
    let response = state
        .auth_client
        .post(&state.config.auth.service_url)
        .json(&serde_json::json!({ "token": token }))
        .send()
        .await
        .map_err(|e| format!("Validation call failed: {}", e))?;

    if !response.status().is_success() {
        return Err(format!(
            "Validation endpoint returned {}",
            response.status()
        ));
    }

    response
        .json::<AuthenticatedUser>()
        .await
        .map_err(|e| format!("Malformed validation response: {}", e))
}
