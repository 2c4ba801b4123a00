//! Authentication service: registration, login, token validation.

use std::sync::Arc;
use uuid::Uuid;

use domain::models::{AuthenticatedUser, LoginRequest, LoginResponse, RegisterRequest, User};
use domain::store::UserStore;
use shared::jwt::JwtConfig;
use shared::password;

use crate::error::ApiError;

pub struct AuthService {
    users: Arc<dyn UserStore>,
    jwt: JwtConfig,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, jwt: JwtConfig) -> Self {
        Self { users, jwt }
    }

    /// Creates a user account with a hashed credential.
    pub async fn register(&self, request: RegisterRequest) -> Result<User, ApiError> {
        if self.users.find_by_email(&request.email).await?.is_some() {
            return Err(ApiError::Conflict("User already exists".into()));
        }

        let password_hash = password::hash_password(&request.password)
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        let user = self.users.insert(&request.email, &password_hash).await?;

        Ok(user)
    }

    /// Verifies credentials and issues an access token.
    ///
    /// Unknown email and wrong password produce the same message, so the
    /// response does not reveal which half failed.
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, ApiError> {
        let user = self
            .users
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| ApiError::Validation("Invalid email or password".into()))?;

        let valid = password::verify_password(&request.password, &user.password_hash)
            .map_err(|e| ApiError::Internal(e.to_string()))?;
        if !valid {
            return Err(ApiError::Validation("Invalid email or password".into()));
        }

        let access_token = self
            .jwt
            .issue_token(user.id, &user.email)
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        Ok(LoginResponse { access_token, user })
    }

    /// Validates a token and resolves the caller identity.
    ///
    /// Every failure mode collapses to Unauthorized: a caller learns only
    /// that the token did not validate.
    pub async fn validate_token(&self, token: &str) -> Result<AuthenticatedUser, ApiError> {
        let invalid = || ApiError::Unauthorized("Invalid token".into());

        let claims = self.jwt.validate_token(token).map_err(|_| invalid())?;
        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| invalid())?;

        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(|_| invalid())?
            .ok_or_else(invalid)?;

        Ok(AuthenticatedUser {
            id: user.id,
            email: user.email,
        })
    }
}
