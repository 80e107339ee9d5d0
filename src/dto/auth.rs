use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Payload for `POST /register`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// Desired login name; must be present and non-empty.
    #[validate(required, length(min = 1))]
    pub username: Option<String>,
    /// Plain text password; must be present and non-empty. Hashed before it
    /// reaches storage.
    #[validate(required, length(min = 1))]
    pub password: Option<String>,
}

/// Payload for `POST /login`.
///
/// Missing fields are not a validation error here: an absent username simply
/// never matches an account, so the request falls through to the same generic
/// 401 as a wrong password.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Login name to authenticate.
    #[serde(default)]
    pub username: String,
    /// Plain text password to verify.
    #[serde(default)]
    pub password: String,
}

/// Success body for `POST /login`.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Human readable confirmation.
    pub message: String,
    /// Opaque identifier of the authenticated user.
    pub user_id: i64,
}

impl LoginResponse {
    /// Build the login confirmation for `user_id`.
    pub fn new(user_id: i64) -> Self {
        Self {
            message: "Login successful".to_string(),
            user_id,
        }
    }
}
