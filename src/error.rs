use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

use crate::dao::storage::StorageError;

/// Errors that can occur in service layer operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage backend failed while handling the request.
    #[error("storage unavailable")]
    Unavailable(#[source] StorageError),
    /// Application is running in degraded mode without storage.
    #[error("storage unavailable (degraded mode)")]
    Degraded,
    /// Invalid input provided by the client.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Registration attempted with a username that already exists.
    #[error("username already exists")]
    DuplicateUsername,
    /// Login failed. Deliberately identical for unknown usernames and wrong
    /// passwords.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// Unexpected internal failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        ServiceError::Unavailable(err)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(_err: ValidationErrors) -> Self {
        // Presence checks are the only validation rule; mirror the single
        // message the browser client expects.
        AppError::BadRequest("username and password required".into())
    }
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request with invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Unauthorized access attempt.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    /// Internal server error. The message stays generic so persistence
    /// details never reach the client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Unavailable(_) | ServiceError::Degraded => {
                AppError::Internal("storage backend failure".into())
            }
            ServiceError::InvalidInput(message) => AppError::BadRequest(message),
            ServiceError::DuplicateUsername => AppError::BadRequest("username already exists".into()),
            ServiceError::InvalidCredentials => AppError::Unauthorized("invalid credentials".into()),
            ServiceError::Internal(_) => AppError::Internal("unexpected server error".into()),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let payload = Json(ErrorBody {
            message: self.to_string(),
        });

        (status, payload).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrong_password_and_unknown_user_map_to_same_response() {
        let unknown: AppError = ServiceError::InvalidCredentials.into();
        let wrong: AppError = ServiceError::InvalidCredentials.into();
        assert_eq!(unknown.to_string(), wrong.to_string());
        assert!(matches!(unknown, AppError::Unauthorized(_)));
    }

    #[test]
    fn test_duplicate_username_maps_to_bad_request() {
        let app: AppError = ServiceError::DuplicateUsername.into();
        assert!(matches!(app, AppError::BadRequest(_)));
        assert_eq!(app.to_string(), "bad request: username already exists");
    }

    #[test]
    fn test_storage_failures_stay_generic() {
        let err = StorageError::unavailable(
            "insert failed".into(),
            std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        );
        let app: AppError = ServiceError::Unavailable(err).into();
        assert!(!app.to_string().contains("disk full"));
        assert!(matches!(app, AppError::Internal(_)));
    }
}
