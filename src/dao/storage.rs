use std::error::Error;
use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Failure reported by whichever backend is serving requests.
///
/// Callers stay backend-agnostic: the SQLite or memory store folds its own
/// error into the source chain here, and [`AppState::run_op`] decides whether
/// the failure triggers the fallback switch or surfaces to the client.
///
/// [`AppState::run_op`]: crate::state::AppState::run_op
#[derive(Debug, Error)]
#[error("{message}")]
pub struct StorageError {
    message: String,
    #[source]
    source: Box<dyn Error + Send + Sync>,
}

impl StorageError {
    /// Wrap a backend failure together with a description of the failing
    /// operation.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        Self {
            message,
            source: Box::new(source),
        }
    }
}
