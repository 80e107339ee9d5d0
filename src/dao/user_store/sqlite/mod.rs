mod config;
mod connection;
mod error;
mod models;
/// SQLite-backed [`UserStore`](crate::dao::user_store::UserStore) implementation.
pub mod store;

pub use config::SqliteConfig;
pub use error::SqliteDaoError;
pub use store::SqliteUserStore;

use crate::dao::storage::StorageError;

impl From<SqliteDaoError> for StorageError {
    fn from(err: SqliteDaoError) -> Self {
        StorageError::unavailable(err.to_string(), err)
    }
}
