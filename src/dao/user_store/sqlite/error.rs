use thiserror::Error;

/// Result alias for SQLite DAO operations.
pub type SqliteResult<T> = Result<T, SqliteDaoError>;

/// Failures raised by the SQLite backend.
#[derive(Debug, Error)]
pub enum SqliteDaoError {
    /// The parent directory for the database file could not be created.
    #[error("failed to create database directory `{path}`")]
    CreateDirectory {
        /// Directory that could not be created.
        path: String,
        /// Underlying filesystem error.
        #[source]
        source: std::io::Error,
    },
    /// The connection pool could not be opened after exhausting retries.
    #[error("failed to open database `{path}` after {attempts} attempts")]
    OpenDatabase {
        /// Database file path.
        path: String,
        /// Number of connection attempts made.
        attempts: u32,
        /// Last connection error.
        #[source]
        source: sqlx::Error,
    },
    /// Bootstrap DDL failed.
    #[error("failed to ensure schema for table `{table}`")]
    EnsureSchema {
        /// Table whose DDL failed.
        table: &'static str,
        /// Underlying database error.
        #[source]
        source: sqlx::Error,
    },
    /// A user row could not be inserted.
    #[error("failed to insert user `{username}`")]
    InsertUser {
        /// Username being inserted.
        username: String,
        /// Underlying database error.
        #[source]
        source: sqlx::Error,
    },
    /// A user lookup failed.
    #[error("failed to load user `{username}`")]
    FindUser {
        /// Username being looked up.
        username: String,
        /// Underlying database error.
        #[source]
        source: sqlx::Error,
    },
    /// Listing users for the scoreboard failed.
    #[error("failed to list users")]
    ListUsers {
        /// Underlying database error.
        #[source]
        source: sqlx::Error,
    },
    /// The conditional highscore update failed.
    #[error("failed to update highscore for user {user_id}")]
    UpdateHighscore {
        /// Id of the user being updated.
        user_id: i64,
        /// Underlying database error.
        #[source]
        source: sqlx::Error,
    },
    /// A game record could not be appended.
    #[error("failed to append game record for user {user_id}")]
    InsertRecord {
        /// Id of the owning user.
        user_id: i64,
        /// Underlying database error.
        #[source]
        source: sqlx::Error,
    },
    /// Listing game records failed.
    #[error("failed to list game records for user {user_id}")]
    ListRecords {
        /// Id of the owning user.
        user_id: i64,
        /// Underlying database error.
        #[source]
        source: sqlx::Error,
    },
    /// A stored timestamp did not parse as RFC 3339.
    #[error("invalid stored timestamp `{value}`")]
    InvalidTimestamp {
        /// Raw column value.
        value: String,
        /// Parse failure from the time crate.
        #[source]
        source: time::error::Parse,
    },
    /// The connectivity probe failed.
    #[error("database health check failed")]
    HealthPing {
        /// Underlying database error.
        #[source]
        source: sqlx::Error,
    },
}
