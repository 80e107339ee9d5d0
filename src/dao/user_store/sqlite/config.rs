use std::path::PathBuf;

/// Connection settings for the SQLite backend.
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    /// Path of the database file on disk.
    pub path: PathBuf,
    /// Maximum size of the connection pool.
    pub max_connections: u32,
}

impl SqliteConfig {
    /// Default pool size; the workload is a handful of short queries per request.
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

    /// Build a configuration pointing at `path` with default pool settings.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_connections: Self::DEFAULT_MAX_CONNECTIONS,
        }
    }
}
