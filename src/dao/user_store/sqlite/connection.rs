use std::time::Duration;

use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous},
};
use tokio::time::sleep;

use super::{
    config::SqliteConfig,
    error::{SqliteDaoError, SqliteResult},
};

struct RetryPolicy;

impl RetryPolicy {
    const MAX_ATTEMPTS: u32 = 10;
    const INITIAL_DELAY_MS: u64 = 250;

    fn initial_delay() -> Duration {
        Duration::from_millis(Self::INITIAL_DELAY_MS)
    }

    fn next_delay(current: Duration) -> Duration {
        (current * 2).min(Duration::from_secs(5))
    }
}

/// Open the database file and return a ready connection pool.
///
/// The parent directory is created if missing and the pool open is retried
/// with capped exponential backoff before giving up.
pub async fn establish_pool(config: &SqliteConfig) -> SqliteResult<SqlitePool> {
    if let Some(parent) = config.path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await.map_err(|source| {
                SqliteDaoError::CreateDirectory {
                    path: parent.display().to_string(),
                    source,
                }
            })?;
        }
    }

    let options = SqliteConnectOptions::new()
        .filename(&config.path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal);

    let mut attempts = 0;
    let mut delay = RetryPolicy::initial_delay();

    loop {
        match SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options.clone())
            .await
        {
            Ok(pool) => return Ok(pool),
            Err(err) => {
                attempts += 1;
                if attempts >= RetryPolicy::MAX_ATTEMPTS {
                    return Err(SqliteDaoError::OpenDatabase {
                        path: config.path.display().to_string(),
                        attempts,
                        source: err,
                    });
                }
                sleep(delay).await;
                delay = RetryPolicy::next_delay(delay);
            }
        }
    }
}
