use std::{sync::Arc, time::SystemTime};

use futures::future::BoxFuture;
use sqlx::SqlitePool;
use tokio::sync::RwLock;

use super::{
    config::SqliteConfig,
    connection::establish_pool,
    error::{SqliteDaoError, SqliteResult},
    models::{GameRecordRow, UserRow, format_timestamp},
};
use crate::dao::{
    models::{GameRecordEntity, NewGameRecordEntity, NewUserEntity, UserEntity},
    storage::StorageResult,
    user_store::UserStore,
};

const USERS_TABLE: &str = "users";
const HISTORY_TABLE: &str = "game_history";

/// Embedded relational store backed by a SQLite database file.
#[derive(Clone)]
pub struct SqliteUserStore {
    inner: Arc<SqliteInner>,
}

struct SqliteInner {
    pool: RwLock<SqlitePool>,
    config: SqliteConfig,
}

impl SqliteInner {
    async fn pool(&self) -> SqlitePool {
        self.pool.read().await.clone()
    }

    async fn reconnect(&self) -> SqliteResult<()> {
        let pool = establish_pool(&self.config).await?;
        ensure_schema(&pool).await?;
        let mut guard = self.pool.write().await;
        *guard = pool;
        Ok(())
    }
}

impl SqliteUserStore {
    /// Open the database file and make sure the schema exists.
    pub async fn connect(config: SqliteConfig) -> SqliteResult<Self> {
        let pool = establish_pool(&config).await?;
        ensure_schema(&pool).await?;

        Ok(Self {
            inner: Arc::new(SqliteInner {
                pool: RwLock::new(pool),
                config,
            }),
        })
    }

    async fn insert_user(&self, user: NewUserEntity) -> SqliteResult<Option<UserEntity>> {
        let created_at = SystemTime::now();
        let pool = self.inner.pool().await;
        let result = sqlx::query(
            "INSERT INTO users (username, password, highscore, created_at) VALUES (?1, ?2, 0, ?3)",
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(format_timestamp(created_at))
        .execute(&pool)
        .await;

        match result {
            Ok(done) => Ok(Some(UserEntity {
                id: done.last_insert_rowid(),
                username: user.username,
                password_hash: user.password_hash,
                highscore: 0,
                created_at,
            })),
            // Username uniqueness is enforced by the schema; surface the
            // violation as the duplicate outcome rather than an error.
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Ok(None),
            Err(source) => Err(SqliteDaoError::InsertUser {
                username: user.username,
                source,
            }),
        }
    }

    async fn find_user(&self, username: String) -> SqliteResult<Option<UserEntity>> {
        let pool = self.inner.pool().await;
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password, highscore, created_at FROM users WHERE username = ?1",
        )
        .bind(&username)
        .fetch_optional(&pool)
        .await
        .map_err(|source| SqliteDaoError::FindUser { username, source })?;

        row.map(UserEntity::try_from).transpose()
    }

    async fn list_users(&self) -> SqliteResult<Vec<UserEntity>> {
        let pool = self.inner.pool().await;
        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password, highscore, created_at FROM users \
             ORDER BY highscore DESC, id ASC",
        )
        .fetch_all(&pool)
        .await
        .map_err(|source| SqliteDaoError::ListUsers { source })?;

        rows.into_iter().map(UserEntity::try_from).collect()
    }

    async fn raise_highscore(&self, user_id: i64, candidate: i64) -> SqliteResult<()> {
        let pool = self.inner.pool().await;
        // Strictly-greater guard lives in the WHERE clause; a lower candidate
        // or unknown user updates zero rows.
        sqlx::query("UPDATE users SET highscore = ?1 WHERE id = ?2 AND highscore < ?1")
            .bind(candidate)
            .bind(user_id)
            .execute(&pool)
            .await
            .map_err(|source| SqliteDaoError::UpdateHighscore { user_id, source })?;
        Ok(())
    }

    async fn append_record(&self, record: NewGameRecordEntity) -> SqliteResult<GameRecordEntity> {
        let pool = self.inner.pool().await;
        let done = sqlx::query(
            "INSERT INTO game_history (user_id, game, opponent, winner) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(record.user_id)
        .bind(&record.game)
        .bind(&record.opponent)
        .bind(&record.winner)
        .execute(&pool)
        .await
        .map_err(|source| SqliteDaoError::InsertRecord {
            user_id: record.user_id,
            source,
        })?;

        Ok(GameRecordEntity {
            id: done.last_insert_rowid(),
            user_id: record.user_id,
            game: record.game,
            opponent: record.opponent,
            winner: record.winner,
        })
    }

    async fn records_for_user(&self, user_id: i64) -> SqliteResult<Vec<GameRecordEntity>> {
        let pool = self.inner.pool().await;
        let rows = sqlx::query_as::<_, GameRecordRow>(
            "SELECT id, user_id, game, opponent, winner FROM game_history \
             WHERE user_id = ?1 ORDER BY id ASC",
        )
        .bind(user_id)
        .fetch_all(&pool)
        .await
        .map_err(|source| SqliteDaoError::ListRecords { user_id, source })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn ping(&self) -> SqliteResult<()> {
        let pool = self.inner.pool().await;
        sqlx::query("SELECT 1")
            .execute(&pool)
            .await
            .map_err(|source| SqliteDaoError::HealthPing { source })?;
        Ok(())
    }
}

async fn ensure_schema(pool: &SqlitePool) -> SqliteResult<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS users (\
            id INTEGER PRIMARY KEY AUTOINCREMENT,\
            username TEXT NOT NULL UNIQUE,\
            password TEXT NOT NULL,\
            highscore INTEGER NOT NULL DEFAULT 0,\
            created_at TEXT NOT NULL\
        )",
    )
    .execute(pool)
    .await
    .map_err(|source| SqliteDaoError::EnsureSchema {
        table: USERS_TABLE,
        source,
    })?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS game_history (\
            id INTEGER PRIMARY KEY AUTOINCREMENT,\
            user_id INTEGER NOT NULL REFERENCES users(id),\
            game TEXT NOT NULL,\
            opponent TEXT NOT NULL,\
            winner TEXT NOT NULL\
        )",
    )
    .execute(pool)
    .await
    .map_err(|source| SqliteDaoError::EnsureSchema {
        table: HISTORY_TABLE,
        source,
    })?;

    Ok(())
}

impl UserStore for SqliteUserStore {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    fn create_user(
        &self,
        user: NewUserEntity,
    ) -> BoxFuture<'static, StorageResult<Option<UserEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.insert_user(user).await.map_err(Into::into) })
    }

    fn find_user_by_username(
        &self,
        username: String,
    ) -> BoxFuture<'static, StorageResult<Option<UserEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_user(username).await.map_err(Into::into) })
    }

    fn list_users_by_highscore(&self) -> BoxFuture<'static, StorageResult<Vec<UserEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_users().await.map_err(Into::into) })
    }

    fn raise_highscore(
        &self,
        user_id: i64,
        candidate: i64,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .raise_highscore(user_id, candidate)
                .await
                .map_err(Into::into)
        })
    }

    fn append_game_record(
        &self,
        record: NewGameRecordEntity,
    ) -> BoxFuture<'static, StorageResult<GameRecordEntity>> {
        let store = self.clone();
        Box::pin(async move { store.append_record(record).await.map_err(Into::into) })
    }

    fn game_records_for_user(
        &self,
        user_id: i64,
    ) -> BoxFuture<'static, StorageResult<Vec<GameRecordEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.records_for_user(user_id).await.map_err(Into::into) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.ping().await.map_err(Into::into) })
    }

    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.inner.reconnect().await.map_err(Into::into) })
    }
}
