/// Volatile in-memory backend, also used as the fallback store.
pub mod memory;
/// Embedded SQLite backend.
#[cfg(feature = "sqlite-store")]
pub mod sqlite;

use futures::future::BoxFuture;

use crate::dao::models::{GameRecordEntity, NewGameRecordEntity, NewUserEntity, UserEntity};
use crate::dao::storage::StorageResult;

/// Abstraction over the persistence layer for user accounts and game records.
pub trait UserStore: Send + Sync {
    /// Short name of the backend, reported by the health endpoint.
    fn backend_name(&self) -> &'static str;
    /// Insert a new user. Returns `None` when the username is already taken.
    fn create_user(
        &self,
        user: NewUserEntity,
    ) -> BoxFuture<'static, StorageResult<Option<UserEntity>>>;
    /// Look a user up by exact username.
    fn find_user_by_username(
        &self,
        username: String,
    ) -> BoxFuture<'static, StorageResult<Option<UserEntity>>>;
    /// All users ordered by descending highscore; ties keep insertion order.
    fn list_users_by_highscore(&self) -> BoxFuture<'static, StorageResult<Vec<UserEntity>>>;
    /// Persist `candidate` as the user's highscore only when strictly greater
    /// than the stored value. A missing user or a lower candidate is a no-op.
    fn raise_highscore(
        &self,
        user_id: i64,
        candidate: i64,
    ) -> BoxFuture<'static, StorageResult<()>>;
    /// Append a game record and return it with its assigned id.
    fn append_game_record(
        &self,
        record: NewGameRecordEntity,
    ) -> BoxFuture<'static, StorageResult<GameRecordEntity>>;
    /// All game records for a user in insertion order. Unknown users yield an
    /// empty list.
    fn game_records_for_user(
        &self,
        user_id: i64,
    ) -> BoxFuture<'static, StorageResult<Vec<GameRecordEntity>>>;
    /// Cheap connectivity probe against the backend.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
    /// Re-establish the backend connection after a health check failure.
    fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>>;
}
