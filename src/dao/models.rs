use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// Registered player account persisted by the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserEntity {
    /// Primary key assigned by the backend.
    pub id: i64,
    /// Unique login name chosen at registration.
    pub username: String,
    /// Argon2 hash (PHC string format) of the password.
    pub password_hash: String,
    /// Best score recorded so far; only ever increases.
    pub highscore: i64,
    /// Account creation timestamp.
    pub created_at: SystemTime,
}

/// Data required to create a user; the backend assigns id, timestamp and the
/// initial highscore of zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserEntity {
    /// Unique login name chosen at registration.
    pub username: String,
    /// Argon2 hash (PHC string format) of the password.
    pub password_hash: String,
}

/// Outcome of a single played game, persisted append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameRecordEntity {
    /// Primary key assigned by the backend.
    pub id: i64,
    /// Owning user id. Referential integrity is not enforced beyond presence.
    pub user_id: i64,
    /// Name of the game that was played.
    pub game: String,
    /// Opponent identifier (the browser client sends "pc").
    pub opponent: String,
    /// Identifier of the winning side.
    pub winner: String,
}

/// Data required to append a game record; the backend assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGameRecordEntity {
    /// Owning user id.
    pub user_id: i64,
    /// Name of the game that was played.
    pub game: String,
    /// Opponent identifier.
    pub opponent: String,
    /// Identifier of the winning side.
    pub winner: String,
}
