use std::time::SystemTime;

use sqlx::FromRow;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use super::error::{SqliteDaoError, SqliteResult};
use crate::dao::models::{GameRecordEntity, UserEntity};

/// Raw row shape of the `users` table.
#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub highscore: i64,
    pub created_at: String,
}

impl TryFrom<UserRow> for UserEntity {
    type Error = SqliteDaoError;

    fn try_from(row: UserRow) -> SqliteResult<Self> {
        let created_at = parse_timestamp(&row.created_at)?;
        Ok(Self {
            id: row.id,
            username: row.username,
            password_hash: row.password,
            highscore: row.highscore,
            created_at,
        })
    }
}

/// Raw row shape of the `game_history` table.
#[derive(Debug, FromRow)]
pub struct GameRecordRow {
    pub id: i64,
    pub user_id: i64,
    pub game: String,
    pub opponent: String,
    pub winner: String,
}

impl From<GameRecordRow> for GameRecordEntity {
    fn from(row: GameRecordRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            game: row.game,
            opponent: row.opponent,
            winner: row.winner,
        }
    }
}

/// Render a timestamp as the RFC 3339 string stored in the `created_at` column.
pub fn format_timestamp(time: SystemTime) -> String {
    OffsetDateTime::from(time)
        .format(&Rfc3339)
        .unwrap_or_else(|_| "invalid-timestamp".into())
}

fn parse_timestamp(value: &str) -> SqliteResult<SystemTime> {
    OffsetDateTime::parse(value, &Rfc3339)
        .map(SystemTime::from)
        .map_err(|source| SqliteDaoError::InvalidTimestamp {
            value: value.to_string(),
            source,
        })
}
