use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::dao::models::UserEntity;

/// Single row of the `GET /scoreboard` response, ordered by the backend.
#[derive(Debug, Serialize, ToSchema)]
pub struct ScoreboardEntry {
    /// Login name of the user.
    pub username: String,
    /// Best recorded score.
    pub highscore: i64,
}

impl From<UserEntity> for ScoreboardEntry {
    fn from(entity: UserEntity) -> Self {
        Self {
            username: entity.username,
            highscore: entity.highscore,
        }
    }
}

/// Payload for `POST /update_highscore`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct HighscoreUpdateRequest {
    /// Id of the user whose highscore may be raised.
    pub user_id: i64,
    /// Candidate score; applied only when strictly greater than the stored
    /// value.
    pub highscore: i64,
}
