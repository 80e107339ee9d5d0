use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    dto::{
        common::MessageResponse,
        scoreboard::{HighscoreUpdateRequest, ScoreboardEntry},
    },
    error::AppError,
    services::scoreboard_service,
    state::SharedState,
};

/// Routes exposing the scoreboard and the highscore update.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/scoreboard", get(get_scoreboard))
        .route("/update_highscore", post(update_highscore))
}

/// Return every user with their highscore, best first.
#[utoipa::path(
    get,
    path = "/scoreboard",
    tag = "scoreboard",
    responses((status = 200, description = "Users sorted by descending highscore", body = [ScoreboardEntry]))
)]
pub async fn get_scoreboard(
    State(state): State<SharedState>,
) -> Result<Json<Vec<ScoreboardEntry>>, AppError> {
    let entries = scoreboard_service::scoreboard(&state).await?;
    Ok(Json(entries))
}

/// Raise a user's highscore when the candidate beats the stored value.
#[utoipa::path(
    post,
    path = "/update_highscore",
    tag = "scoreboard",
    request_body = HighscoreUpdateRequest,
    responses((status = 200, description = "Update acknowledged", body = MessageResponse))
)]
pub async fn update_highscore(
    State(state): State<SharedState>,
    Json(payload): Json<HighscoreUpdateRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    scoreboard_service::raise_highscore(&state, payload.user_id, payload.highscore).await?;
    Ok(Json(MessageResponse::new("Highscore updated")))
}
