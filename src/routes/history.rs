use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    dto::{
        common::MessageResponse,
        history::{GameRecordInput, GameRecordView},
    },
    error::AppError,
    services::history_service,
    state::SharedState,
};

/// Routes handling the append-only game history.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/game_history", post(append_game_record))
        .route("/game_history/{user_id}", get(get_game_history))
}

/// Append a game outcome for a user.
#[utoipa::path(
    post,
    path = "/game_history",
    tag = "history",
    request_body = GameRecordInput,
    responses((status = 201, description = "Game history added", body = MessageResponse))
)]
pub async fn append_game_record(
    State(state): State<SharedState>,
    Json(payload): Json<GameRecordInput>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    history_service::append_record(&state, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Game history added")),
    ))
}

/// Return all recorded games for a user in storage order.
#[utoipa::path(
    get,
    path = "/game_history/{user_id}",
    tag = "history",
    params(("user_id" = i64, Path, description = "Id of the user whose history to list")),
    responses((status = 200, description = "Recorded games, possibly empty", body = [GameRecordView]))
)]
pub async fn get_game_history(
    State(state): State<SharedState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<GameRecordView>>, AppError> {
    let records = history_service::records_for_user(&state, user_id).await?;
    Ok(Json(records))
}
