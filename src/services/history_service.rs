use crate::{
    dao::models::NewGameRecordEntity,
    dto::history::{GameRecordInput, GameRecordView},
    error::ServiceError,
    state::SharedState,
};

/// Append a game outcome to the history. Records are append-only; nothing
/// beyond field presence is checked, including whether the user exists.
pub async fn append_record(
    state: &SharedState,
    input: GameRecordInput,
) -> Result<(), ServiceError> {
    let record = NewGameRecordEntity {
        user_id: input.user_id,
        game: input.game,
        opponent: input.opponent,
        winner: input.winner,
    };

    state
        .run_op(move |store| store.append_game_record(record.clone()))
        .await?;
    Ok(())
}

/// All recorded games for a user in storage order. Unknown users get an empty
/// list rather than an error.
pub async fn records_for_user(
    state: &SharedState,
    user_id: i64,
) -> Result<Vec<GameRecordView>, ServiceError> {
    let records = state
        .run_op(move |store| store.game_records_for_user(user_id))
        .await?;
    Ok(records.into_iter().map(Into::into).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoragePolicy;
    use crate::state::AppState;

    fn record(user_id: i64, game: &str) -> GameRecordInput {
        GameRecordInput {
            user_id,
            game: game.to_string(),
            opponent: "pc".to_string(),
            winner: "pc".to_string(),
        }
    }

    #[tokio::test]
    async fn test_append_and_read_back_in_order() {
        let state = AppState::new(StoragePolicy::Fallback);
        append_record(&state, record(1, "snake")).await.unwrap();
        append_record(&state, record(1, "tetris")).await.unwrap();
        append_record(&state, record(2, "pong")).await.unwrap();

        let games: Vec<String> = records_for_user(&state, 1)
            .await
            .unwrap()
            .into_iter()
            .map(|view| view.game)
            .collect();
        assert_eq!(games, vec!["snake", "tetris"]);
    }

    #[tokio::test]
    async fn test_user_without_records_gets_empty_list() {
        let state = AppState::new(StoragePolicy::Fallback);
        let records = records_for_user(&state, 42).await.unwrap();
        assert!(records.is_empty());
    }
}
