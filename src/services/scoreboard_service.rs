use crate::{dto::scoreboard::ScoreboardEntry, error::ServiceError, state::SharedState};

/// All users as `(username, highscore)` pairs, sorted descending by highscore
/// with ties in insertion order.
pub async fn scoreboard(state: &SharedState) -> Result<Vec<ScoreboardEntry>, ServiceError> {
    let users = state
        .run_op(|store| store.list_users_by_highscore())
        .await?;
    Ok(users.into_iter().map(Into::into).collect())
}

/// Apply the strictly-greater highscore rule. Lower candidates and unknown
/// users are silent no-ops; the endpoint reports success either way.
pub async fn raise_highscore(
    state: &SharedState,
    user_id: i64,
    candidate: i64,
) -> Result<(), ServiceError> {
    state
        .run_op(move |store| store.raise_highscore(user_id, candidate))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoragePolicy;
    use crate::services::auth_service;
    use crate::state::{AppState, SharedState};

    async fn state_with_users(names: &[&str]) -> SharedState {
        let state = AppState::new(StoragePolicy::Fallback);
        for name in names {
            auth_service::register(&state, name.to_string(), "pw".to_string())
                .await
                .unwrap();
        }
        state
    }

    #[tokio::test]
    async fn test_scoreboard_sorted_descending() {
        let state = state_with_users(&["a", "b", "c"]).await;
        raise_highscore(&state, 1, 10).await.unwrap();
        raise_highscore(&state, 2, 30).await.unwrap();
        raise_highscore(&state, 3, 20).await.unwrap();

        let scores: Vec<i64> = scoreboard(&state)
            .await
            .unwrap()
            .into_iter()
            .map(|entry| entry.highscore)
            .collect();
        assert_eq!(scores, vec![30, 20, 10]);
    }

    #[tokio::test]
    async fn test_lower_candidate_changes_nothing() {
        let state = state_with_users(&["a", "b"]).await;
        raise_highscore(&state, 1, 50).await.unwrap();
        raise_highscore(&state, 2, 40).await.unwrap();

        let before: Vec<(String, i64)> = scoreboard(&state)
            .await
            .unwrap()
            .into_iter()
            .map(|entry| (entry.username, entry.highscore))
            .collect();

        // A lower candidate still reports success but is not persisted.
        raise_highscore(&state, 1, 10).await.unwrap();

        let after: Vec<(String, i64)> = scoreboard(&state)
            .await
            .unwrap()
            .into_iter()
            .map(|entry| (entry.username, entry.highscore))
            .collect();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_unknown_user_update_reports_success() {
        let state = state_with_users(&["a"]).await;
        raise_highscore(&state, 999, 100).await.unwrap();
        assert_eq!(scoreboard(&state).await.unwrap().len(), 1);
    }
}
