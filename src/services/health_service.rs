//! Derives the health payload from the state the request path already
//! maintains. The degraded flag is owned by [`AppState`]; re-pinging the
//! backend here would only race with the supervisor's own polling.
//!
//! [`AppState`]: crate::state::AppState

use crate::{config::StoragePolicy, dto::health::HealthResponse, state::SharedState};

/// Backend name reported while a strict-policy deployment has no store at all.
const NO_BACKEND: &str = "unavailable";

/// Current health payload: the degraded flag plus the name of whichever
/// backend is answering requests right now.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    match state.primary_store().await {
        Some(primary) => HealthResponse::operational(primary.backend_name()),
        None => match state.policy() {
            StoragePolicy::Fallback => {
                HealthResponse::degraded(state.fallback_store().backend_name())
            }
            StoragePolicy::Strict => HealthResponse::degraded(NO_BACKEND),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        dao::user_store::{UserStore, memory::MemoryUserStore},
        dto::health::HealthStatus,
        state::AppState,
    };

    #[tokio::test]
    async fn test_health_names_the_primary_backend() {
        let state = AppState::new(StoragePolicy::Fallback);
        state
            .install_primary(Arc::new(MemoryUserStore::new()) as Arc<dyn UserStore>)
            .await;

        let health = health_status(&state).await;
        assert_eq!(health.status, HealthStatus::Ok);
        assert_eq!(health.storage, "memory");
    }

    #[tokio::test]
    async fn test_fallback_policy_degrades_onto_the_memory_store() {
        let state = AppState::new(StoragePolicy::Fallback);

        let health = health_status(&state).await;
        assert_eq!(health.status, HealthStatus::Degraded);
        assert_eq!(health.storage, "memory");
    }

    #[tokio::test]
    async fn test_strict_policy_without_primary_has_no_backend() {
        let state = AppState::new(StoragePolicy::Strict);

        let health = health_status(&state).await;
        assert_eq!(health.status, HealthStatus::Degraded);
        assert_eq!(health.storage, "unavailable");
    }

    #[tokio::test]
    async fn test_health_payload_serializes_lowercase() {
        let state = AppState::new(StoragePolicy::Strict);
        let health = health_status(&state).await;

        let json = serde_json::to_value(&health).unwrap();
        assert_eq!(json["status"], "degraded");
        assert_eq!(json["storage"], "unavailable");
    }
}
