use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::sync::{RwLock, watch};
use tracing::warn;

use crate::{
    config::StoragePolicy,
    dao::{
        storage::StorageResult,
        user_store::{UserStore, memory::MemoryUserStore},
    },
    error::ServiceError,
};

/// Shared handle to the application state.
pub type SharedState = Arc<AppState>;

/// Central application state holding the storage backends and the configured
/// failure policy.
///
/// The primary store lives in an optional slot; the in-memory fallback store
/// is always present. Which one serves a given request is decided explicitly
/// in [`AppState::run_op`] rather than through hidden process-wide flags.
pub struct AppState {
    primary: RwLock<Option<Arc<dyn UserStore>>>,
    fallback: Arc<MemoryUserStore>,
    policy: StoragePolicy,
    degraded: watch::Sender<bool>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// The application starts in degraded mode until a primary store is installed.
    pub fn new(policy: StoragePolicy) -> SharedState {
        let (degraded_tx, _rx) = watch::channel(true);
        Arc::new(Self {
            primary: RwLock::new(None),
            fallback: Arc::new(MemoryUserStore::new()),
            policy,
            degraded: degraded_tx,
        })
    }

    /// Obtain a handle to the primary store, if one is installed.
    pub async fn primary_store(&self) -> Option<Arc<dyn UserStore>> {
        let guard = self.primary.read().await;
        guard.as_ref().cloned()
    }

    /// Install a primary store implementation and leave degraded mode.
    pub async fn install_primary(&self, store: Arc<dyn UserStore>) {
        {
            let mut guard = self.primary.write().await;
            *guard = Some(store);
        }
        self.update_degraded(false);
    }

    /// Remove the primary store and enter degraded mode.
    pub async fn clear_primary(&self) {
        {
            let mut guard = self.primary.write().await;
            guard.take();
        }
        self.update_degraded(true);
    }

    /// Whether the primary store is currently unavailable.
    pub async fn is_degraded(&self) -> bool {
        let guard = self.primary.read().await;
        guard.is_none()
    }

    /// Subscribe to degraded mode updates.
    pub fn degraded_watcher(&self) -> watch::Receiver<bool> {
        self.degraded.subscribe()
    }

    /// Configured storage failure policy.
    pub fn policy(&self) -> StoragePolicy {
        self.policy
    }

    /// The always-available in-memory fallback store as a trait object.
    pub fn fallback_store(&self) -> Arc<dyn UserStore> {
        self.fallback.clone()
    }

    /// Run a logical storage operation against the backend selected by the
    /// configured policy.
    ///
    /// Under [`StoragePolicy::Fallback`] a primary failure permanently clears
    /// the primary slot and the same operation is retried against the memory
    /// store, so the failing request itself succeeds. The switch is never
    /// reversed for the life of the process. Under [`StoragePolicy::Strict`]
    /// the failure propagates to the caller and recovery is left to the
    /// storage supervisor.
    pub async fn run_op<T, F>(&self, op: F) -> Result<T, ServiceError>
    where
        F: Fn(Arc<dyn UserStore>) -> BoxFuture<'static, StorageResult<T>>,
    {
        match self.primary_store().await {
            Some(primary) => match op(primary).await {
                Ok(value) => Ok(value),
                Err(err) => match self.policy {
                    StoragePolicy::Fallback => {
                        warn!(
                            error = %err,
                            "primary storage failed; switching to the in-memory fallback store"
                        );
                        self.clear_primary().await;
                        op(self.fallback_store()).await.map_err(Into::into)
                    }
                    StoragePolicy::Strict => Err(ServiceError::Unavailable(err)),
                },
            },
            None => match self.policy {
                StoragePolicy::Fallback => op(self.fallback_store()).await.map_err(Into::into),
                StoragePolicy::Strict => Err(ServiceError::Degraded),
            },
        }
    }

    /// Update and broadcast the degraded flag when the value changes.
    fn update_degraded(&self, value: bool) {
        self.degraded.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::{
        models::{GameRecordEntity, NewGameRecordEntity, NewUserEntity, UserEntity},
        storage::StorageError,
    };

    /// Store double whose every operation fails, standing in for a lost
    /// database connection.
    #[derive(Clone)]
    struct FailingStore;

    fn failure() -> StorageError {
        StorageError::unavailable(
            "connection lost".into(),
            std::io::Error::new(std::io::ErrorKind::BrokenPipe, "broken pipe"),
        )
    }

    impl UserStore for FailingStore {
        fn backend_name(&self) -> &'static str {
            "failing"
        }

        fn create_user(
            &self,
            _user: NewUserEntity,
        ) -> BoxFuture<'static, StorageResult<Option<UserEntity>>> {
            Box::pin(async { Err(failure()) })
        }

        fn find_user_by_username(
            &self,
            _username: String,
        ) -> BoxFuture<'static, StorageResult<Option<UserEntity>>> {
            Box::pin(async { Err(failure()) })
        }

        fn list_users_by_highscore(&self) -> BoxFuture<'static, StorageResult<Vec<UserEntity>>> {
            Box::pin(async { Err(failure()) })
        }

        fn raise_highscore(
            &self,
            _user_id: i64,
            _candidate: i64,
        ) -> BoxFuture<'static, StorageResult<()>> {
            Box::pin(async { Err(failure()) })
        }

        fn append_game_record(
            &self,
            _record: NewGameRecordEntity,
        ) -> BoxFuture<'static, StorageResult<GameRecordEntity>> {
            Box::pin(async { Err(failure()) })
        }

        fn game_records_for_user(
            &self,
            _user_id: i64,
        ) -> BoxFuture<'static, StorageResult<Vec<GameRecordEntity>>> {
            Box::pin(async { Err(failure()) })
        }

        fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
            Box::pin(async { Err(failure()) })
        }

        fn try_reconnect(&self) -> BoxFuture<'static, StorageResult<()>> {
            Box::pin(async { Err(failure()) })
        }
    }

    fn sample_user(name: &str) -> NewUserEntity {
        NewUserEntity {
            username: name.to_string(),
            password_hash: "$argon2id$stub".to_string(),
        }
    }

    #[tokio::test]
    async fn test_fallback_policy_retries_failed_request_in_memory() {
        let state = AppState::new(StoragePolicy::Fallback);
        state.install_primary(Arc::new(FailingStore)).await;
        assert!(!state.is_degraded().await);

        // The request that hits the failure still succeeds.
        let created = state
            .run_op(|store| store.create_user(sample_user("ona")))
            .await
            .unwrap();
        assert!(created.is_some());

        // The switch is permanent and observable.
        assert!(state.is_degraded().await);
        assert!(state.primary_store().await.is_none());

        // Subsequent operations are served by the memory store.
        let user = state
            .run_op(|store| store.find_user_by_username("ona".to_string()))
            .await
            .unwrap();
        assert!(user.is_some());
    }

    #[tokio::test]
    async fn test_strict_policy_surfaces_storage_failures() {
        let state = AppState::new(StoragePolicy::Strict);
        state.install_primary(Arc::new(FailingStore)).await;

        let result = state
            .run_op(|store| store.create_user(sample_user("ona")))
            .await;
        assert!(matches!(result, Err(ServiceError::Unavailable(_))));

        // Strict mode never swaps backends behind the caller's back.
        assert!(state.primary_store().await.is_some());
    }

    #[tokio::test]
    async fn test_strict_policy_without_primary_reports_degraded() {
        let state = AppState::new(StoragePolicy::Strict);
        let result = state.run_op(|store| store.list_users_by_highscore()).await;
        assert!(matches!(result, Err(ServiceError::Degraded)));
    }

    #[tokio::test]
    async fn test_degraded_watcher_flips_once() {
        let state = AppState::new(StoragePolicy::Fallback);
        let mut watcher = state.degraded_watcher();
        assert!(*watcher.borrow_and_update());

        state.install_primary(Arc::new(FailingStore)).await;
        assert!(!*watcher.borrow_and_update());

        let _ = state
            .run_op(|store| store.create_user(sample_user("ona")))
            .await;
        assert!(*watcher.borrow_and_update());
    }
}
