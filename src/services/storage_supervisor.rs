use std::{future::Future, sync::Arc, time::Duration};

use tokio::time::sleep;
use tracing::{info, warn};

use crate::{
    dao::{storage::StorageError, user_store::UserStore},
    state::SharedState,
};

const INITIAL_DELAY: Duration = Duration::from_millis(1_000);
const MAX_DELAY: Duration = Duration::from_secs(10);
const HEALTH_POLL_INTERVAL: Duration = Duration::from_secs(5);
const MAX_RECONNECT_ATTEMPTS: u32 = 3;

/// Keep the primary store connected under the strict policy.
///
/// Connects, polls health, and attempts a bounded number of reconnects when
/// the backend goes away; while no healthy connection exists the shared state
/// stays in degraded mode and requests fail with generic server errors.
pub async fn run<F, Fut>(state: SharedState, mut connect: F)
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<Arc<dyn UserStore>, StorageError>> + Send,
{
    let mut delay = INITIAL_DELAY;

    loop {
        match connect().await {
            Ok(store) => {
                state.install_primary(store.clone()).await;
                info!("primary storage connected; leaving degraded mode");
                delay = INITIAL_DELAY;

                watch_store(&state, store).await;

                // The store was cleared after exhausting reconnect attempts;
                // fall through to a fresh connection cycle.
                sleep(delay).await;
                delay = (delay * 2).min(MAX_DELAY);
            }
            Err(err) => {
                warn!(error = %err, "primary storage connection attempt failed");
                sleep(delay).await;
                delay = (delay * 2).min(MAX_DELAY);
            }
        }
    }
}

/// Poll the installed store until it fails beyond recovery, then clear it.
async fn watch_store(state: &SharedState, store: Arc<dyn UserStore>) {
    loop {
        match store.health_check().await {
            Ok(()) => sleep(HEALTH_POLL_INTERVAL).await,
            Err(err) => {
                warn!(error = %err, "primary storage health check failed; entering degraded mode");
                state.clear_primary().await;

                if try_reconnect(store.as_ref()).await {
                    info!("primary storage reconnected; leaving degraded mode");
                    state.install_primary(store.clone()).await;
                    sleep(HEALTH_POLL_INTERVAL).await;
                    continue;
                }

                warn!("exhausted primary storage reconnect attempts; staying in degraded mode");
                return;
            }
        }
    }
}

async fn try_reconnect(store: &dyn UserStore) -> bool {
    let mut delay = INITIAL_DELAY;
    for attempt in 0..MAX_RECONNECT_ATTEMPTS {
        match store.try_reconnect().await {
            Ok(()) => return true,
            Err(err) => {
                warn!(attempt, error = %err, "primary storage reconnect attempt failed");
                sleep(delay).await;
                delay = (delay * 2).min(MAX_DELAY);
            }
        }
    }
    false
}
