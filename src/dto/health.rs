use serde::Serialize;
use utoipa::ToSchema;

/// Overall service condition reported by `/healthcheck`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// The configured primary store is serving requests.
    Ok,
    /// The primary store is gone; requests run against the fallback or fail.
    Degraded,
}

/// Payload of the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service condition.
    pub status: HealthStatus,
    /// Name of the storage backend currently answering requests.
    pub storage: String,
}

impl HealthResponse {
    /// Report a healthy service backed by the named store.
    pub fn operational(backend: &str) -> Self {
        Self {
            status: HealthStatus::Ok,
            storage: backend.to_string(),
        }
    }

    /// Report a degraded service, naming whatever backend (if any) still
    /// answers requests.
    pub fn degraded(backend: &str) -> Self {
        Self {
            status: HealthStatus::Degraded,
            storage: backend.to_string(),
        }
    }
}
