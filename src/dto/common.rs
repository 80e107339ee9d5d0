use serde::Serialize;
use utoipa::ToSchema;

/// Plain acknowledgement body shared by the write endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Human readable confirmation.
    pub message: String,
}

impl MessageResponse {
    /// Build a response around a static confirmation message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
