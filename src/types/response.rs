//! Shared response envelopes for the HTTP API.

use serde::Serialize;
use utoipa::ToSchema;

/// Message-only response for mutation confirmations
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable confirmation
    #[schema(example = "New user alice created")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
