//! Request/response bodies.

use serde::{Deserialize, Serialize};

use signet_core::SubjectId;

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub user_id: SubjectId,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MeResponse {
    pub user_id: SubjectId,
}
