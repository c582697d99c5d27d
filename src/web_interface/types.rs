use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::types::Animal;

/// `{message}` payload used for every error response and for delete
/// confirmations, which share the same shape.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}

/// Body of `POST /api/facts`. `text` stays optional so a missing field
/// reaches the validation branch instead of failing body deserialization.
#[derive(Debug, Deserialize)]
pub struct CreateFactRequest {
    pub text: Option<String>,
    pub animal: Option<Animal>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub backend_connected: bool,
    pub timestamp: DateTime<Utc>,
}
