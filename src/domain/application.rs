//! Application model/config selection payloads

use serde::{Deserialize, Serialize};

/// Body of `POST /application`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationRequest {
    pub model_name: String,
    pub config_path: String,
}

/// Replies that only carry a human readable `message`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}
