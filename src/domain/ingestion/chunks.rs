//! Chunking and embedding payloads

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/to_chunks`.
///
/// A missing `file_path` asks the backend to chunk every stored document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChunkRequest {
    pub file_path: Option<String>,
    pub do_reset: i64,
}

impl ChunkRequest {
    pub fn new(file_path: Option<String>, do_reset: i64) -> Self {
        let file_path = file_path
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());

        Self {
            file_path,
            do_reset,
        }
    }
}

/// Reply of `POST /api/to_chunks`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChunkResponse {
    #[serde(default)]
    pub inserted_chunks: Option<u64>,
    #[serde(default)]
    pub documents: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Reply of `POST /api/chunks_to_embedding`; any JSON object is accepted
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EmbeddingResponse {}
