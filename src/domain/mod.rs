//! Domain layer - Backend payloads, routes and errors

pub mod application;
pub mod chat;
pub mod endpoint;
pub mod error;
pub mod health;
pub mod hello;
pub mod ingestion;
pub mod model;
pub mod reply;

pub use application::{ApplicationRequest, MessageResponse};
pub use chat::{ChatManageBody, ChatManageQuery};
pub use endpoint::{Endpoint, HttpMethod};
pub use error::DomainError;
pub use health::{Metric, UsagePayload, UsageReading};
pub use hello::HelloResponse;
pub use ingestion::{ChunkRequest, ChunkResponse, EmbeddingResponse, UploadFile, UploadResponse};
pub use model::{
    HuggingFaceSettings, LlamaCppSettings, LlmConfigResponse, LoadType, ModelBackend,
    ModelLoadRequest, ModelSettings,
};
pub use reply::{ErrorBody, Rejection, Reply};
