//! Document ingestion payloads: upload, chunking and embedding

pub mod chunks;
pub mod upload;
pub mod validation;

pub use chunks::{ChunkRequest, ChunkResponse, EmbeddingResponse};
pub use upload::{UploadFile, UploadResponse};
pub use validation::{parse_reset_flag, validate_upload_name};
