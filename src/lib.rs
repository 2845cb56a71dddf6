//! RAG Console
//!
//! Terminal admin console for a retrieval-augmented-generation backend:
//! - Document upload, chunking and embedding
//! - Model loading and LLM configuration (Hugging Face or llama.cpp)
//! - Chat memory management
//! - Live resource gauges and backend log tailing

pub mod cli;
pub mod config;
pub mod console;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
