//! Form submit handlers: validate, send one request, render the outcome

mod application;
mod chat;
mod chunks;
mod embedding;
mod hello;
mod llm_config;
mod model_load;
mod upload;

pub use application::ApplicationForm;
pub use chat::ChatManageForm;
pub use chunks::ChunkForm;
pub use embedding::EmbeddingTrigger;
pub use hello::AppInfoPanel;
pub use llm_config::LlmConfigForm;
pub use model_load::ModelLoadForm;
pub use upload::UploadForm;

use async_trait::async_trait;

use super::view::ViewSink;
use crate::infrastructure::backend::ConsoleClient;

/// How a submission ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Rejected locally; nothing was sent
    Invalid,
    /// The backend accepted the request
    Succeeded,
    /// Transport failure, undecodable reply, or non-2xx
    Failed,
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

/// A form that can be submitted against the backend
#[async_trait]
pub trait FormHandler: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    async fn submit(&self, client: &ConsoleClient, view: &dyn ViewSink) -> SubmitOutcome;
}

/// Backend text when present and non-empty, otherwise the fallback
pub(crate) fn or_fallback(text: Option<String>, fallback: &str) -> String {
    text.filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}
