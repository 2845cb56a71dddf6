use async_trait::async_trait;
use tracing::{error, info};

use super::{or_fallback, FormHandler, SubmitOutcome};
use crate::console::view::{Tone, ViewElement, ViewSink};
use crate::domain::ingestion::parse_reset_flag;
use crate::domain::{ChunkRequest, ChunkResponse, Reply};
use crate::infrastructure::backend::ConsoleClient;

const FAILURE: &str = "❌ Failed to connect to the server.";

/// Splits stored documents into chunks.
///
/// Fields are kept as entered; an empty path chunks every document.
#[derive(Debug, Clone)]
pub struct ChunkForm {
    pub file_path: String,
    pub do_reset: String,
}

impl ChunkForm {
    pub fn new(file_path: impl Into<String>, do_reset: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            do_reset: do_reset.into(),
        }
    }

    fn format_success(reply: &ChunkResponse) -> String {
        let documents = reply
            .documents
            .as_ref()
            .and_then(|docs| serde_json::to_string_pretty(docs).ok())
            .unwrap_or_else(|| "[]".to_string());

        format!(
            "✅ {} chunks inserted.\n\nDocuments:\n{}",
            reply.inserted_chunks.unwrap_or(0),
            documents
        )
    }
}

#[async_trait]
impl FormHandler for ChunkForm {
    fn name(&self) -> &'static str {
        "to_chunks"
    }

    async fn submit(&self, client: &ConsoleClient, view: &dyn ViewSink) -> SubmitOutcome {
        let element = ViewElement::ChunkResult;

        let do_reset = match parse_reset_flag(&self.do_reset) {
            Ok(flag) => flag,
            Err(e) => {
                view.render(element, &format!("❌ {}", e), Tone::Error);
                return SubmitOutcome::Invalid;
            }
        };

        let request = ChunkRequest::new(Some(self.file_path.clone()), do_reset);
        view.render(element, "Processing...", Tone::Pending);
        info!(file_path = ?request.file_path, do_reset, "Requesting chunking");

        match client.to_chunks(&request).await {
            Ok(Reply::Accepted(reply)) => {
                view.render(element, &Self::format_success(&reply), Tone::Success);
                SubmitOutcome::Succeeded
            }
            Ok(Reply::Rejected(rejection)) => {
                let reason = or_fallback(rejection.body.message_text(), "Unknown error.");
                view.render(element, &format!("❌ Error: {}", reason), Tone::Error);
                SubmitOutcome::Failed
            }
            Err(e) => {
                error!(error = %e, "Chunking request failed");
                view.render(element, FAILURE, Tone::Error);
                SubmitOutcome::Failed
            }
        }
    }
}
