use async_trait::async_trait;
use tracing::error;

use super::{or_fallback, FormHandler, SubmitOutcome};
use crate::console::view::{Tone, ViewElement, ViewSink};
use crate::domain::Reply;
use crate::infrastructure::backend::ConsoleClient;

const FAILURE: &str = "❌ Failed to connect to the server.";

/// Converts every stored chunk into an embedding
#[derive(Debug, Clone, Default)]
pub struct EmbeddingTrigger;

impl EmbeddingTrigger {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FormHandler for EmbeddingTrigger {
    fn name(&self) -> &'static str {
        "chunks_to_embedding"
    }

    async fn submit(&self, client: &ConsoleClient, view: &dyn ViewSink) -> SubmitOutcome {
        let element = ViewElement::EmbeddingResult;
        view.render(element, "Processing...", Tone::Pending);

        match client.chunks_to_embedding().await {
            Ok(Reply::Accepted(_)) => {
                view.render(element, "✅ Embedding conversion successful.", Tone::Success);
                SubmitOutcome::Succeeded
            }
            Ok(Reply::Rejected(rejection)) => {
                let reason = or_fallback(rejection.body.detail_text(), "Unknown error.");
                view.render(element, &format!("❌ Error: {}", reason), Tone::Error);
                SubmitOutcome::Failed
            }
            Err(e) => {
                error!(error = %e, "Embedding request failed");
                view.render(element, FAILURE, Tone::Error);
                SubmitOutcome::Failed
            }
        }
    }
}
