use async_trait::async_trait;
use tracing::error;

use super::{or_fallback, FormHandler, SubmitOutcome};
use crate::console::view::{Tone, ViewElement, ViewSink};
use crate::domain::{ChatManageBody, ChatManageQuery, Reply};
use crate::infrastructure::backend::ConsoleClient;

const UNKNOWN: &str = "Unknown response.";
const FAILURE: &str = "Failed to submit request.";

/// Resets or clears a user's chat memory
#[derive(Debug, Clone, Default)]
pub struct ChatManageForm {
    pub query: ChatManageQuery,
    pub body: ChatManageBody,
}

impl ChatManageForm {
    pub fn new(query: ChatManageQuery, body: ChatManageBody) -> Self {
        Self { query, body }
    }
}

#[async_trait]
impl FormHandler for ChatManageForm {
    fn name(&self) -> &'static str {
        "chat_manager"
    }

    async fn submit(&self, client: &ConsoleClient, view: &dyn ViewSink) -> SubmitOutcome {
        let element = ViewElement::ChatResponse;

        match client.manage_chat(&self.query, &self.body).await {
            Ok(Reply::Accepted(reply)) => {
                view.render(element, &or_fallback(reply.message, UNKNOWN), Tone::Success);
                SubmitOutcome::Succeeded
            }
            Ok(Reply::Rejected(rejection)) => {
                view.render(
                    element,
                    &or_fallback(rejection.body.message_text(), UNKNOWN),
                    Tone::Error,
                );
                SubmitOutcome::Failed
            }
            Err(e) => {
                error!(error = %e, "Chat management request failed");
                view.render(element, FAILURE, Tone::Error);
                SubmitOutcome::Failed
            }
        }
    }
}
