use async_trait::async_trait;
use tracing::warn;

use super::{or_fallback, FormHandler, SubmitOutcome};
use crate::console::view::{Tone, ViewElement, ViewSink};
use crate::domain::{ApplicationRequest, Reply};
use crate::infrastructure::backend::ConsoleClient;

const FAILURE: &str = "Error submitting the request.";

/// Selects the model and config file the backend application runs with
#[derive(Debug, Clone)]
pub struct ApplicationForm {
    pub model_name: String,
    pub config_path: String,
}

impl ApplicationForm {
    pub fn new(model_name: impl Into<String>, config_path: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            config_path: config_path.into(),
        }
    }
}

#[async_trait]
impl FormHandler for ApplicationForm {
    fn name(&self) -> &'static str {
        "application"
    }

    async fn submit(&self, client: &ConsoleClient, view: &dyn ViewSink) -> SubmitOutcome {
        let element = ViewElement::ApplicationResponse;

        if self.model_name.trim().is_empty() {
            view.render(element, "Model name is required.", Tone::Error);
            return SubmitOutcome::Invalid;
        }

        view.render(element, "Submitting...", Tone::Pending);

        let request = ApplicationRequest {
            model_name: self.model_name.trim().to_string(),
            config_path: self.config_path.trim().to_string(),
        };

        match client.submit_application(&request).await {
            Ok(Reply::Accepted(reply)) => {
                view.render(
                    element,
                    &or_fallback(reply.message, "Request submitted."),
                    Tone::Success,
                );
                SubmitOutcome::Succeeded
            }
            Ok(Reply::Rejected(rejection)) => {
                let text = or_fallback(
                    rejection.body.message_text().or_else(|| rejection.body.detail_text()),
                    FAILURE,
                );
                view.render(element, &text, Tone::Error);
                SubmitOutcome::Failed
            }
            Err(e) => {
                warn!(form = self.name(), error = %e, "Submission failed");
                view.render(element, FAILURE, Tone::Error);
                SubmitOutcome::Failed
            }
        }
    }
}
