use async_trait::async_trait;
use tracing::{error, info};

use super::{or_fallback, FormHandler, SubmitOutcome};
use crate::console::view::{Tone, ViewElement, ViewSink};
use crate::domain::model::validate_model_settings;
use crate::domain::{LlmConfigResponse, ModelSettings, Reply};
use crate::infrastructure::backend::ConsoleClient;

/// Stores a model configuration file on the backend without loading it
#[derive(Debug, Clone)]
pub struct LlmConfigForm {
    pub settings: ModelSettings,
}

impl LlmConfigForm {
    pub fn new(settings: ModelSettings) -> Self {
        Self { settings }
    }

    fn format_success(reply: LlmConfigResponse) -> String {
        let message = or_fallback(reply.message, "Model configuration saved.");

        match reply.file.filter(|f| !f.is_empty()) {
            Some(file) => format!("{}\nSaved to: {}", message, file),
            None => message,
        }
    }
}

#[async_trait]
impl FormHandler for LlmConfigForm {
    fn name(&self) -> &'static str {
        "llms_config_save"
    }

    async fn submit(&self, client: &ConsoleClient, view: &dyn ViewSink) -> SubmitOutcome {
        let element = ViewElement::LlmConfigStatus;

        if let Err(e) = validate_model_settings(&self.settings) {
            view.render(element, &e.to_string(), Tone::Error);
            return SubmitOutcome::Invalid;
        }

        view.render(element, "Submitting...", Tone::Pending);
        info!(backend = self.settings.backend().config_route(), "Saving model configuration");

        match client.save_llm_config(&self.settings).await {
            Ok(Reply::Accepted(reply)) if reply.status.as_deref() != Some("error") => {
                view.render(element, &Self::format_success(reply), Tone::Success);
                SubmitOutcome::Succeeded
            }
            Ok(Reply::Accepted(reply)) => {
                view.render(
                    element,
                    &or_fallback(reply.message, "Error saving model configuration."),
                    Tone::Error,
                );
                SubmitOutcome::Failed
            }
            Ok(Reply::Rejected(rejection)) => {
                view.render(
                    element,
                    &or_fallback(rejection.body.reason(), "Error saving model configuration."),
                    Tone::Error,
                );
                SubmitOutcome::Failed
            }
            Err(e) => {
                error!(error = %e, "Saving model configuration failed");
                view.render(
                    element,
                    &format!("Network or parsing error: {}", e),
                    Tone::Error,
                );
                SubmitOutcome::Failed
            }
        }
    }
}
