use async_trait::async_trait;
use tracing::{error, info};

use super::{or_fallback, FormHandler, SubmitOutcome};
use crate::console::view::{Tone, ViewElement, ViewSink};
use crate::domain::model::validate_model_settings;
use crate::domain::{ModelSettings, Reply};
use crate::infrastructure::backend::ConsoleClient;

/// Loads a model into the backend with the chosen loader
#[derive(Debug, Clone)]
pub struct ModelLoadForm {
    pub settings: ModelSettings,
}

impl ModelLoadForm {
    pub fn new(settings: ModelSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl FormHandler for ModelLoadForm {
    fn name(&self) -> &'static str {
        "llms_config"
    }

    async fn submit(&self, client: &ConsoleClient, view: &dyn ViewSink) -> SubmitOutcome {
        let element = ViewElement::ModelStatus;

        if let Err(e) = validate_model_settings(&self.settings) {
            view.render(element, &e.to_string(), Tone::Error);
            return SubmitOutcome::Invalid;
        }

        view.render(element, "Submitting...", Tone::Pending);
        info!(load_type = %self.settings.load_type(), "Loading model");

        match client.load_model(&self.settings).await {
            Ok(Reply::Accepted(reply)) => {
                view.render(
                    element,
                    &or_fallback(reply.message, "Model initialized successfully."),
                    Tone::Success,
                );
                SubmitOutcome::Succeeded
            }
            Ok(Reply::Rejected(rejection)) => {
                view.render(
                    element,
                    &or_fallback(
                        rejection.body.detail_text(),
                        "Error applying model settings.",
                    ),
                    Tone::Error,
                );
                SubmitOutcome::Failed
            }
            Err(e) => {
                error!(error = %e, "Model load request failed");
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
