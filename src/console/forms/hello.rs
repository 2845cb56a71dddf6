use async_trait::async_trait;
use tracing::warn;

use super::{FormHandler, SubmitOutcome};
use crate::console::view::{Tone, ViewElement, ViewSink};
use crate::domain::{HelloResponse, Reply};
use crate::infrastructure::backend::ConsoleClient;

const FAILURE: &str = "Failed to fetch app info.";

/// Shows the backend's name, version and greeting
#[derive(Debug, Clone, Default)]
pub struct AppInfoPanel;

impl AppInfoPanel {
    pub fn new() -> Self {
        Self
    }

    fn format(hello: &HelloResponse) -> String {
        let field = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());

        format!(
            "App Name: {}\nVersion: {}\nMessage: {}",
            field(&hello.app_name),
            field(&hello.version),
            field(&hello.message)
        )
    }
}

#[async_trait]
impl FormHandler for AppInfoPanel {
    fn name(&self) -> &'static str {
        "hello"
    }

    async fn submit(&self, client: &ConsoleClient, view: &dyn ViewSink) -> SubmitOutcome {
        view.render(ViewElement::AppInfo, "Loading...", Tone::Pending);

        match client.hello().await {
            Ok(Reply::Accepted(hello)) => {
                view.render(ViewElement::AppInfo, &Self::format(&hello), Tone::Neutral);
                SubmitOutcome::Succeeded
            }
            Ok(Reply::Rejected(rejection)) => {
                warn!(status = rejection.status, "App info request rejected");
                view.render(ViewElement::AppInfo, FAILURE, Tone::Error);
                SubmitOutcome::Failed
            }
            Err(e) => {
                warn!(error = %e, "Error fetching app info");
                view.render(ViewElement::AppInfo, FAILURE, Tone::Error);
                SubmitOutcome::Failed
            }
        }
    }
}
