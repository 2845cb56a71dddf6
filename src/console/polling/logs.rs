use std::time::Duration;

use async_trait::async_trait;
use chrono::Local;
use tracing::warn;

use super::PollingWidget;
use crate::console::view::{Tone, ViewElement, ViewSink};
use crate::domain::Reply;
use crate::infrastructure::backend::ConsoleClient;

const FAILURE: &str = "Failed to fetch logs.";

/// Tail of the backend's log file
#[derive(Debug, Clone)]
pub struct LogsWidget {
    period: Duration,
}

impl LogsWidget {
    pub fn new(period: Duration) -> Self {
        Self { period }
    }

    /// Fetch and show the log text once; `false` when the fallback was shown
    pub async fn load(&self, client: &ConsoleClient, view: &dyn ViewSink) -> bool {
        match client.logs().await {
            Ok(Reply::Accepted(text)) => {
                view.render(ViewElement::LogOutput, &text, Tone::Neutral);
                view.render(
                    ViewElement::LastUpdated,
                    &format!("Last updated: {}", Local::now().format("%H:%M:%S")),
                    Tone::Pending,
                );
                true
            }
            Ok(Reply::Rejected(rejection)) => {
                warn!(status = rejection.status, "Log request rejected");
                view.render(ViewElement::LogOutput, FAILURE, Tone::Error);
                false
            }
            Err(e) => {
                warn!(error = %e, "Error fetching logs");
                view.render(ViewElement::LogOutput, FAILURE, Tone::Error);
                false
            }
        }
    }
}

#[async_trait]
impl PollingWidget for LogsWidget {
    fn name(&self) -> &'static str {
        "logs"
    }

    fn period(&self) -> Duration {
        self.period
    }

    async fn refresh(&self, client: &ConsoleClient, view: &dyn ViewSink) {
        self.load(client, view).await;
    }
}
