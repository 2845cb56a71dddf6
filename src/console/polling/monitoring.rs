use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use tracing::warn;

use super::PollingWidget;
use crate::config::MonitoringConfig;
use crate::console::view::{Tone, ViewElement, ViewSink};
use crate::domain::{Metric, Reply};
use crate::infrastructure::backend::ConsoleClient;

const UNAVAILABLE: &str = "N/A";

/// CPU, memory, disk and GPU gauges
#[derive(Debug, Clone)]
pub struct MonitoringWidget {
    period: Duration,
    thresholds: MonitoringConfig,
}

impl MonitoringWidget {
    pub fn new(period: Duration, thresholds: MonitoringConfig) -> Self {
        Self { period, thresholds }
    }

    /// Fetch one metric and write its gauge
    pub async fn refresh_metric(&self, client: &ConsoleClient, view: &dyn ViewSink, metric: Metric) {
        let element = ViewElement::Gauge(metric);

        match client.usage(metric).await {
            Ok(Reply::Accepted(reading)) => {
                let tone = if reading.exceeds(self.thresholds.threshold(metric)) {
                    Tone::Warning
                } else {
                    Tone::Neutral
                };
                view.render(element, &reading.label(), tone);
            }
            Ok(Reply::Rejected(rejection)) => {
                warn!(%metric, status = rejection.status, "Usage request rejected");
                view.render(element, UNAVAILABLE, Tone::Error);
            }
            Err(e) => {
                warn!(%metric, error = %e, "Error fetching usage");
                view.render(element, UNAVAILABLE, Tone::Error);
            }
        }
    }
}

#[async_trait]
impl PollingWidget for MonitoringWidget {
    fn name(&self) -> &'static str {
        "monitoring"
    }

    fn period(&self) -> Duration {
        self.period
    }

    async fn refresh(&self, client: &ConsoleClient, view: &dyn ViewSink) {
        join_all(
            Metric::ALL
                .iter()
                .map(|metric| self.refresh_metric(client, view, *metric)),
        )
        .await;
    }
}
