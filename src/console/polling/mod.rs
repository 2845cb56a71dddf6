//! Polling widgets: refresh a view element on a fixed period

mod logs;
mod monitoring;

pub use logs::LogsWidget;
pub use monitoring::MonitoringWidget;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::debug;

use super::scope::ViewScope;
use super::view::ViewSink;
use crate::infrastructure::backend::ConsoleClient;

/// A view element refreshed on a timer
#[async_trait]
pub trait PollingWidget: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    fn period(&self) -> Duration;

    /// One refresh. Failures are rendered, never returned.
    async fn refresh(&self, client: &ConsoleClient, view: &dyn ViewSink);
}

/// Run a widget until its scope is cancelled.
///
/// The first refresh fires immediately. Every tick runs as its own task, so a
/// slow reply may overlap the next tick. Cancelling the scope also drops any
/// refresh still waiting on the backend. `view` is written as given; pass a
/// `ScopedView` on the same scope to mute replies that race the cancel.
pub fn spawn_polling(
    widget: Arc<dyn PollingWidget>,
    client: ConsoleClient,
    view: Arc<dyn ViewSink>,
    scope: ViewScope,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(widget.period());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = scope.cancelled() => break,
                _ = ticker.tick() => {
                    let widget = widget.clone();
                    let client = client.clone();
                    let view = view.clone();
                    let scope = scope.clone();

                    tokio::spawn(async move {
                        tokio::select! {
                            _ = scope.cancelled() => {}
                            _ = widget.refresh(&client, view.as_ref()) => {}
                        }
                    });
                }
            }
        }

        debug!(widget = widget.name(), "Polling stopped");
    })
}
