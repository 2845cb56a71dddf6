//! Polling commands: run a widget until interrupted

use std::sync::Arc;

use clap::Args;
use tracing::{info, warn};

use super::{shutdown_signal, Session};
use crate::console::polling::{LogsWidget, MonitoringWidget};
use crate::console::{
    spawn_polling, PollingWidget, ScopedView, SubmitOutcome, TerminalView, ViewScope,
};

/// Arguments for the logs command
#[derive(Args, Clone, Debug)]
pub struct LogsArgs {
    /// Keep refreshing until interrupted
    #[arg(long)]
    pub follow: bool,
}

/// `logs [--follow]`
pub async fn logs(session: &Session, args: LogsArgs) -> SubmitOutcome {
    let widget = LogsWidget::new(session.config.polling.logs_interval());

    if !args.follow {
        return if widget.load(&session.client, &session.view).await {
            SubmitOutcome::Succeeded
        } else {
            SubmitOutcome::Failed
        };
    }

    watch(session, Arc::new(widget)).await
}

/// `monitor`
pub async fn monitor(session: &Session) -> SubmitOutcome {
    let widget = MonitoringWidget::new(
        session.config.polling.metrics_interval(),
        session.config.monitoring.clone(),
    );

    watch(session, Arc::new(widget)).await
}

async fn watch(session: &Session, widget: Arc<dyn PollingWidget>) -> SubmitOutcome {
    let scope = ViewScope::new();
    info!(
        widget = widget.name(),
        period_secs = widget.period().as_secs(),
        "Polling started, press Ctrl+C to stop"
    );

    let view = ScopedView::new(Arc::new(TerminalView::new()), scope.clone());
    let handle = spawn_polling(widget, session.client.clone(), Arc::new(view), scope.clone());

    shutdown_signal().await;
    scope.cancel();

    if let Err(e) = handle.await {
        warn!(error = %e, "Polling task ended abnormally");
        return SubmitOutcome::Failed;
    }

    SubmitOutcome::Succeeded
}
