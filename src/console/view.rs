//! Typed view bindings and the sinks that display them

use std::io::Write;
use std::sync::{Arc, Mutex};

use colored::Colorize;
use tracing::debug;

use super::scope::ViewScope;
use crate::domain::Metric;

/// Every place the console writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewElement {
    /// Fragment container
    Container,
    ApplicationResponse,
    AppInfo,
    UploadResult,
    ChunkResult,
    EmbeddingResult,
    ChatResponse,
    ModelStatus,
    LlmConfigStatus,
    LogOutput,
    LastUpdated,
    Gauge(Metric),
}

impl ViewElement {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Container => "content",
            Self::ApplicationResponse => "response",
            Self::AppInfo => "result",
            Self::UploadResult => "uploadResult",
            Self::ChunkResult => "chunkResult",
            Self::EmbeddingResult => "embeddingResult",
            Self::ChatResponse => "responseBox",
            Self::ModelStatus => "successMessage",
            Self::LlmConfigStatus => "configStatus",
            Self::LogOutput => "log-output",
            Self::LastUpdated => "last-updated",
            Self::Gauge(metric) => metric.as_str(),
        }
    }
}

/// How a piece of text should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Pending,
    Success,
    Warning,
    Error,
}

/// Destination of every view update
pub trait ViewSink: Send + Sync {
    /// Replace the content of an element
    fn render(&self, element: ViewElement, text: &str, tone: Tone);

    /// Blocking notice for the operator
    fn alert(&self, message: &str);
}

/// Writes view updates to stdout
#[derive(Debug, Default)]
pub struct TerminalView {
    lock: Mutex<()>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    fn gauge_bar(text: &str) -> String {
        const WIDTH: usize = 20;

        let filled = text
            .trim_end_matches('%')
            .parse::<f64>()
            .map(|p| ((p.clamp(0.0, 100.0) / 100.0) * WIDTH as f64).round() as usize)
            .unwrap_or(0);

        format!("[{}{}]", "#".repeat(filled), ".".repeat(WIDTH - filled))
    }

    fn paint(text: &str, tone: Tone) -> String {
        match tone {
            Tone::Neutral => text.to_string(),
            Tone::Pending => text.dimmed().to_string(),
            Tone::Success => text.green().to_string(),
            Tone::Warning => text.yellow().to_string(),
            Tone::Error => text.red().to_string(),
        }
    }
}

impl ViewSink for TerminalView {
    fn render(&self, element: ViewElement, text: &str, tone: Tone) {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut out = std::io::stdout().lock();

        let _ = match element {
            ViewElement::Container => writeln!(out, "\n{}\n", Self::paint(text, tone)),
            ViewElement::Gauge(metric) => writeln!(
                out,
                "{:<7} {} {}",
                metric.as_str(),
                Self::gauge_bar(text),
                Self::paint(text, tone)
            ),
            other => writeln!(
                out,
                "{} {}",
                format!("[{}]", other.label()).bold(),
                Self::paint(text, tone)
            ),
        };
    }

    fn alert(&self, message: &str) {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let _ = writeln!(std::io::stdout().lock(), "{} {}", "!".yellow().bold(), message);
    }
}

/// Forwards updates only while its scope is live, so replies that land
/// after navigation never reach the new view.
pub struct ScopedView {
    inner: Arc<dyn ViewSink>,
    scope: ViewScope,
}

impl ScopedView {
    pub fn new(inner: Arc<dyn ViewSink>, scope: ViewScope) -> Self {
        Self { inner, scope }
    }
}

impl ViewSink for ScopedView {
    fn render(&self, element: ViewElement, text: &str, tone: Tone) {
        let Some(_live) = self.scope.enter() else {
            debug!(element = element.label(), "Dropping write to a closed view");
            return;
        };

        self.inner.render(element, text, tone);
    }

    fn alert(&self, message: &str) {
        if let Some(_live) = self.scope.enter() {
            self.inner.alert(message);
        }
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;

    /// Sink recording every update for assertions
    #[derive(Debug, Default)]
    pub struct RecordingView {
        renders: Mutex<Vec<(ViewElement, String, Tone)>>,
        alerts: Mutex<Vec<String>>,
    }

    impl RecordingView {
        pub fn new() -> Self {
            Self::default()
        }

        /// Latest text and tone written to an element
        pub fn last(&self, element: ViewElement) -> Option<(String, Tone)> {
            self.renders
                .lock()
                .unwrap()
                .iter()
                .rev()
                .find(|(e, _, _)| *e == element)
                .map(|(_, text, tone)| (text.clone(), *tone))
        }

        pub fn last_text(&self, element: ViewElement) -> Option<String> {
            self.last(element).map(|(text, _)| text)
        }

        /// Every text written to an element, oldest first
        pub fn history(&self, element: ViewElement) -> Vec<String> {
            self.renders
                .lock()
                .unwrap()
                .iter()
                .filter(|(e, _, _)| *e == element)
                .map(|(_, text, _)| text.clone())
                .collect()
        }

        pub fn alerts(&self) -> Vec<String> {
            self.alerts.lock().unwrap().clone()
        }
    }

    impl ViewSink for RecordingView {
        fn render(&self, element: ViewElement, text: &str, tone: Tone) {
            self.renders
                .lock()
                .unwrap()
                .push((element, text.to_string(), tone));
        }

        fn alert(&self, message: &str) {
            self.alerts.lock().unwrap().push(message.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::RecordingView;
    use super::*;

    #[test]
    fn test_gauge_bar() {
        assert_eq!(TerminalView::gauge_bar("50%"), format!("[{}{}]", "#".repeat(10), ".".repeat(10)));
        assert_eq!(TerminalView::gauge_bar("N/A"), format!("[{}]", ".".repeat(20)));
        assert_eq!(TerminalView::gauge_bar("140%"), format!("[{}]", "#".repeat(20)));
    }

    #[test]
    fn test_scoped_view_drops_writes_after_cancel() {
        let inner = Arc::new(RecordingView::new());
        let scope = ViewScope::new();
        let view = ScopedView::new(inner.clone(), scope.clone());

        view.render(ViewElement::LogOutput, "first", Tone::Neutral);
        scope.cancel();
        view.render(ViewElement::LogOutput, "late", Tone::Neutral);
        view.alert("late alert");

        assert_eq!(inner.history(ViewElement::LogOutput), vec!["first".to_string()]);
        assert!(inner.alerts().is_empty());
    }

    #[test]
    fn test_labels_follow_page_ids() {
        assert_eq!(ViewElement::Gauge(Metric::Cpu).label(), "cpu");
        assert_eq!(ViewElement::ChunkResult.label(), "chunkResult");
    }
}
