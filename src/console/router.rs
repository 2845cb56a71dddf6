//! Fragment router: swaps the container content on navigation

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::{info, warn};

use super::forms::{AppInfoPanel, FormHandler};
use super::fragment::render_fragment;
use super::polling::{spawn_polling, LogsWidget, MonitoringWidget};
use super::scope::ViewScope;
use super::view::{ScopedView, Tone, ViewElement, ViewSink};
use crate::config::{MonitoringConfig, PollingConfig};
use crate::domain::{DomainError, Reply};
use crate::infrastructure::backend::ConsoleClient;

/// Console pages, each backed by a static HTML fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Hello,
    Upload,
    ToChunks,
    ChunksToEmbedding,
    LlmsConfig,
    ChatManager,
    Monitoring,
    Logs,
}

impl Page {
    pub const ALL: [Page; 8] = [
        Page::Hello,
        Page::Upload,
        Page::ToChunks,
        Page::ChunksToEmbedding,
        Page::LlmsConfig,
        Page::ChatManager,
        Page::Monitoring,
        Page::Logs,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Hello => "hello",
            Self::Upload => "upload",
            Self::ToChunks => "to_chunks",
            Self::ChunksToEmbedding => "chunks_to_embedding",
            Self::LlmsConfig => "llms_config",
            Self::ChatManager => "chat_manager",
            Self::Monitoring => "monitoring",
            Self::Logs => "logs",
        }
    }

    pub fn fragment_path(&self) -> String {
        format!("/web/html/{}.html", self.key())
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Page {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().trim_start_matches('#');
        Self::ALL
            .iter()
            .find(|page| page.key() == key)
            .copied()
            .ok_or_else(|| DomainError::validation(format!("Unknown page '{}'", key)))
    }
}

/// What a post-load callback gets to work with
#[derive(Clone)]
pub struct FragmentContext {
    pub client: ConsoleClient,
    /// Writes through this view stop once the page is left
    pub view: Arc<dyn ViewSink>,
    pub scope: ViewScope,
}

/// Callback run after a fragment is shown
pub type InitHook = Arc<dyn Fn(FragmentContext) + Send + Sync>;

/// Result of a navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Loaded,
    Failed,
}

struct ActivePage {
    page: Page,
    scope: ViewScope,
}

/// Maps pages to fragments and owns the lifetime of the active page
pub struct FragmentRouter {
    client: ConsoleClient,
    view: Arc<dyn ViewSink>,
    hooks: HashMap<Page, InitHook>,
    active: Option<ActivePage>,
}

impl FragmentRouter {
    /// Router without any post-load callbacks
    pub fn new(client: ConsoleClient, view: Arc<dyn ViewSink>) -> Self {
        Self {
            client,
            view,
            hooks: HashMap::new(),
            active: None,
        }
    }

    /// Router wired like the console: hello loads app info, monitoring and
    /// logs start their widgets
    pub fn with_default_hooks(
        client: ConsoleClient,
        view: Arc<dyn ViewSink>,
        polling: &PollingConfig,
        monitoring: &MonitoringConfig,
    ) -> Self {
        let mut router = Self::new(client, view);

        router.on_load(
            Page::Hello,
            Arc::new(|ctx: FragmentContext| {
                tokio::spawn(async move {
                    let panel = AppInfoPanel::new();
                    tokio::select! {
                        _ = ctx.scope.cancelled() => {}
                        _ = panel.submit(&ctx.client, ctx.view.as_ref()) => {}
                    }
                });
            }),
        );

        let monitoring_widget = Arc::new(MonitoringWidget::new(
            polling.metrics_interval(),
            monitoring.clone(),
        ));
        router.on_load(
            Page::Monitoring,
            Arc::new(move |ctx: FragmentContext| {
                spawn_polling(monitoring_widget.clone(), ctx.client, ctx.view, ctx.scope);
            }),
        );

        let logs_widget = Arc::new(LogsWidget::new(polling.logs_interval()));
        router.on_load(
            Page::Logs,
            Arc::new(move |ctx: FragmentContext| {
                spawn_polling(logs_widget.clone(), ctx.client, ctx.view, ctx.scope);
            }),
        );

        router
    }

    /// Register (or replace) the callback of a page
    pub fn on_load(&mut self, page: Page, hook: InitHook) {
        self.hooks.insert(page, hook);
    }

    pub fn active_page(&self) -> Option<Page> {
        self.active.as_ref().map(|active| active.page)
    }

    /// Close the active page, stopping its timers and muting late replies
    pub fn leave(&mut self) {
        if let Some(active) = self.active.take() {
            active.scope.cancel();
            info!(page = %active.page, "Left page");
        }
    }

    /// Fetch and show a page's fragment, then run its callback.
    ///
    /// Fragments are never cached; navigating to the current page reloads it.
    pub async fn navigate(&mut self, page: Page) -> Navigation {
        self.leave();

        let scope = ViewScope::new();
        let view: Arc<dyn ViewSink> = Arc::new(ScopedView::new(self.view.clone(), scope.clone()));
        self.active = Some(ActivePage {
            page,
            scope: scope.clone(),
        });

        let loaded = match self.client.fragment(&page.fragment_path()).await {
            Ok(Reply::Accepted(html)) => Some(html),
            Ok(Reply::Rejected(rejection)) => {
                warn!(%page, status = rejection.status, "Fragment request rejected");
                None
            }
            Err(e) => {
                warn!(%page, error = %e, "Error loading fragment");
                None
            }
        };

        let Some(html) = loaded else {
            view.render(
                ViewElement::Container,
                &format!("Error loading {}", page),
                Tone::Error,
            );
            return Navigation::Failed;
        };

        view.render(ViewElement::Container, &render_fragment(&html), Tone::Neutral);
        info!(%page, "Page loaded");

        if let Some(hook) = self.hooks.get(&page) {
            hook(FragmentContext {
                client: self.client.clone(),
                view,
                scope,
            });
        }

        Navigation::Loaded
    }
}
