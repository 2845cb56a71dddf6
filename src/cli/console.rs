//! Interactive console: type a page name to load it

use std::future::Future;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::info;

use super::{shutdown_signal, Session};
use crate::console::{FragmentRouter, Navigation, Page, SubmitOutcome, TerminalView, ViewSink};

/// A line typed at the prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    Go(Page),
    Help,
    Quit,
    Blank,
    Unknown,
}

fn parse_input(line: &str) -> Input {
    match line.trim() {
        "" => Input::Blank,
        "help" | "?" => Input::Help,
        "quit" | "exit" => Input::Quit,
        other => other.parse().map(Input::Go).unwrap_or(Input::Unknown),
    }
}

fn help_text() -> String {
    let pages: Vec<&str> = Page::ALL.iter().map(Page::key).collect();
    format!("Pages: {}\nCommands: help, quit", pages.join(", "))
}

/// Run until `quit`, end of input, or Ctrl+C.
///
/// Starts on the hello page.
pub async fn run(session: &Session) -> anyhow::Result<SubmitOutcome> {
    let view: Arc<dyn ViewSink> = Arc::new(TerminalView::new());
    let mut router = FragmentRouter::with_default_hooks(
        session.client.clone(),
        view.clone(),
        &session.config.polling,
        &session.config.monitoring,
    );

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    tokio::select! {
        _ = &mut shutdown => {
            router.leave();
            return Ok(SubmitOutcome::Succeeded);
        }
        _ = router.navigate(Page::Hello) => {}
    }

    drive(
        &mut router,
        view.as_ref(),
        BufReader::new(tokio::io::stdin()),
        shutdown,
    )
    .await?;

    Ok(SubmitOutcome::Succeeded)
}

/// Read page keys and navigate until `quit`, end of input or `shutdown`.
///
/// A navigation still waiting on the backend is abandoned on shutdown.
async fn drive<R, S>(
    router: &mut FragmentRouter,
    view: &dyn ViewSink,
    input: R,
    shutdown: S,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    S: Future<Output = ()>,
{
    let mut lines = input.lines();
    tokio::pin!(shutdown);

    loop {
        let line = tokio::select! {
            _ = &mut shutdown => break,
            line = lines.next_line() => line?,
        };

        let Some(line) = line else {
            break;
        };

        match parse_input(&line) {
            Input::Go(page) => {
                let navigation = tokio::select! {
                    _ = &mut shutdown => break,
                    navigation = router.navigate(page) => navigation,
                };
                if navigation == Navigation::Failed {
                    info!(%page, "Page unavailable");
                }
            }
            Input::Help => view.alert(&help_text()),
            Input::Quit => break,
            Input::Blank => {}
            Input::Unknown => view.alert(&format!("Unknown page '{}'\n{}", line.trim(), help_text())),
        }
    }

    router.leave();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::view::mock::RecordingView;
    use crate::console::ViewElement;
    use crate::infrastructure::backend::mock::{MockHttpClient, MOCK_BASE_URL};
    use crate::infrastructure::backend::ConsoleClient;
    use std::time::Duration;

    #[test]
    fn test_parse_input() {
        assert_eq!(parse_input("monitoring"), Input::Go(Page::Monitoring));
        assert_eq!(parse_input("  #logs "), Input::Go(Page::Logs));
        assert_eq!(parse_input("quit"), Input::Quit);
        assert_eq!(parse_input("?"), Input::Help);
        assert_eq!(parse_input(""), Input::Blank);
        assert_eq!(parse_input("settings"), Input::Unknown);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_abandons_stalled_navigation() {
        let mock = Arc::new(MockHttpClient::new().with_stall("/web/html/upload.html"));
        let client = ConsoleClient::new(mock.clone(), MOCK_BASE_URL);
        let view = Arc::new(RecordingView::new());
        let mut router = FragmentRouter::new(client, view.clone());
        let input: &[u8] = b"upload\nhelp\n";

        drive(
            &mut router,
            view.as_ref(),
            input,
            tokio::time::sleep(Duration::from_secs(5)),
        )
        .await
        .unwrap();

        assert_eq!(mock.count_for("/web/html/upload.html"), 1);
        assert_eq!(mock.released_count(), 1);
        assert!(view.alerts().is_empty());
        assert!(router.active_page().is_none());
    }

    #[tokio::test]
    async fn test_quit_stops_reading() {
        let mock = Arc::new(
            MockHttpClient::new().with_raw("/web/html/logs.html", 200, "<h2>Logs</h2>"),
        );
        let client = ConsoleClient::new(mock.clone(), MOCK_BASE_URL);
        let view = Arc::new(RecordingView::new());
        let mut router = FragmentRouter::new(client, view.clone());
        let input: &[u8] = b"logs\nsettings\nquit\nhello\n";

        drive(&mut router, view.as_ref(), input, std::future::pending())
            .await
            .unwrap();

        assert_eq!(mock.request_count(), 1);
        assert_eq!(view.alerts().len(), 1);
        assert!(view.alerts()[0].starts_with("Unknown page 'settings'"));
        assert_eq!(view.last_text(ViewElement::Container).unwrap(), "Logs");
    }

    #[test]
    fn test_help_lists_every_page() {
        let help = help_text();
        for page in Page::ALL {
            assert!(help.contains(page.key()));
        }
    }
}
