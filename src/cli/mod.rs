//! CLI module for RAG Console
//!
//! One-shot subcommands submit a single form or fetch a single view:
//! - `hello`, `apply`, `upload`, `chunk`, `embed`, `chat`: form submissions
//! - `load`, `llm-config`: model loading and configuration files
//! - `logs`, `monitor`: polling widgets
//! - `console`: interactive page navigation

pub mod console;
pub mod forms;
pub mod model;
pub mod watch;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tokio::signal;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::console::{SubmitOutcome, TerminalView};
use crate::infrastructure::backend::ConsoleClient;
use crate::infrastructure::logging;

/// RAG Console - Terminal admin console for a RAG backend
#[derive(Parser)]
#[command(name = "rag-console")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Backend base URL (overrides configuration)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the backend's name, version and greeting
    Hello,

    /// Submit a model name and configuration path
    Apply(forms::ApplyArgs),

    /// Upload a document
    Upload(forms::UploadArgs),

    /// Split stored documents into chunks
    Chunk(forms::ChunkArgs),

    /// Embed the stored chunks
    Embed,

    /// Reset chat memory or remove stored data for a user
    Chat(forms::ChatArgs),

    /// Load a model into the backend
    Load(model::ModelArgs),

    /// Save a model configuration file on the backend
    LlmConfig(model::ModelArgs),

    /// Show the backend log
    Logs(watch::LogsArgs),

    /// Watch CPU, memory, disk and GPU usage
    Monitor,

    /// Navigate console pages interactively
    Console,
}

/// Loaded configuration plus a client built from it
pub struct Session {
    pub config: AppConfig,
    pub client: ConsoleClient,
    pub view: TerminalView,
}

impl Session {
    /// Load `.env` and configuration, install logging and build the client
    pub fn start(base_url: Option<String>) -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let loaded = AppConfig::load();
        let mut config = match &loaded {
            Ok(config) => config.clone(),
            Err(_) => AppConfig::default(),
        };

        if let Some(url) = base_url {
            config.backend.base_url = url;
        }

        logging::init_logging(&config.logging);

        if let Err(e) = loaded {
            warn!(error = %e, "Invalid configuration, using defaults");
        }

        let client = ConsoleClient::from_config(&config.backend)?;
        info!(base_url = %client.base_url(), "Backend client ready");

        Ok(Self {
            config,
            client,
            view: TerminalView::new(),
        })
    }
}

/// Dispatch a parsed command line
pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let session = Session::start(cli.base_url)?;

    let outcome = match cli.command {
        Command::Hello => forms::hello(&session).await,
        Command::Apply(args) => forms::apply(&session, args).await,
        Command::Upload(args) => forms::upload(&session, args).await,
        Command::Chunk(args) => forms::chunk(&session, args).await,
        Command::Embed => forms::embed(&session).await,
        Command::Chat(args) => forms::chat(&session, args).await,
        Command::Load(args) => model::load(&session, args).await,
        Command::LlmConfig(args) => model::save_config(&session, args).await,
        Command::Logs(args) => watch::logs(&session, args).await,
        Command::Monitor => watch::monitor(&session).await,
        Command::Console => console::run(&session).await?,
    };

    Ok(exit_code(outcome))
}

/// Non-zero unless the backend accepted the request
pub fn exit_code(outcome: SubmitOutcome) -> ExitCode {
    if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Resolves on Ctrl+C or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_base_url() {
        let cli = Cli::parse_from(["rag-console", "embed", "--base-url", "http://10.0.0.2:5000"]);
        assert_eq!(cli.base_url.as_deref(), Some("http://10.0.0.2:5000"));
        assert!(matches!(cli.command, Command::Embed));
    }
}
