//! One-shot form submissions

use std::path::PathBuf;

use clap::Args;

use super::Session;
use crate::console::forms::{
    AppInfoPanel, ApplicationForm, ChatManageForm, ChunkForm, EmbeddingTrigger, UploadForm,
};
use crate::console::{FormHandler, SubmitOutcome};
use crate::domain::{ChatManageBody, ChatManageQuery};

/// Arguments for the apply command
#[derive(Args, Clone, Debug)]
pub struct ApplyArgs {
    /// Model to use for the application
    #[arg(long, default_value = "")]
    pub model_name: String,

    /// Configuration file path on the backend
    #[arg(long, default_value = "")]
    pub config_path: String,
}

/// Arguments for the upload command
#[derive(Args, Clone, Debug)]
pub struct UploadArgs {
    /// Document to upload
    pub file: Option<PathBuf>,
}

/// Arguments for the chunk command
#[derive(Args, Clone, Debug)]
pub struct ChunkArgs {
    /// Stored document to chunk; all documents when empty
    #[arg(long, default_value = "")]
    pub file_path: String,

    /// Drop existing chunks first (0 or 1)
    #[arg(long, default_value = "0")]
    pub reset: String,
}

/// Arguments for the chat command
#[derive(Args, Clone, Debug)]
pub struct ChatArgs {
    #[arg(long, default_value = "")]
    pub user_id: String,

    #[arg(long)]
    pub reset_memory: bool,

    #[arg(long)]
    pub clear_chat: bool,

    #[arg(long)]
    pub remove_chunks: bool,

    #[arg(long)]
    pub remove_embeddings: bool,

    #[arg(long)]
    pub remove_query_response: bool,

    #[arg(long)]
    pub reseting: bool,
}

impl From<ChatArgs> for ChatManageForm {
    fn from(args: ChatArgs) -> Self {
        ChatManageForm::new(
            ChatManageQuery {
                user_id: args.user_id,
                remove_chunks: args.remove_chunks,
                remove_embeddings: args.remove_embeddings,
                remove_query_response: args.remove_query_response,
                reseting: args.reseting,
            },
            ChatManageBody {
                reset_memory: args.reset_memory,
                clear_chat: args.clear_chat,
            },
        )
    }
}

/// Submit a handler against the session's client and terminal view
pub async fn submit(session: &Session, handler: &dyn FormHandler) -> SubmitOutcome {
    let outcome = handler.submit(&session.client, &session.view).await;
    tracing::debug!(form = handler.name(), ?outcome, "Form submitted");
    outcome
}

pub async fn hello(session: &Session) -> SubmitOutcome {
    submit(session, &AppInfoPanel::new()).await
}

pub async fn apply(session: &Session, args: ApplyArgs) -> SubmitOutcome {
    submit(session, &ApplicationForm::new(args.model_name, args.config_path)).await
}

pub async fn upload(session: &Session, args: UploadArgs) -> SubmitOutcome {
    submit(session, &UploadForm::new(args.file)).await
}

pub async fn chunk(session: &Session, args: ChunkArgs) -> SubmitOutcome {
    submit(session, &ChunkForm::new(args.file_path, args.reset)).await
}

pub async fn embed(session: &Session) -> SubmitOutcome {
    submit(session, &EmbeddingTrigger::new()).await
}

pub async fn chat(session: &Session, args: ChatArgs) -> SubmitOutcome {
    submit(session, &ChatManageForm::from(args)).await
}

#[cfg(test)]
mod tests {
    use crate::cli::{Cli, Command};
    use crate::console::forms::ChatManageForm;
    use clap::Parser;

    #[test]
    fn test_chat_flags() {
        let cli = Cli::parse_from([
            "rag-console",
            "chat",
            "--user-id",
            "u-7",
            "--clear-chat",
            "--remove-embeddings",
        ]);
        let Command::Chat(args) = cli.command else {
            panic!("expected chat command");
        };

        let form = ChatManageForm::from(args);
        assert_eq!(form.query.user_id, "u-7");
        assert!(form.query.remove_embeddings);
        assert!(!form.query.remove_chunks);
        assert!(form.body.clear_chat);
        assert!(!form.body.reset_memory);
    }

    #[test]
    fn test_chunk_defaults() {
        let cli = Cli::parse_from(["rag-console", "chunk"]);
        let Command::Chunk(args) = cli.command else {
            panic!("expected chunk command");
        };

        assert_eq!(args.file_path, "");
        assert_eq!(args.reset, "0");
    }

    #[test]
    fn test_upload_without_file() {
        let cli = Cli::parse_from(["rag-console", "upload"]);
        let Command::Upload(args) = cli.command else {
            panic!("expected upload command");
        };

        assert!(args.file.is_none());
    }
}
