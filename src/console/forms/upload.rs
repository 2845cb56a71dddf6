use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{error, info};

use super::{or_fallback, FormHandler, SubmitOutcome};
use crate::console::view::{Tone, ViewElement, ViewSink};
use crate::domain::ingestion::validate_upload_name;
use crate::domain::{DomainError, Reply, UploadFile};
use crate::infrastructure::backend::ConsoleClient;

const NO_FILE: &str = "Please select a file.";
const FAILURE: &str = "❌ Upload failed due to an error.";

/// Uploads one document to the backend's document store
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    pub file: Option<PathBuf>,
}

impl UploadForm {
    pub fn new(file: Option<PathBuf>) -> Self {
        Self { file }
    }

    async fn read_file(path: &Path) -> Result<UploadFile, DomainError> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        validate_upload_name(&file_name)?;

        let content = tokio::fs::read(path).await?;
        Ok(UploadFile::new(file_name, content))
    }
}

#[async_trait]
impl FormHandler for UploadForm {
    fn name(&self) -> &'static str {
        "upload"
    }

    async fn submit(&self, client: &ConsoleClient, view: &dyn ViewSink) -> SubmitOutcome {
        let element = ViewElement::UploadResult;

        let Some(path) = &self.file else {
            view.alert(NO_FILE);
            view.render(element, NO_FILE, Tone::Error);
            return SubmitOutcome::Invalid;
        };

        let file = match Self::read_file(path).await {
            Ok(file) => file,
            Err(e) => {
                error!(path = %path.display(), error = %e, "Cannot read upload");
                view.render(element, FAILURE, Tone::Error);
                return SubmitOutcome::Invalid;
            }
        };

        view.render(element, "Uploading...", Tone::Pending);
        info!(file = %file.file_name, bytes = file.size(), "Uploading document");

        match client.upload(file).await {
            Ok(Reply::Accepted(reply)) => {
                let text = format!(
                    "✅ {}\nFilename: {}\nSaved To: {}",
                    or_fallback(reply.message, "File uploaded."),
                    reply.filename.unwrap_or_default(),
                    reply.saved_to.unwrap_or_default()
                );
                view.render(element, &text, Tone::Success);
                SubmitOutcome::Succeeded
            }
            Ok(Reply::Rejected(rejection)) => {
                let text = match rejection.body.detail_text() {
                    Some(detail) => format!("❌ Upload failed: {}", detail),
                    None => FAILURE.to_string(),
                };
                view.render(element, &text, Tone::Error);
                SubmitOutcome::Failed
            }
            Err(e) => {
                error!(error = %e, "Upload error");
                view.render(element, FAILURE, Tone::Error);
                SubmitOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::view::mock::RecordingView;
    use crate::infrastructure::backend::mock::{MockHttpClient, MOCK_BASE_URL};
    use crate::infrastructure::backend::RequestBody;
    use serde_json::json;
    use std::sync::Arc;

    fn temp_document(name: &str, content: &[u8]) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("rag-console-upload-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn test_no_file_alerts_without_request() {
        let mock = Arc::new(MockHttpClient::new());
        let client = ConsoleClient::new(mock.clone(), MOCK_BASE_URL);
        let view = RecordingView::new();

        let outcome = UploadForm::new(None).submit(&client, &view).await;

        assert_eq!(outcome, SubmitOutcome::Invalid);
        assert_eq!(view.alerts(), vec![NO_FILE.to_string()]);
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_success_shows_filename_and_location() {
        let mock = Arc::new(MockHttpClient::new().with_json(
            "/api/upload/",
            201,
            json!({"message": "File uploaded successfully", "filename": "notes.txt", "saved_to": "/srv/docs/notes.txt"}),
        ));
        let client = ConsoleClient::new(mock.clone(), MOCK_BASE_URL);
        let view = RecordingView::new();
        let path = temp_document("notes.txt", b"some notes");

        let outcome = UploadForm::new(Some(path)).submit(&client, &view).await;

        assert!(outcome.is_success());
        let text = view.last_text(ViewElement::UploadResult).unwrap();
        assert!(text.contains("✅ File uploaded successfully"));
        assert!(text.contains("Filename: notes.txt"));
        assert!(text.contains("Saved To: /srv/docs/notes.txt"));

        match &mock.requests()[0].body {
            RequestBody::Multipart(file) => {
                assert_eq!(file.file_name, "notes.txt");
                assert_eq!(file.mime_type, "text/plain");
                assert_eq!(&file.content[..], b"some notes");
            }
            other => panic!("unexpected body: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rejection_shows_detail() {
        let mock = MockHttpClient::new().with_json(
            "/api/upload/",
            400,
            json!({"detail": "File type not allowed."}),
        );
        let client = ConsoleClient::new(Arc::new(mock), MOCK_BASE_URL);
        let view = RecordingView::new();
        let path = temp_document("image.bmp", b"BM");

        let outcome = UploadForm::new(Some(path)).submit(&client, &view).await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(
            view.last(ViewElement::UploadResult),
            Some(("❌ Upload failed: File type not allowed.".to_string(), Tone::Error))
        );
    }

    #[tokio::test]
    async fn test_rejection_without_detail_uses_fallback() {
        let mock = MockHttpClient::new().with_raw("/api/upload/", 502, "Bad Gateway");
        let client = ConsoleClient::new(Arc::new(mock), MOCK_BASE_URL);
        let view = RecordingView::new();
        let path = temp_document("report.pdf", b"%PDF");

        UploadForm::new(Some(path)).submit(&client, &view).await;

        assert_eq!(view.last_text(ViewElement::UploadResult).unwrap(), FAILURE);
    }

    #[tokio::test]
    async fn test_missing_file_sends_nothing() {
        let mock = Arc::new(MockHttpClient::new());
        let client = ConsoleClient::new(mock.clone(), MOCK_BASE_URL);
        let view = RecordingView::new();
        let path = std::env::temp_dir().join("rag-console-does-not-exist.pdf");

        let outcome = UploadForm::new(Some(path)).submit(&client, &view).await;

        assert_eq!(outcome, SubmitOutcome::Invalid);
        assert_eq!(mock.request_count(), 0);
        assert_eq!(view.last_text(ViewElement::UploadResult).unwrap(), FAILURE);
    }

    #[tokio::test]
    async fn test_connection_failure_replaces_placeholder() {
        let mock = Arc::new(MockHttpClient::new().with_error("/api/upload/", "connection reset"));
        let client = ConsoleClient::new(mock.clone(), MOCK_BASE_URL);
        let view = RecordingView::new();
        let path = temp_document("minutes.md", b"# Minutes");

        let outcome = UploadForm::new(Some(path)).submit(&client, &view).await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(mock.request_count(), 1);
        assert_eq!(
            view.history(ViewElement::UploadResult),
            vec!["Uploading...".to_string(), FAILURE.to_string()]
        );
    }
}
