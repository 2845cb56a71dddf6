//! Document upload payloads

use bytes::Bytes;
use serde::Deserialize;

/// A file selected for upload, sent as the multipart `file` field
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub file_name: String,
    pub mime_type: String,
    pub content: Bytes,
}

impl UploadFile {
    /// Build an upload, guessing the MIME type from the file name
    pub fn new(file_name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        let file_name = file_name.into();
        let mime_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        Self {
            file_name,
            mime_type,
            content: content.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }
}

/// Reply of `POST /api/upload/`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub saved_to: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_guess() {
        let pdf = UploadFile::new("report.pdf", b"%PDF".to_vec());
        assert_eq!(pdf.mime_type, "application/pdf");
        assert_eq!(pdf.size(), 4);

        let unknown = UploadFile::new("blob", Vec::new());
        assert_eq!(unknown.mime_type, "application/octet-stream");
    }

    #[test]
    fn test_upload_response_partial() {
        let response: UploadResponse =
            serde_json::from_str(r#"{"message": "File uploaded", "filename": "a.pdf"}"#).unwrap();
        assert_eq!(response.filename.as_deref(), Some("a.pdf"));
        assert!(response.saved_to.is_none());
    }
}
