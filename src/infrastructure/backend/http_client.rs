use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};

use crate::domain::{DomainError, HttpMethod, UploadFile};

/// Body attached to an outgoing request
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    /// Single multipart `file` field
    Multipart(UploadFile),
}

/// A fully resolved backend request
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

/// Status and raw body of a backend reply
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Bytes,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Trait for HTTP transport (for mocking)
#[async_trait]
pub trait HttpTransport: Send + Sync + fmt::Debug {
    /// Send a request. Any HTTP status is a successful send; only failures to
    /// reach the backend or read its reply are errors.
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, DomainError>;
}

/// Real HTTP transport using reqwest
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    fn multipart_form(file: UploadFile) -> Result<Form, DomainError> {
        let part = Part::bytes(file.content.to_vec())
            .file_name(file.file_name)
            .mime_str(&file.mime_type)
            .map_err(|e| DomainError::validation(format!("Invalid MIME type: {}", e)))?;

        Ok(Form::new().part("file", part))
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for HttpClient {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, DomainError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(&body),
            RequestBody::Multipart(file) => builder.multipart(Self::multipart_form(file)?),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| DomainError::transport(format!("Request failed: {}", e)))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| DomainError::transport(format!("Failed to read response: {}", e)))?;

        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex, RwLock};

    /// Base URL the mock expects requests to be addressed to
    pub const MOCK_BASE_URL: &str = "http://backend.test:5000";

    #[derive(Debug, Clone)]
    enum MockReply {
        Response(RawResponse),
        Error(String),
        /// Never answers
        Stall,
    }

    /// Counts a stalled request once its future is dropped
    struct Release(Arc<AtomicUsize>);

    impl Drop for Release {
        fn drop(&mut self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Transport answering from canned replies and recording every request
    #[derive(Debug)]
    pub struct MockHttpClient {
        replies: RwLock<HashMap<String, MockReply>>,
        requests: Mutex<Vec<ApiRequest>>,
        released: Arc<AtomicUsize>,
    }

    impl MockHttpClient {
        pub fn new() -> Self {
            Self {
                replies: RwLock::new(HashMap::new()),
                requests: Mutex::new(Vec::new()),
                released: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn url(path: &str) -> String {
            format!("{}{}", MOCK_BASE_URL, path)
        }

        pub fn with_json(self, path: &str, status: u16, body: serde_json::Value) -> Self {
            self.with_raw(path, status, body.to_string())
        }

        pub fn with_raw(self, path: &str, status: u16, body: impl Into<Bytes>) -> Self {
            self.replies.write().unwrap().insert(
                Self::url(path),
                MockReply::Response(RawResponse::new(status, body)),
            );
            self
        }

        pub fn with_error(self, path: &str, error: impl Into<String>) -> Self {
            self.replies
                .write()
                .unwrap()
                .insert(Self::url(path), MockReply::Error(error.into()));
            self
        }

        /// Requests to this path hang until they are dropped
        pub fn with_stall(self, path: &str) -> Self {
            self.replies
                .write()
                .unwrap()
                .insert(Self::url(path), MockReply::Stall);
            self
        }

        /// Stalled requests whose futures have been dropped
        pub fn released_count(&self) -> usize {
            self.released.load(Ordering::SeqCst)
        }

        pub fn requests(&self) -> Vec<ApiRequest> {
            self.requests.lock().unwrap().clone()
        }

        pub fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        /// Number of requests sent to a path
        pub fn count_for(&self, path: &str) -> usize {
            let url = Self::url(path);
            self.requests
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.url == url)
                .count()
        }
    }

    impl Default for MockHttpClient {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl HttpTransport for MockHttpClient {
        async fn execute(&self, request: ApiRequest) -> Result<RawResponse, DomainError> {
            let reply = self.replies.read().unwrap().get(&request.url).cloned();
            let url = request.url.clone();
            self.requests.lock().unwrap().push(request);

            match reply {
                Some(MockReply::Response(response)) => Ok(response),
                Some(MockReply::Error(error)) => Err(DomainError::transport(error)),
                Some(MockReply::Stall) => {
                    let _release = Release(self.released.clone());
                    std::future::pending().await
                }
                None => Err(DomainError::transport(format!(
                    "Connection refused: no mock response for {}",
                    url
                ))),
            }
        }
    }
}
