//! Typed client for the RAG backend

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::http_client::{ApiRequest, HttpClient, HttpTransport, RawResponse, RequestBody};
use crate::config::BackendConfig;
use crate::domain::{
    ApplicationRequest, ChatManageBody, ChatManageQuery, ChunkRequest, ChunkResponse,
    DomainError, EmbeddingResponse, Endpoint, ErrorBody, HelloResponse, HttpMethod,
    LlmConfigResponse, MessageResponse, Metric, ModelLoadRequest, ModelSettings, Rejection,
    Reply, UploadFile, UploadResponse, UsagePayload, UsageReading,
};

/// Backend client parameterized by base URL
#[derive(Debug, Clone)]
pub struct ConsoleClient {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    fragment_base_url: String,
}

impl ConsoleClient {
    pub fn new(transport: Arc<dyn HttpTransport>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            transport,
            fragment_base_url: base_url.clone(),
            base_url,
        }
    }

    /// Serve static fragments from a different origin than the API
    pub fn with_fragment_base_url(mut self, url: impl Into<String>) -> Self {
        self.fragment_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Build a reqwest-backed client from configuration
    pub fn from_config(config: &BackendConfig) -> Result<Self, DomainError> {
        if config.base_url.trim().is_empty() {
            return Err(DomainError::configuration("backend.base_url cannot be empty"));
        }

        let transport = match config.timeout_secs {
            Some(secs) => HttpClient::with_timeout(Duration::from_secs(secs))?,
            None => HttpClient::new(),
        };

        let client = Self::new(Arc::new(transport), config.base_url.clone());

        Ok(match &config.fragment_base_url {
            Some(url) => client.with_fragment_base_url(url.clone()),
            None => client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn fragment_base_url(&self) -> &str {
        &self.fragment_base_url
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    fn json_body<B: Serialize>(body: &B) -> Result<RequestBody, DomainError> {
        serde_json::to_value(body)
            .map(RequestBody::Json)
            .map_err(|e| DomainError::validation(format!("Failed to serialize request: {}", e)))
    }

    async fn send(
        &self,
        method: HttpMethod,
        url: String,
        query: Vec<(String, String)>,
        body: RequestBody,
    ) -> Result<RawResponse, DomainError> {
        debug!(%method, %url, "Sending backend request");

        let response = self
            .transport
            .execute(ApiRequest {
                method,
                url: url.clone(),
                query,
                body,
            })
            .await
            .inspect_err(|e| warn!(%method, %url, error = %e, "Backend request failed"))?;

        debug!(%method, %url, status = response.status, "Backend replied");
        Ok(response)
    }

    async fn call<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        query: Vec<(String, String)>,
        body: RequestBody,
    ) -> Result<Reply<T>, DomainError> {
        let response = self
            .send(endpoint.method(), self.url(endpoint), query, body)
            .await?;

        Self::decode(endpoint, response)
    }

    fn decode<T: DeserializeOwned>(
        endpoint: Endpoint,
        response: RawResponse,
    ) -> Result<Reply<T>, DomainError> {
        if !response.is_success() {
            return Ok(Reply::Rejected(Rejection::new(
                response.status,
                ErrorBody::from_slice(&response.body),
            )));
        }

        serde_json::from_slice(&response.body)
            .map(Reply::Accepted)
            .map_err(|e| {
                DomainError::decode(format!("Invalid reply from {}: {}", endpoint, e))
            })
    }

    fn text_reply(response: RawResponse) -> Reply<String> {
        if response.is_success() {
            Reply::Accepted(response.text())
        } else {
            Reply::Rejected(Rejection::new(
                response.status,
                ErrorBody::from_slice(&response.body),
            ))
        }
    }

    /// `GET /api/hello`
    pub async fn hello(&self) -> Result<Reply<HelloResponse>, DomainError> {
        self.call(Endpoint::Hello, Vec::new(), RequestBody::Empty)
            .await
    }

    /// `POST /application`
    pub async fn submit_application(
        &self,
        request: &ApplicationRequest,
    ) -> Result<Reply<MessageResponse>, DomainError> {
        self.call(Endpoint::Application, Vec::new(), Self::json_body(request)?)
            .await
    }

    /// `POST /api/upload/` as multipart
    pub async fn upload(&self, file: UploadFile) -> Result<Reply<UploadResponse>, DomainError> {
        self.call(Endpoint::Upload, Vec::new(), RequestBody::Multipart(file))
            .await
    }

    /// `POST /api/to_chunks`
    pub async fn to_chunks(
        &self,
        request: &ChunkRequest,
    ) -> Result<Reply<ChunkResponse>, DomainError> {
        self.call(Endpoint::ToChunks, Vec::new(), Self::json_body(request)?)
            .await
    }

    /// `POST /api/chunks_to_embedding` with no body
    pub async fn chunks_to_embedding(&self) -> Result<Reply<EmbeddingResponse>, DomainError> {
        self.call(Endpoint::ChunksToEmbedding, Vec::new(), RequestBody::Empty)
            .await
    }

    /// `POST /api/chat/manage?user_id=…`
    pub async fn manage_chat(
        &self,
        query: &ChatManageQuery,
        body: &ChatManageBody,
    ) -> Result<Reply<MessageResponse>, DomainError> {
        self.call(Endpoint::ChatManage, query.to_pairs(), Self::json_body(body)?)
            .await
    }

    /// `POST /api/application?load_type=`
    pub async fn load_model(
        &self,
        settings: &ModelSettings,
    ) -> Result<Reply<MessageResponse>, DomainError> {
        let query = vec![(
            "load_type".to_string(),
            settings.load_type().as_str().to_string(),
        )];
        let body = Self::json_body(&ModelLoadRequest::from(settings))?;

        self.call(Endpoint::ModelLoad, query, body).await
    }

    /// `POST /api/llms_config/{huggingface,llama_cpp}`
    pub async fn save_llm_config(
        &self,
        settings: &ModelSettings,
    ) -> Result<Reply<LlmConfigResponse>, DomainError> {
        let body = match settings {
            ModelSettings::HuggingFace(hf) => Self::json_body(hf)?,
            ModelSettings::LlamaCpp(cpp) => Self::json_body(cpp)?,
        };

        self.call(Endpoint::LlmConfig(settings.backend()), Vec::new(), body)
            .await
    }

    /// `GET /api/logs` as raw text
    pub async fn logs(&self) -> Result<Reply<String>, DomainError> {
        let response = self
            .send(
                HttpMethod::Get,
                self.url(Endpoint::Logs),
                Vec::new(),
                RequestBody::Empty,
            )
            .await?;

        Ok(Self::text_reply(response))
    }

    /// `GET /api/health/{metric}`, validated against the metric's schema
    pub async fn usage(&self, metric: Metric) -> Result<Reply<UsageReading>, DomainError> {
        let reply: Reply<UsagePayload> = self
            .call(Endpoint::Health(metric), Vec::new(), RequestBody::Empty)
            .await?;

        match reply {
            Reply::Accepted(payload) => payload.into_reading(metric).map(Reply::Accepted),
            Reply::Rejected(rejection) => Ok(Reply::Rejected(rejection)),
        }
    }

    /// Fetch a static HTML fragment as text
    pub async fn fragment(&self, path: &str) -> Result<Reply<String>, DomainError> {
        let url = format!("{}{}", self.fragment_base_url, path);
        let response = self
            .send(HttpMethod::Get, url, Vec::new(), RequestBody::Empty)
            .await?;

        Ok(Self::text_reply(response))
    }
}
