//! Backend routes consumed by the console

use std::fmt;

use super::health::Metric;
use super::model::ModelBackend;

/// HTTP method of a backend route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// Every backend route the console calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Application,
    ChunksToEmbedding,
    Hello,
    Upload,
    ChatManage,
    ModelLoad,
    LlmConfig(ModelBackend),
    ToChunks,
    Logs,
    Health(Metric),
}

impl Endpoint {
    pub fn path(&self) -> String {
        match self {
            Self::Application => "/application".to_string(),
            Self::ChunksToEmbedding => "/api/chunks_to_embedding".to_string(),
            Self::Hello => "/api/hello".to_string(),
            Self::Upload => "/api/upload/".to_string(),
            Self::ChatManage => "/api/chat/manage".to_string(),
            Self::ModelLoad => "/api/application".to_string(),
            Self::LlmConfig(backend) => format!("/api/llms_config/{}", backend.config_route()),
            Self::ToChunks => "/api/to_chunks".to_string(),
            Self::Logs => "/api/logs".to_string(),
            Self::Health(metric) => format!("/api/health/{}", metric.as_str()),
        }
    }

    pub fn method(&self) -> HttpMethod {
        match self {
            Self::Hello | Self::Logs | Self::Health(_) => HttpMethod::Get,
            _ => HttpMethod::Post,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(Endpoint::Application.path(), "/application");
        assert_eq!(Endpoint::Upload.path(), "/api/upload/");
        assert_eq!(Endpoint::Health(Metric::Gpu).path(), "/api/health/gpu");
        assert_eq!(
            Endpoint::LlmConfig(ModelBackend::LlamaCpp).path(),
            "/api/llms_config/llama_cpp"
        );
        assert_eq!(
            Endpoint::LlmConfig(ModelBackend::HuggingFace).path(),
            "/api/llms_config/huggingface"
        );
    }

    #[test]
    fn test_methods() {
        assert_eq!(Endpoint::Logs.method(), HttpMethod::Get);
        assert_eq!(Endpoint::Health(Metric::Cpu).method(), HttpMethod::Get);
        assert_eq!(Endpoint::ToChunks.method(), HttpMethod::Post);
        assert_eq!(Endpoint::Hello.to_string(), "GET /api/hello");
    }
}
