//! Model loading and configuration payloads

use std::fmt;

use serde::{Deserialize, Serialize};

/// Backend-selectable model loader.
///
/// The wire names are the backend's `load_type` query values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadType {
    /// Hosted (Hugging Face transformers) model
    HuggingFace,
    /// Local compiled model through llama.cpp
    LlamaCpp,
}

impl LoadType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HuggingFace => "HF",
            Self::LlamaCpp => "lCPP",
        }
    }
}

impl fmt::Display for LoadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Model family whose configuration file the backend stores
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelBackend {
    HuggingFace,
    LlamaCpp,
}

impl ModelBackend {
    pub fn config_route(&self) -> &'static str {
        match self {
            Self::HuggingFace => "huggingface",
            Self::LlamaCpp => "llama_cpp",
        }
    }
}

impl From<LoadType> for ModelBackend {
    fn from(load_type: LoadType) -> Self {
        match load_type {
            LoadType::HuggingFace => Self::HuggingFace,
            LoadType::LlamaCpp => Self::LlamaCpp,
        }
    }
}

/// Generation settings for a Hugging Face model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HuggingFaceSettings {
    pub model_name: String,
    pub max_new_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub trust_remote_code: bool,
    pub do_sample: bool,
    pub quantization: bool,
    pub quantization_type: String,
}

impl HuggingFaceSettings {
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            max_new_tokens: 256,
            temperature: 0.7,
            top_p: 0.95,
            top_k: 50,
            trust_remote_code: false,
            do_sample: true,
            quantization: false,
            quantization_type: "4bit".to_string(),
        }
    }
}

/// Runtime and generation settings for a llama.cpp model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlamaCppSettings {
    pub repo_id: String,
    pub filename: String,
    pub n_ctx: u32,
    pub n_threads: u32,
    pub seed: i64,
    pub n_gpus: i32,
    pub verbose: bool,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub echo: bool,
    pub stop: Vec<String>,
}

impl Default for LlamaCppSettings {
    fn default() -> Self {
        Self {
            repo_id: "TheBloke/Llama-2-7b-Chat-GGUF".to_string(),
            filename: "llama-2-7b-chat.Q2_K.gguf".to_string(),
            n_ctx: 512,
            n_threads: 4,
            seed: 42,
            n_gpus: -1,
            verbose: true,
            max_tokens: 128,
            temperature: 0.7,
            top_p: 0.95,
            echo: false,
            stop: Vec::new(),
        }
    }
}

/// Split a comma separated stop list, dropping blank entries
pub fn parse_stop_sequences(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Settings for one of the two loaders
#[derive(Debug, Clone, PartialEq)]
pub enum ModelSettings {
    HuggingFace(HuggingFaceSettings),
    LlamaCpp(LlamaCppSettings),
}

impl ModelSettings {
    pub fn load_type(&self) -> LoadType {
        match self {
            Self::HuggingFace(_) => LoadType::HuggingFace,
            Self::LlamaCpp(_) => LoadType::LlamaCpp,
        }
    }

    pub fn backend(&self) -> ModelBackend {
        self.load_type().into()
    }
}

/// Body of `POST /api/application?load_type=`; exactly one side is set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelLoadRequest {
    pub body: Option<HuggingFaceSettings>,
    pub cpp_body: Option<LlamaCppSettings>,
}

impl From<&ModelSettings> for ModelLoadRequest {
    fn from(settings: &ModelSettings) -> Self {
        match settings {
            ModelSettings::HuggingFace(hf) => Self {
                body: Some(hf.clone()),
                cpp_body: None,
            },
            ModelSettings::LlamaCpp(cpp) => Self {
                body: None,
                cpp_body: Some(cpp.clone()),
            },
        }
    }
}

/// Reply of the `llms_config` routes
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LlmConfigResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub file: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_type_wire_names() {
        assert_eq!(LoadType::HuggingFace.to_string(), "HF");
        assert_eq!(LoadType::LlamaCpp.as_str(), "lCPP");
    }

    #[test]
    fn test_stop_sequences() {
        assert_eq!(
            parse_stop_sequences(" </s>, ,User:,"),
            vec!["</s>".to_string(), "User:".to_string()]
        );
        assert!(parse_stop_sequences("").is_empty());
    }

    #[test]
    fn test_load_request_carries_one_body() {
        let settings = ModelSettings::LlamaCpp(LlamaCppSettings::default());
        let request = ModelLoadRequest::from(&settings);
        let json = serde_json::to_value(&request).unwrap();

        assert!(json["body"].is_null());
        assert_eq!(json["cpp_body"]["n_ctx"], 512);
        assert_eq!(json["cpp_body"]["repo_id"], "TheBloke/Llama-2-7b-Chat-GGUF");
        assert_eq!(settings.backend(), ModelBackend::LlamaCpp);
    }

    #[test]
    fn test_hf_body_serialization() {
        let settings = ModelSettings::HuggingFace(HuggingFaceSettings::new("gpt2"));
        let json = serde_json::to_value(ModelLoadRequest::from(&settings)).unwrap();

        assert_eq!(json["body"]["model_name"], "gpt2");
        assert_eq!(json["body"]["top_k"], 50);
        assert!(json["cpp_body"].is_null());
    }
}
