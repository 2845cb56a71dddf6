//! Model domain - Loader selection and generation settings

mod settings;
mod validation;

pub use settings::{
    parse_stop_sequences, HuggingFaceSettings, LlamaCppSettings, LlmConfigResponse, LoadType,
    ModelBackend, ModelLoadRequest, ModelSettings,
};
pub use validation::{
    validate_model_settings, validate_temperature, validate_top_p, ModelValidationError,
};
