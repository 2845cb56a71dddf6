//! Model settings validation

use std::fmt;

use super::settings::{HuggingFaceSettings, LlamaCppSettings, ModelSettings};

/// Model settings validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ModelValidationError {
    /// Model name or repository is empty
    EmptyName { field: &'static str },
    /// Temperature out of valid range
    InvalidTemperature { value: f32, min: f32, max: f32 },
    /// Top-p out of valid range
    InvalidTopP { value: f32, min: f32, max: f32 },
    /// A token budget is zero
    InvalidTokenBudget { field: &'static str },
}

impl fmt::Display for ModelValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName { field } => write!(f, "{} cannot be empty", field),
            Self::InvalidTemperature { value, min, max } => {
                write!(
                    f,
                    "Invalid temperature {}: must be between {} and {}",
                    value, min, max
                )
            }
            Self::InvalidTopP { value, min, max } => {
                write!(
                    f,
                    "Invalid top_p {}: must be between {} and {}",
                    value, min, max
                )
            }
            Self::InvalidTokenBudget { field } => write!(f, "{} must be greater than 0", field),
        }
    }
}

impl std::error::Error for ModelValidationError {}

fn validate_name(field: &'static str, value: &str) -> Result<(), ModelValidationError> {
    if value.trim().is_empty() {
        return Err(ModelValidationError::EmptyName { field });
    }

    Ok(())
}

/// Validate temperature value
pub fn validate_temperature(temp: f32) -> Result<(), ModelValidationError> {
    const MIN: f32 = 0.0;
    const MAX: f32 = 2.0;

    if !(MIN..=MAX).contains(&temp) {
        return Err(ModelValidationError::InvalidTemperature {
            value: temp,
            min: MIN,
            max: MAX,
        });
    }

    Ok(())
}

/// Validate top_p value
pub fn validate_top_p(top_p: f32) -> Result<(), ModelValidationError> {
    const MIN: f32 = 0.0;
    const MAX: f32 = 1.0;

    if !(MIN..=MAX).contains(&top_p) {
        return Err(ModelValidationError::InvalidTopP {
            value: top_p,
            min: MIN,
            max: MAX,
        });
    }

    Ok(())
}

fn validate_budget(field: &'static str, value: u32) -> Result<(), ModelValidationError> {
    if value == 0 {
        return Err(ModelValidationError::InvalidTokenBudget { field });
    }

    Ok(())
}

fn validate_hf(settings: &HuggingFaceSettings) -> Result<(), ModelValidationError> {
    validate_name("model_name", &settings.model_name)?;
    validate_temperature(settings.temperature)?;
    validate_top_p(settings.top_p)?;
    validate_budget("max_new_tokens", settings.max_new_tokens)
}

fn validate_cpp(settings: &LlamaCppSettings) -> Result<(), ModelValidationError> {
    validate_name("repo_id", &settings.repo_id)?;
    validate_name("filename", &settings.filename)?;
    validate_temperature(settings.temperature)?;
    validate_top_p(settings.top_p)?;
    validate_budget("n_ctx", settings.n_ctx)?;
    validate_budget("max_tokens", settings.max_tokens)
}

/// Validate settings before they are sent to the backend
pub fn validate_model_settings(settings: &ModelSettings) -> Result<(), ModelValidationError> {
    match settings {
        ModelSettings::HuggingFace(hf) => validate_hf(hf),
        ModelSettings::LlamaCpp(cpp) => validate_cpp(cpp),
    }
}
