//! Validation helpers for ingestion forms

use crate::domain::DomainError;

/// Parse the reset selector of the chunking form; only `0` and `1` are accepted
pub fn parse_reset_flag(raw: &str) -> Result<i64, DomainError> {
    match raw.trim().parse::<i64>() {
        Ok(flag @ (0 | 1)) => Ok(flag),
        Ok(other) => Err(DomainError::validation(format!(
            "do_reset must be 0 or 1, got {}",
            other
        ))),
        Err(_) => Err(DomainError::validation(format!(
            "do_reset must be 0 or 1, got '{}'",
            raw.trim()
        ))),
    }
}

/// Reject uploads the backend cannot store
pub fn validate_upload_name(file_name: &str) -> Result<(), DomainError> {
    if file_name.trim().is_empty() {
        return Err(DomainError::validation("File name cannot be empty"));
    }

    if file_name.len() > 255 {
        return Err(DomainError::validation(
            "File name cannot exceed 255 characters",
        ));
    }

    Ok(())
}
