//! Error types for glowgen.

use thiserror::Error;

/// Fatal error kinds. Anything of this type aborts the run; degraded
/// generation is not an error (see `GenerationOutcome` in the engine crate).
#[derive(Error, Debug)]
pub enum GlowgenError {
    #[error("invalid product input, missing fields: {}", missing.join(", "))]
    Validation { missing: Vec<String> },

    #[error("product input is malformed: {0}")]
    Malformed(String),

    #[error("stage '{stage}' requires state key '{key}' which is not present")]
    MissingState { stage: String, key: String },

    #[error("stage '{stage}' attempted to overwrite state key '{key}'")]
    DuplicateState { stage: String, key: String },

    #[error("stage '{stage}' wrote undeclared state key '{key}'")]
    UndeclaredState { stage: String, key: String },

    #[error("failed to write artifact '{artifact}': {source}")]
    Write {
        artifact: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GlowgenError {
    /// Missing input fields, if this is a validation failure.
    pub fn missing_fields(&self) -> Option<&[String]> {
        match self {
            GlowgenError::Validation { missing } => Some(missing),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_lists_fields() {
        let err = GlowgenError::Validation {
            missing: vec!["price".to_string(), "benefits".to_string()],
        };
        let message = err.to_string();
        assert!(message.contains("price"));
        assert!(message.contains("benefits"));
    }

    #[test]
    fn test_missing_state_error_names_stage_and_key() {
        let err = GlowgenError::MissingState {
            stage: "faq".to_string(),
            key: "questions".to_string(),
        };
        assert!(err.to_string().contains("faq"));
        assert!(err.to_string().contains("questions"));
    }
}
