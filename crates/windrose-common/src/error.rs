//! Error types for the wind rose pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using WindRoseError.
pub type WindRoseResult<T> = Result<T, WindRoseError>;

/// Primary error type for loading and rendering a wind rose.
#[derive(Debug, Error)]
pub enum WindRoseError {
    // === Input Errors ===
    #[error("Wind input has no direction bins")]
    EmptyInput,

    #[error("Length mismatch: {bins} direction bins but {freq} frequencies")]
    LengthMismatch { bins: usize, freq: usize },

    #[error("Invalid value for '{field}' at index {index}: {value}")]
    InvalidValue {
        field: &'static str,
        index: usize,
        value: f64,
    },

    #[error("Failed to read wind input from {path:?}: {source}")]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse wind input from {path:?}: {source}")]
    InputParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // === Rendering Errors ===
    #[error("Style error: {0}")]
    Style(String),

    #[error("Rendering failed: {0}")]
    Render(String),

    #[error("PNG encoding failed: {0}")]
    Encode(String),

    // === Output Errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WindRoseError {
    /// True when the error comes from the input record rather than the
    /// rendering or output stages.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            WindRoseError::EmptyInput
                | WindRoseError::LengthMismatch { .. }
                | WindRoseError::InvalidValue { .. }
                | WindRoseError::InputRead { .. }
                | WindRoseError::InputParse { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_mismatch_message() {
        let err = WindRoseError::LengthMismatch { bins: 4, freq: 3 };
        assert_eq!(
            err.to_string(),
            "Length mismatch: 4 direction bins but 3 frequencies"
        );
    }

    #[test]
    fn test_input_error_classification() {
        assert!(WindRoseError::EmptyInput.is_input_error());
        assert!(!WindRoseError::Render("boom".into()).is_input_error());
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(!WindRoseError::from(io).is_input_error());
    }
}
