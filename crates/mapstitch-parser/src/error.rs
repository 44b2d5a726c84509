//! Error types for battlemap parsing.
//!
//! Parsing fails as a whole when the document cannot be trusted: broken
//! JSON, an undecodable image payload, or a nonsensical grid density.
//! Individually malformed features are dropped with a warning instead
//! and never surface here.

use thiserror::Error;

/// Error type for the document parsing lifecycle.
///
/// Every variant carries the document label (usually the file name) so
/// that failures in a multi-document run identify their source.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{label}: {message}")]
    Syntax { label: String, message: String },

    #[error("{label}: invalid image payload: {message}")]
    Image { label: String, message: String },

    #[error("{label}: pixels_per_grid must be a positive number, got {value}")]
    Resolution { label: String, value: f64 },
}

impl ParseError {
    /// Wraps a JSON syntax or shape error. The underlying message
    /// already names the offending line and column.
    pub fn syntax(label: impl Into<String>, err: &serde_json::Error) -> Self {
        Self::Syntax {
            label: label.into(),
            message: err.to_string(),
        }
    }

    /// Wraps a base64 decode failure for the embedded map image.
    pub fn image(label: impl Into<String>, err: &base64::DecodeError) -> Self {
        Self::Image {
            label: label.into(),
            message: err.to_string(),
        }
    }

    /// Reports an unusable grid density.
    pub fn resolution(label: impl Into<String>, value: f64) -> Self {
        Self::Resolution {
            label: label.into(),
            value,
        }
    }

    /// Returns the label of the document that failed to parse.
    pub fn label(&self) -> &str {
        match self {
            Self::Syntax { label, .. } | Self::Image { label, .. } | Self::Resolution { label, .. } => {
                label
            }
        }
    }
}
