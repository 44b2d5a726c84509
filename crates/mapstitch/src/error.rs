//! Error types for the merge pipeline.

use std::io;

use thiserror::Error;

use mapstitch_parser::ParseError;

use crate::scene::SceneError;

/// Errors produced while merging battlemap documents.
#[derive(Debug, Error)]
pub enum MergeError {
    /// Reading an input or writing an output failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A source document could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The merge was invoked without any documents.
    #[error("no battlemap documents to merge")]
    NoDocuments,

    /// The raster backend failed to decode, draw, or encode an image.
    #[error("raster error: {0}")]
    Raster(Box<dyn std::error::Error + Send + Sync>),

    /// The scene sink rejected the scene or its features.
    #[error("scene error: {0}")]
    Scene(#[from] SceneError),

    /// The merged descriptor could not be serialized.
    #[error("descriptor error: {0}")]
    Descriptor(#[from] serde_json::Error),

    /// The configuration is unusable as given.
    #[error("configuration error: {0}")]
    Config(String),
}

impl MergeError {
    /// Wraps a raster backend failure.
    pub fn raster(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Raster(Box::new(err))
    }
}
