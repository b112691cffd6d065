use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading the model artifact at startup
///
/// All of these are fatal: nothing renders without a loaded model.
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("'{model}' or '{columns}' not found.")]
    NotFound { model: String, columns: String },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt artifact {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Training column list is empty")]
    EmptySchema,

    #[error("Training column '{0}' appears more than once")]
    DuplicateColumn(String),
}

/// Failures inside a single model call
///
/// Recoverable: only the current predict action fails.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictError {
    #[error("Model expects {expected} features but the encoded vector has {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("Tree {tree} node {node} references feature {feature}, vector has {width}")]
    FeatureOutOfBounds {
        tree: usize,
        node: usize,
        feature: usize,
        width: usize,
    },

    #[error("Tree {tree} is malformed: {reason}")]
    MalformedTree { tree: usize, reason: String },

    #[error("Model produced a non-finite prediction ({0})")]
    NonFinite(f64),
}

/// Result type for model calls
pub type PredictResult<T> = Result<T, PredictError>;
