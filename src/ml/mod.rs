//! Machine learning integration module
//! Artifact loading, feature encoding and inference for the expenditure model

pub mod artifact;
pub mod encoder;
pub mod errors;
pub mod model;
pub mod predictor;

// Re-export commonly used types
pub use artifact::{ModelArtifact, TrainingSchema};
pub use encoder::{encode, EncodedVector};
pub use errors::{ArtifactError, PredictError, PredictResult};
pub use model::RegressionModel;
pub use predictor::{predict, ExpenditurePredictor, PredictionResult};

/// Trait for ML model predictions
pub trait Predictor {
    type Input;
    type Output;

    fn predict(&self, input: &Self::Input) -> PredictResult<Self::Output>;
}
