#![allow(dead_code)]

//! Shared fixtures for integration tests

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tourspend::ml::{ExpenditurePredictor, ModelArtifact};

/// Columns as written by a `drop_first` one-hot encoder
///
/// Business and Budget are the reference levels.
pub const COLUMNS: &str = r#"[
    "Length_of_Stay_Days",
    "Daily_Spending_USD",
    "Purpose_of_Visit_Conference",
    "Purpose_of_Visit_Leisure",
    "Purpose_of_Visit_VFR",
    "Hotel_Class_Luxury",
    "Hotel_Class_Standard"
]"#;

pub const LINEAR_MODEL: &str = r#"{
    "kind": "linear",
    "intercept": -640.0,
    "coefficients": [142.5, 6.8, 95.0, -40.0, -210.0, 1380.0, 420.0]
}"#;

/// Artifact files living in a temp dir for the duration of a test
pub struct ArtifactFixture {
    pub dir: TempDir,
    pub model_path: PathBuf,
    pub columns_path: PathBuf,
}

impl ArtifactFixture {
    pub fn new(model: &str, columns: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let model_path = dir.path().join("tourism_model.json");
        let columns_path = dir.path().join("tourism_training_columns.json");
        fs::write(&model_path, model).expect("Failed to write model");
        fs::write(&columns_path, columns).expect("Failed to write columns");
        Self {
            dir,
            model_path,
            columns_path,
        }
    }

    pub fn linear() -> Self {
        Self::new(LINEAR_MODEL, COLUMNS)
    }

    pub fn load(&self) -> ModelArtifact {
        ModelArtifact::load(&self.model_path, &self.columns_path)
            .expect("Failed to load fixture artifact")
    }

    pub fn predictor(&self) -> ExpenditurePredictor {
        ExpenditurePredictor::new(Arc::new(self.load()))
    }
}
