//! Model artifact loading
//!
//! The artifact is two JSON files written at training time: the serialized
//! regression model and the ordered list of columns it was fit against.
//! Both are read once at startup and never mutated afterwards.

use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::errors::ArtifactError;
use super::model::RegressionModel;

/// Ordered column names the model was trained on
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainingSchema {
    columns: Vec<String>,
}

impl TrainingSchema {
    /// Build a schema, rejecting empty lists and duplicate names
    pub fn new(columns: Vec<String>) -> Result<Self, ArtifactError> {
        if columns.is_empty() {
            return Err(ArtifactError::EmptySchema);
        }

        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(ArtifactError::DuplicateColumn(column.clone()));
            }
        }

        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.position(column).is_some()
    }
}

/// Loaded model plus its training schema
#[derive(Debug, Clone)]
pub struct ModelArtifact {
    model: RegressionModel,
    schema: TrainingSchema,
    model_path: PathBuf,
}

impl ModelArtifact {
    pub fn new(model: RegressionModel, schema: TrainingSchema) -> Self {
        Self {
            model,
            schema,
            model_path: PathBuf::new(),
        }
    }

    /// Read and parse both artifact files
    pub fn load(model_path: &Path, columns_path: &Path) -> Result<Self, ArtifactError> {
        info!(
            model = %model_path.display(),
            columns = %columns_path.display(),
            "Loading model artifact"
        );

        let model_raw = read_artifact(model_path, model_path, columns_path)?;
        let columns_raw = read_artifact(columns_path, model_path, columns_path)?;

        let model: RegressionModel =
            serde_json::from_str(&model_raw).map_err(|source| ArtifactError::Corrupt {
                path: model_path.to_path_buf(),
                source,
            })?;

        let columns: Vec<String> =
            serde_json::from_str(&columns_raw).map_err(|source| ArtifactError::Corrupt {
                path: columns_path.to_path_buf(),
                source,
            })?;

        let schema = TrainingSchema::new(columns)?;

        // Width disagreements only surface per prediction; flag them early in the logs
        if let Some(width) = model.expected_features() {
            if width != schema.len() {
                warn!(
                    model_features = width,
                    schema_columns = schema.len(),
                    "Model width does not match training column count"
                );
            }
        }

        info!(
            kind = model.kind(),
            columns = schema.len(),
            "Model artifact loaded"
        );

        Ok(Self {
            model,
            schema,
            model_path: model_path.to_path_buf(),
        })
    }

    pub fn model(&self) -> &RegressionModel {
        &self.model
    }

    pub fn schema(&self) -> &TrainingSchema {
        &self.schema
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }
}

fn read_artifact(path: &Path, model: &Path, columns: &Path) -> Result<String, ArtifactError> {
    fs::read_to_string(path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            ArtifactError::NotFound {
                model: file_name(model),
                columns: file_name(columns),
            }
        } else {
            ArtifactError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_schema_rejects_empty() {
        assert!(matches!(TrainingSchema::new(vec![]), Err(ArtifactError::EmptySchema)));
    }

    #[test]
    fn test_schema_rejects_duplicates() {
        let err = TrainingSchema::new(vec!["a".into(), "b".into(), "a".into()]).unwrap_err();
        assert!(matches!(err, ArtifactError::DuplicateColumn(c) if c == "a"));
    }

    #[test]
    fn test_schema_position() {
        let schema = TrainingSchema::new(vec!["x".into(), "y".into()]).unwrap();
        assert_eq!(schema.position("y"), Some(1));
        assert!(!schema.contains("z"));
        assert_eq!(schema.len(), 2);
    }

    #[test]
    fn test_load_linear_artifact() {
        let dir = TempDir::new().unwrap();
        let model = write(
            &dir,
            "model.json",
            r#"{"kind":"linear","intercept":1.0,"coefficients":[2.0,3.0]}"#,
        );
        let columns = write(&dir, "columns.json", r#"["a","b"]"#);

        let artifact = ModelArtifact::load(&model, &columns).unwrap();
        assert_eq!(artifact.schema().columns(), &["a".to_string(), "b".to_string()]);
        assert_eq!(artifact.model().kind(), "linear");
        assert_eq!(artifact.model_path(), model.as_path());
    }

    #[test]
    fn test_missing_artifact_reports_both_files() {
        let dir = TempDir::new().unwrap();
        let err = ModelArtifact::load(
            &dir.path().join("tourism_model.json"),
            &dir.path().join("tourism_training_columns.json"),
        )
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "'tourism_model.json' or 'tourism_training_columns.json' not found."
        );
    }

    #[test]
    fn test_corrupt_model_file() {
        let dir = TempDir::new().unwrap();
        let model = write(&dir, "model.json", "not json at all");
        let columns = write(&dir, "columns.json", r#"["a"]"#);

        let err = ModelArtifact::load(&model, &columns).unwrap_err();
        assert!(matches!(err, ArtifactError::Corrupt { .. }));
    }

    #[test]
    fn test_columns_must_be_strings() {
        let dir = TempDir::new().unwrap();
        let model = write(
            &dir,
            "model.json",
            r#"{"kind":"linear","intercept":0.0,"coefficients":[1.0]}"#,
        );
        let columns = write(&dir, "columns.json", "[1, 2]");

        let err = ModelArtifact::load(&model, &columns).unwrap_err();
        assert!(matches!(err, ArtifactError::Corrupt { path, .. } if path == columns));
    }
}
