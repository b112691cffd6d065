//! Expenditure prediction over the loaded artifact

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use super::artifact::{ModelArtifact, TrainingSchema};
use super::encoder::{encode, EncodedVector};
use super::errors::PredictResult;
use super::model::RegressionModel;
use super::Predictor;
use crate::trip::TripAttributes;

/// Run the model on an already aligned vector
pub fn predict(vector: &EncodedVector, model: &RegressionModel) -> PredictResult<f64> {
    model.predict(vector)
}

/// Outcome of one predict action
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    /// Predicted total expenditure in USD, never negative
    pub total_usd: f64,
    pub trip: TripAttributes,
    pub predicted_at: DateTime<Utc>,
}

/// Encoder + model, sharing one read-only artifact
#[derive(Debug, Clone)]
pub struct ExpenditurePredictor {
    artifact: Arc<ModelArtifact>,
}

impl ExpenditurePredictor {
    pub fn new(artifact: Arc<ModelArtifact>) -> Self {
        Self { artifact }
    }

    pub fn schema(&self) -> &TrainingSchema {
        self.artifact.schema()
    }

    pub fn artifact(&self) -> &ModelArtifact {
        &self.artifact
    }

    /// Encode and predict a validated trip
    pub fn estimate(&self, trip: &TripAttributes) -> PredictResult<PredictionResult> {
        let vector = encode(trip, self.artifact.schema());
        let raw = predict(&vector, self.artifact.model())?;

        let total_usd = if raw < 0.0 {
            warn!(raw, "Negative expenditure predicted, clamping to zero");
            0.0
        } else {
            raw
        };

        debug!(
            stay_days = trip.length_of_stay_days(),
            daily_usd = trip.daily_spending_usd(),
            purpose = %trip.purpose_of_visit(),
            hotel = %trip.hotel_class(),
            total_usd,
            "Prediction complete"
        );

        Ok(PredictionResult {
            total_usd,
            trip: *trip,
            predicted_at: Utc::now(),
        })
    }
}

impl Predictor for ExpenditurePredictor {
    type Input = TripAttributes;
    type Output = PredictionResult;

    fn predict(&self, input: &TripAttributes) -> PredictResult<PredictionResult> {
        self.estimate(input)
    }
}
