//! Feature encoding
//!
//! Turns one [`TripAttributes`] record into the numeric row the model was
//! trained on: numeric columns pass through, categorical columns expand to
//! `<field>_<value>` indicators, and the result is projected onto the
//! training schema (missing columns become 0, unknown columns are dropped,
//! order follows the schema).
//!
//! A category the schema never saw (for instance one removed by
//! `drop_first` at training time) produces no matching column, so all of
//! that field's indicators stay 0. This is the trained model's reference
//! level, not an error.

use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use super::artifact::TrainingSchema;
use crate::trip::TripAttributes;

pub const LENGTH_OF_STAY_COLUMN: &str = "Length_of_Stay_Days";
pub const DAILY_SPENDING_COLUMN: &str = "Daily_Spending_USD";
pub const PURPOSE_OF_VISIT_FIELD: &str = "Purpose_of_Visit";
pub const HOTEL_CLASS_FIELD: &str = "Hotel_Class";

/// Numeric row aligned 1:1 with a [`TrainingSchema`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncodedVector {
    columns: Vec<String>,
    values: Vec<f64>,
}

impl EncodedVector {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of a named column, if the schema has it
    pub fn get(&self, column: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|index| self.values[index])
    }

    /// `(column, value)` pairs in schema order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// One-hot column name for a categorical value
pub fn indicator_column(field: &str, value: &str) -> String {
    format!("{}_{}", field, value)
}

/// Expanded single-row record before schema alignment
fn expand(attrs: &TripAttributes) -> HashMap<String, f64> {
    let mut row = HashMap::with_capacity(4);
    row.insert(LENGTH_OF_STAY_COLUMN.to_string(), attrs.length_of_stay_days());
    row.insert(DAILY_SPENDING_COLUMN.to_string(), attrs.daily_spending_usd());
    row.insert(
        indicator_column(PURPOSE_OF_VISIT_FIELD, attrs.purpose_of_visit().label()),
        1.0,
    );
    row.insert(
        indicator_column(HOTEL_CLASS_FIELD, attrs.hotel_class().label()),
        1.0,
    );
    row
}

/// Encode one trip against the training schema
pub fn encode(attrs: &TripAttributes, schema: &TrainingSchema) -> EncodedVector {
    let row = expand(attrs);

    let values: Vec<f64> = schema
        .columns()
        .iter()
        .map(|column| row.get(column).copied().unwrap_or(0.0))
        .collect();

    let dropped: Vec<&str> = row
        .keys()
        .filter(|column| !schema.contains(column))
        .map(String::as_str)
        .collect();
    if !dropped.is_empty() {
        debug!(?dropped, "Columns absent from training schema were dropped");
    }

    EncodedVector {
        columns: schema.columns().to_vec(),
        values,
    }
}
