// TourSpend - Tanzania tourism expenditure prediction
// Collects trip attributes through a small web form, aligns them with the
// model's training schema and reports the predicted total expenditure.

#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod cli;
pub mod config;
pub mod ml;
pub mod session;
pub mod trip;
pub mod view;
pub mod web;

// Re-export commonly used items
pub use config::Config;
pub use ml::{ExpenditurePredictor, ModelArtifact, PredictionResult, TrainingSchema};
pub use session::{SessionRegistry, SessionStore};
pub use trip::{HotelClass, PurposeOfVisit, TripAttributes, TripForm};
pub use view::{View, ViewController};
