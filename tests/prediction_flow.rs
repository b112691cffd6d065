//! Integration tests for the predict / summary / clear flow
//! Exercises validation, encoding, inference and session state end to end

mod common;

use common::{ArtifactFixture, COLUMNS};
use tourspend::ml::{encode, ModelArtifact, PredictError};
use tourspend::session::SessionStore;
use tourspend::trip::{HotelClass, PurposeOfVisit, TripAttributes, TripError, TripForm};
use tourspend::view::{Block, DisplayOptions, Outcome, View, ViewController};

fn controller(fixture: &ArtifactFixture) -> ViewController {
    ViewController::new(fixture.predictor(), DisplayOptions::default())
}

#[test]
fn test_encoded_vector_matches_schema() {
    let fixture = ArtifactFixture::linear();
    let artifact = fixture.load();
    let schema = artifact.schema();

    for purpose in PurposeOfVisit::ALL {
        for hotel in HotelClass::ALL {
            let trip = TripAttributes::new(3.0, 75.0, purpose, hotel).unwrap();
            let vector = encode(&trip, schema);

            assert_eq!(vector.len(), schema.len(), "Vector width must equal schema width");
            assert_eq!(vector.columns(), schema.columns(), "Column order must follow schema");

            let purpose_hot: f64 = vector
                .iter()
                .filter(|(c, _)| c.starts_with("Purpose_of_Visit_"))
                .map(|(_, v)| v)
                .sum();
            let expected = if purpose == PurposeOfVisit::Business { 0.0 } else { 1.0 };
            assert_eq!(purpose_hot, expected, "Unexpected indicators for {}", purpose);
        }
    }
}

#[test]
fn test_leisure_standard_prediction() {
    let fixture = ArtifactFixture::linear();
    let controller = controller(&fixture);
    let mut session = SessionStore::new();

    let form = TripForm::new("7.0", "150.0", "Leisure", "Standard");
    let response = controller.submit(&mut session, &form);

    // -640 + 142.5 * 7 + 6.8 * 150 - 40 + 420
    match response.outcome {
        Outcome::Predicted(result) => assert!((result.total_usd - 1757.5).abs() < 1e-9),
        other => panic!("Expected a prediction, got {:?}", other),
    }
    assert!(response.page.blocks.contains(&Block::Success(
        "Predicted Total Expenditure: $1,757.50".to_string()
    )));
    assert!(session.current_prediction().is_some());
}

#[test]
fn test_below_minimum_stay_leaves_state_untouched() {
    let fixture = ArtifactFixture::linear();
    let controller = controller(&fixture);
    let mut session = SessionStore::new();

    let form = TripForm::new("0.4", "150.0", "Leisure", "Standard");
    let response = controller.submit(&mut session, &form);

    assert!(matches!(response.outcome, Outcome::Rejected(TripError::OutOfRange { .. })));
    assert!(session.current_prediction().is_none(), "Rejected input must not be recorded");
}

#[test]
fn test_summary_round_trip_and_clear() {
    let fixture = ArtifactFixture::linear();
    let mut controller = controller(&fixture);
    let mut session = SessionStore::new();

    controller.navigate(View::Summary);
    let empty = controller.render(&session);
    assert!(matches!(
        empty.blocks.as_slice(),
        [Block::Warning(text)] if text.starts_with("No prediction data found")
    ));

    controller.navigate(View::Predict);
    controller.submit(&mut session, &TripForm::new("10", "200", "Conference", "Luxury"));

    controller.navigate(View::Summary);
    let summary = controller.render(&session);
    let heading = summary.blocks.iter().find_map(|b| match b {
        Block::Details { heading, .. } => Some(heading.clone()),
        _ => None,
    });
    // -640 + 1425 + 1360 + 95 + 1380
    assert_eq!(heading.as_deref(), Some("Final Estimate: $3,620.00"));

    let cleared = controller.clear(&mut session);
    assert_eq!(cleared.outcome, Outcome::Cleared);
    assert!(session.current_prediction().is_none());
}

#[test]
fn test_shape_mismatch_fails_only_the_action() {
    let fixture = ArtifactFixture::new(
        r#"{"kind":"linear","intercept":0.0,"coefficients":[1.0,2.0]}"#,
        COLUMNS,
    );
    let controller = controller(&fixture);
    let mut session = SessionStore::new();

    let form = TripForm::new("7", "150", "VFR", "Budget");
    let response = controller.submit(&mut session, &form);

    assert!(matches!(
        response.outcome,
        Outcome::Failed(PredictError::ShapeMismatch { expected: 2, actual: 7 })
    ));
    assert!(session.current_prediction().is_none());
}

#[test]
fn test_failed_prediction_keeps_earlier_summary() {
    let working = ArtifactFixture::linear();
    let broken = ArtifactFixture::new(
        r#"{"kind":"linear","intercept":0.0,"coefficients":[1.0,2.0]}"#,
        COLUMNS,
    );
    let mut session = SessionStore::new();

    let form = TripForm::new("7.0", "150.0", "Leisure", "Standard");
    controller(&working).submit(&mut session, &form);
    let before = session.current_prediction().cloned();
    assert_eq!(before.as_ref().map(|r| r.total_usd), Some(1757.5));

    let form = TripForm::new("10", "200", "Conference", "Luxury");
    let response = controller(&broken).submit(&mut session, &form);

    assert!(matches!(
        response.outcome,
        Outcome::Failed(PredictError::ShapeMismatch { expected: 2, actual: 7 })
    ));
    assert_eq!(session.current_prediction().cloned(), before);

    let mut summary = controller(&working);
    summary.navigate(View::Summary);
    let page = summary.render(&session);
    assert!(matches!(
        page.blocks.first(),
        Some(Block::Details { heading, .. }) if heading == "Final Estimate: $1,757.50"
    ));
}

#[test]
fn test_tree_ensemble_artifact() {
    let model = r#"{
        "kind": "tree_ensemble",
        "aggregation": "mean",
        "n_features": 7,
        "trees": [
            {"nodes": [
                {"feature": 5, "threshold": 0.5, "left": 1, "right": 2},
                {"leaf": 800.0},
                {"leaf": 3000.0}
            ]},
            {"nodes": [
                {"feature": 0, "threshold": 5.0, "left": 1, "right": 2},
                {"leaf": 400.0},
                {"leaf": 1200.0}
            ]}
        ]
    }"#;
    let fixture = ArtifactFixture::new(model, COLUMNS);
    let controller = controller(&fixture);
    let mut session = SessionStore::new();

    controller.submit(&mut session, &TripForm::new("7", "150", "Leisure", "Luxury"));

    let total = session.current_prediction().map(|r| r.total_usd);
    assert_eq!(total, Some((3000.0 + 1200.0) / 2.0));
}

#[test]
fn test_shipped_demo_artifact_loads() {
    // Integration tests run from the package root
    let artifact = ModelArtifact::load(
        "models/tourism_model.json".as_ref(),
        "models/tourism_training_columns.json".as_ref(),
    )
    .expect("Demo artifact should load");

    assert_eq!(artifact.model().kind(), "linear");
    assert_eq!(artifact.model().expected_features(), Some(artifact.schema().len()));
}
