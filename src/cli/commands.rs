use anyhow::{bail, Context, Result};
use std::sync::Arc;
use tracing::{error, info};

use crate::config::Config;
use crate::ml::{ExpenditurePredictor, ModelArtifact};
use crate::session::SessionStore;
use crate::trip::TripForm;
use crate::view::{Block, Outcome, Page, View, ViewController};
use crate::web::{self, AppState};

fn load_artifact(config: &Config) -> Result<ModelArtifact> {
    ModelArtifact::load(&config.model.model_path, &config.model.columns_path)
        .context("Failed to load model artifact")
}

/// Run the web surface until the process is stopped
///
/// A missing or corrupt artifact does not abort startup: the server still
/// binds and answers every route with the load error instead of a view.
pub async fn serve(config: &Config) -> Result<()> {
    let app = match ModelArtifact::load(&config.model.model_path, &config.model.columns_path) {
        Ok(artifact) => {
            let predictor = ExpenditurePredictor::new(Arc::new(artifact));
            let state = AppState::new(
                predictor,
                config.server.session_capacity,
                config.display.options(),
            );
            web::create_router(state)
        }
        Err(e) => {
            error!(error = %e, "Model artifact unavailable, serving error page only");
            web::create_unavailable_router(e.to_string())
        }
    };

    web::serve(app, config.server.bind_addr).await
}

/// One-shot prediction printed as the Predict view
pub fn predict(config: &Config, stay: f64, daily: f64, purpose: &str, hotel: &str) -> Result<()> {
    let artifact = load_artifact(config)?;
    let predictor = ExpenditurePredictor::new(Arc::new(artifact));
    let controller = ViewController::new(predictor, config.display.options());
    let mut session = SessionStore::new();

    let form = TripForm::new(&stay.to_string(), &daily.to_string(), purpose, hotel);
    let response = controller.submit(&mut session, &form);

    println!("{}", render_page(&response.page));

    match response.outcome {
        Outcome::Predicted(result) => {
            info!(total_usd = result.total_usd, "One-shot prediction complete");
            Ok(())
        }
        Outcome::Rejected(e) => bail!("Invalid input: {}", e),
        Outcome::Failed(e) => bail!("Prediction failed: {}", e),
        other => bail!("Unexpected outcome: {:?}", other),
    }
}

/// About view; like every view it requires a loaded model
pub fn about(config: &Config) -> Result<()> {
    let predictor = ExpenditurePredictor::new(Arc::new(load_artifact(config)?));
    let mut controller = ViewController::new(predictor, config.display.options());
    controller.navigate(View::About);
    println!("{}", render_page(&controller.render(&SessionStore::new())));
    Ok(())
}

pub fn schema(config: &Config) -> Result<()> {
    let artifact = load_artifact(config)?;
    println!(
        "Model: {} ({})",
        artifact.model().kind(),
        artifact.model_path().display()
    );
    for (index, column) in artifact.schema().columns().iter().enumerate() {
        println!("{:>3}  {}", index, column);
    }
    Ok(())
}

/// Plain-text rendering of a page for the terminal
pub fn render_page(page: &Page) -> String {
    let mut lines = vec![page.title.clone(), "=".repeat(page.title.len())];

    for block in &page.blocks {
        match block {
            Block::Heading(text) => lines.push(format!("\n{}", text)),
            Block::Text(text) => lines.push(text.clone()),
            Block::Success(text) => lines.push(format!("✅ {}", text)),
            Block::Info(text) => lines.push(format!("📋 {}", text)),
            Block::Warning(text) => lines.push(format!("⚠️  {}", text)),
            Block::Error(text) => lines.push(format!("❌ {}", text)),
            Block::Details {
                heading,
                items,
                note,
            } => {
                lines.push(heading.clone());
                for (label, value) in items {
                    lines.push(format!("  - {}: {}", label, value));
                }
                if let Some(note) = note {
                    lines.push(format!("  Note: {}", note));
                }
            }
            Block::PredictForm(form) => {
                lines.push(format!(
                    "  Stay: {} days | Daily: {} USD | Purpose: {} | Hotel: {}",
                    form.stay_days, form.daily_spending, form.purpose, form.hotel_class
                ));
            }
            // Buttons have no terminal equivalent
            Block::ClearSummaryButton => {}
        }
    }

    if let Some(tip) = page.sidebar.tip {
        lines.push(format!("\n💡 {}", tip));
    }
    if let Some(note) = page.sidebar.contributors {
        lines.push(note.to_string());
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{DisplayOptions, Sidebar};

    #[test]
    fn test_render_page_text() {
        let page = Page {
            view: View::Summary,
            title: "Detailed Summary".to_string(),
            blocks: vec![
                Block::Details {
                    heading: "Final Estimate: $10.00".to_string(),
                    items: vec![("Total Stay".to_string(), "1.0 Days".to_string())],
                    note: None,
                },
                Block::ClearSummaryButton,
            ],
            sidebar: Sidebar {
                selected: View::Summary,
                display: DisplayOptions::default(),
                tip: None,
                contributors: None,
            },
        };

        let text = render_page(&page);
        assert!(text.starts_with("Detailed Summary\n================"));
        assert!(text.contains("Final Estimate: $10.00"));
        assert!(text.contains("  - Total Stay: 1.0 Days"));
        assert!(!text.contains("Clear"));
    }

    #[test]
    fn test_predict_requires_artifact() {
        let mut config = Config::default();
        config.model.model_path = "/nonexistent/tourism_model.json".into();
        config.model.columns_path = "/nonexistent/tourism_training_columns.json".into();

        let err = predict(&config, 7.0, 150.0, "Leisure", "Standard").unwrap_err();
        assert!(format!("{:#}", err).contains("not found"));
    }
}
