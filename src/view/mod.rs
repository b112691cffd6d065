//! View controller for the Predict / Summary / About screens
//!
//! The controller is renderer-neutral: every action returns a [`Page`] made
//! of [`Block`]s which the web surface turns into HTML and the CLI into text.
//! It never owns session state; the caller lends it the session's
//! [`SessionStore`] for the duration of one action.

pub mod format;

pub use format::{format_usd, recap};

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{error, info, warn};

use crate::ml::{ExpenditurePredictor, PredictError, PredictionResult};
use crate::session::SessionStore;
use crate::trip::{
    HotelClass, PurposeOfVisit, TripError, TripForm, DEFAULT_DAILY_SPENDING_USD,
    DEFAULT_STAY_DAYS,
};

pub const HELP_TIP: &str =
    "Tips: Higher hotel classes significantly increase predicted expenditure.";
pub const CONTRIBUTORS_NOTE: &str = "This Project Prepared by Group work Team";
pub const EMPTY_SUMMARY_NOTICE: &str = "No prediction data found. \
    Please go to 'Predict Expenditure' and click the predict button first.";
pub const PURPOSE_HELP: &str =
    "Select the primary reason for your trip. 'VFR' stands for Visiting Friends and Relatives.";
pub const HOTEL_HELP: &str = "Choose the star rating or category of your accommodation.";

/// The three navigable screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Predict,
    Summary,
    About,
}

impl View {
    pub const ALL: [View; 3] = [View::Predict, View::Summary, View::About];

    /// Navigation menu label
    pub fn label(&self) -> &'static str {
        match self {
            View::Predict => "Predict Expenditure",
            View::Summary => "Summary",
            View::About => "About Project",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            View::Predict => "predict",
            View::Summary => "summary",
            View::About => "about",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sidebar toggles; they change rendering only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayOptions {
    pub show_tips: bool,
    pub show_contributors: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_tips: true,
            show_contributors: false,
        }
    }
}

/// Values to pre-fill the Predict form with
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub stay_days: String,
    pub daily_spending: String,
    pub purpose: String,
    pub hotel_class: String,
    pub purpose_options: Vec<&'static str>,
    pub hotel_options: Vec<&'static str>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            stay_days: format!("{:.1}", DEFAULT_STAY_DAYS),
            daily_spending: format!("{:.1}", DEFAULT_DAILY_SPENDING_USD),
            purpose: PurposeOfVisit::ALL[0].label().to_string(),
            hotel_class: HotelClass::ALL[0].label().to_string(),
            purpose_options: PurposeOfVisit::ALL.iter().map(|p| p.label()).collect(),
            hotel_options: HotelClass::ALL.iter().map(|h| h.label()).collect(),
        }
    }
}

impl FormState {
    /// Echo a submission back, keeping defaults for blank fields
    pub fn from_submission(form: &TripForm) -> Self {
        let defaults = Self::default();
        let pick = |raw: &Option<String>, fallback: String| {
            raw.as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .unwrap_or(fallback)
        };
        Self {
            stay_days: pick(&form.stay_days, defaults.stay_days),
            daily_spending: pick(&form.daily_spending, defaults.daily_spending),
            purpose: pick(&form.purpose, defaults.purpose),
            hotel_class: pick(&form.hotel_class, defaults.hotel_class),
            purpose_options: defaults.purpose_options,
            hotel_options: defaults.hotel_options,
        }
    }
}

/// One piece of page content
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading(String),
    Text(String),
    Success(String),
    Info(String),
    Warning(String),
    Error(String),
    /// Labelled facts, rendered as a list
    Details {
        heading: String,
        items: Vec<(String, String)>,
        note: Option<String>,
    },
    PredictForm(FormState),
    ClearSummaryButton,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sidebar {
    pub selected: View,
    pub display: DisplayOptions,
    pub tip: Option<&'static str>,
    pub contributors: Option<&'static str>,
}

impl Sidebar {
    fn new(selected: View, display: DisplayOptions) -> Self {
        Self {
            selected,
            display,
            tip: display.show_tips.then_some(HELP_TIP),
            contributors: display.show_contributors.then_some(CONTRIBUTORS_NOTE),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub view: View,
    pub title: String,
    pub blocks: Vec<Block>,
    pub sidebar: Sidebar,
}

impl Page {
    fn new(view: View, title: &str, display: DisplayOptions) -> Self {
        Self {
            view,
            title: title.to_string(),
            blocks: Vec::new(),
            sidebar: Sidebar::new(view, display),
        }
    }

    fn push(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }
}

/// What an action did to the session
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Plain render, no state change
    Rendered,
    Predicted(PredictionResult),
    /// Input failed validation; the store was not touched
    Rejected(TripError),
    /// The model call failed; the store was not touched
    Failed(PredictError),
    Cleared,
    /// Action not available on the current view
    Ignored,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub page: Page,
    pub outcome: Outcome,
}

impl Response {
    fn rendered(page: Page) -> Self {
        Self {
            page,
            outcome: Outcome::Rendered,
        }
    }
}

/// Three-state screen selector
///
/// Transitions only happen through [`ViewController::navigate`]; actions
/// never move to another view on their own.
#[derive(Debug, Clone)]
pub struct ViewController {
    predictor: ExpenditurePredictor,
    view: View,
    display: DisplayOptions,
}

impl ViewController {
    pub fn new(predictor: ExpenditurePredictor, display: DisplayOptions) -> Self {
        Self {
            predictor,
            view: View::default(),
            display,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn navigate(&mut self, view: View) {
        self.view = view;
    }

    pub fn display(&self) -> DisplayOptions {
        self.display
    }

    pub fn set_display(&mut self, display: DisplayOptions) {
        self.display = display;
    }

    /// Render the current view without acting
    pub fn render(&self, session: &SessionStore) -> Page {
        match self.view {
            View::Predict => self.predict_page(FormState::default()),
            View::Summary => self.summary_page(session),
            View::About => self.about_page(),
        }
    }

    /// Predict submit: validate, encode, predict, record, render
    pub fn submit(&self, session: &mut SessionStore, form: &TripForm) -> Response {
        if self.view != View::Predict {
            return Response {
                page: self.render(session),
                outcome: Outcome::Ignored,
            };
        }

        let echoed = FormState::from_submission(form);

        let trip = match form.parse() {
            Ok(trip) => trip,
            Err(e) => {
                warn!(field = e.field(), error = %e, "Rejected trip input");
                let page = self
                    .predict_page(echoed)
                    .push(Block::Error(e.to_string()));
                return Response {
                    page,
                    outcome: Outcome::Rejected(e),
                };
            }
        };

        match self.predictor.estimate(&trip) {
            Ok(result) => {
                info!(total_usd = result.total_usd, "Prediction recorded");
                session.record_prediction(result.clone());

                let page = self
                    .predict_page(echoed)
                    .push(Block::Success(format!(
                        "Predicted Total Expenditure: {}",
                        format_usd(result.total_usd)
                    )))
                    .push(Block::Info(format!("Summary: {}", recap(&result.trip))));
                Response {
                    page,
                    outcome: Outcome::Predicted(result),
                }
            }
            Err(e) => {
                error!(error = %e, "Prediction failed");
                let page = self
                    .predict_page(echoed)
                    .push(Block::Error(format!("Prediction failed: {}", e)));
                Response {
                    page,
                    outcome: Outcome::Failed(e),
                }
            }
        }
    }

    /// Summary "Clear Summary" action
    pub fn clear(&self, session: &mut SessionStore) -> Response {
        if self.view != View::Summary {
            return Response {
                page: self.render(session),
                outcome: Outcome::Ignored,
            };
        }

        session.clear();
        info!("Summary cleared");
        Response {
            page: self.summary_page(session),
            outcome: Outcome::Cleared,
        }
    }

    /// Render, wrapped as a response with no state change
    pub fn show(&self, session: &SessionStore) -> Response {
        Response::rendered(self.render(session))
    }

    fn predict_page(&self, form: FormState) -> Page {
        Page::new(View::Predict, "Tanzania Tourism Expenditure", self.display)
            .push(Block::Text(
                "Predict the total expenditure of a tourist based on their visit details."
                    .to_string(),
            ))
            .push(Block::Heading("Enter Visit Details".to_string()))
            .push(Block::PredictForm(form))
    }

    fn summary_page(&self, session: &SessionStore) -> Page {
        let page = Page::new(View::Summary, "Detailed Summary", self.display);

        match session.current_prediction() {
            Some(result) => {
                let trip = &result.trip;
                page.push(Block::Details {
                    heading: format!("Final Estimate: {}", format_usd(result.total_usd)),
                    items: vec![
                        ("Primary Purpose".to_string(), trip.purpose_of_visit().to_string()),
                        ("Accommodation".to_string(), format!("{} Class", trip.hotel_class())),
                        (
                            "Total Stay".to_string(),
                            format!("{:.1} Days", trip.length_of_stay_days()),
                        ),
                        (
                            "Daily Expenditure Rate".to_string(),
                            format_usd(trip.daily_spending_usd()),
                        ),
                    ],
                    note: Some(
                        "This estimate is based on the current machine learning model parameters."
                            .to_string(),
                    ),
                })
                .push(Block::ClearSummaryButton)
            }
            None => page.push(Block::Warning(EMPTY_SUMMARY_NOTICE.to_string())),
        }
    }

    fn about_page(&self) -> Page {
        Page::new(View::About, "About the Model", self.display)
            .push(Block::Text(
                "This application uses Machine Learning to estimate tourism revenue for Tanzania."
                    .to_string(),
            ))
            .push(Block::Text(
                "It was developed to help analyze the impact of different stay factors \
                 on total tourist spending."
                    .to_string(),
            ))
            .push(Block::Details {
                heading: "Developer Info".to_string(),
                items: vec![
                    (
                        "Entity".to_string(),
                        "Eastern Africa Statistical Training Centre (EASTC)".to_string(),
                    ),
                    (
                        "Variables".to_string(),
                        "Length of Stay, Purpose, Daily Spending, Hotel Class.".to_string(),
                    ),
                ],
                note: None,
            })
    }
}
