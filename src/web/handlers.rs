//! HTTP request handlers
//!
//! Every handler resolves the caller's session from the cookie, builds a
//! controller positioned on the requested view and renders its page.

use axum::{
    extract::{Form, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use super::{render, AppState, SESSION_COOKIE};
use crate::trip::TripForm;
use crate::view::{DisplayOptions, Outcome, View, ViewController};

/// Sidebar toggles carried in the query string
#[derive(Debug, Default, Deserialize)]
pub struct DisplayQuery {
    pub tips: Option<bool>,
    pub contributors: Option<bool>,
}

impl DisplayQuery {
    fn resolve(&self, defaults: DisplayOptions) -> DisplayOptions {
        DisplayOptions {
            show_tips: self.tips.unwrap_or(defaults.show_tips),
            show_contributors: self.contributors.unwrap_or(defaults.show_contributors),
        }
    }
}

/// Session id from the `Cookie` header, if present and well-formed
pub fn session_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

fn session_cookie(id: Uuid) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        SESSION_COOKIE, id
    ))
    .ok()
}

/// Attach the session cookie when the session was just created
fn with_cookie(mut response: Response, id: Uuid, created: bool) -> Response {
    if created {
        if let Some(cookie) = session_cookie(id) {
            response.headers_mut().insert(header::SET_COOKIE, cookie);
        }
    }
    response
}

fn controller(state: &AppState, view: View, display: DisplayOptions) -> ViewController {
    let mut controller = ViewController::new(state.predictor.clone(), display);
    controller.navigate(view);
    controller
}

/// Render a view that has no action attached
fn show(state: &AppState, headers: &HeaderMap, query: &DisplayQuery, view: View) -> Response {
    let controller = controller(state, view, query.resolve(state.display));

    let (id, created, page) = state
        .sessions
        .with_resolved(session_from_headers(headers), |store| controller.show(store).page);

    with_cookie(Html(render::page(&page)).into_response(), id, created)
}

pub async fn index(State(state): State<AppState>, Query(query): Query<DisplayQuery>) -> Redirect {
    let display = query.resolve(state.display);
    Redirect::to(&format!("/predict{}", render::query_string(&display)))
}

pub async fn predict_view(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<DisplayQuery>,
) -> Response {
    show(&state, &headers, &query, View::Predict)
}

pub async fn predict_submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<DisplayQuery>,
    Form(form): Form<TripForm>,
) -> Response {
    let controller = controller(&state, View::Predict, query.resolve(state.display));

    let (id, created, response) = state
        .sessions
        .with_resolved(session_from_headers(&headers), |store| {
            controller.submit(store, &form)
        });

    let status = match &response.outcome {
        Outcome::Rejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
        Outcome::Failed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::OK,
    };
    debug!(session = %id, status = status.as_u16(), "Predict submit handled");

    with_cookie(
        (status, Html(render::page(&response.page))).into_response(),
        id,
        created,
    )
}

pub async fn summary_view(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<DisplayQuery>,
) -> Response {
    show(&state, &headers, &query, View::Summary)
}

pub async fn summary_clear(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<DisplayQuery>,
) -> Response {
    let display = query.resolve(state.display);
    let controller = controller(&state, View::Summary, display);

    let (id, created, _) = state
        .sessions
        .with_resolved(session_from_headers(&headers), |store| controller.clear(store));

    let target = format!("/summary{}", render::query_string(&display));
    with_cookie(Redirect::to(&target).into_response(), id, created)
}

pub async fn about_view(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<DisplayQuery>,
) -> Response {
    show(&state, &headers, &query, View::About)
}

/// Liveness plus the loaded schema width
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let artifact = state.predictor.artifact();
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "healthy",
            "version": env!("CARGO_PKG_VERSION"),
            "model": artifact.model().kind(),
            "columns": artifact.schema().len(),
            "sessions": state.sessions.len(),
        })),
    )
}
