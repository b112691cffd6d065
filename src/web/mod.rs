//! HTTP surface
//!
//! Serves the three views as server-rendered HTML forms. Each browser gets a
//! session cookie mapping to its own [`SessionStore`](crate::session::SessionStore).

pub mod handlers;
pub mod render;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use crate::ml::ExpenditurePredictor;
use crate::session::SessionRegistry;
use crate::view::DisplayOptions;

pub const SESSION_COOKIE: &str = "tourspend_session";

#[derive(Clone)]
pub struct AppState {
    pub predictor: ExpenditurePredictor,
    pub sessions: Arc<SessionRegistry>,
    /// Toggle defaults when the request does not set them
    pub display: DisplayOptions,
}

impl AppState {
    pub fn new(
        predictor: ExpenditurePredictor,
        session_capacity: usize,
        display: DisplayOptions,
    ) -> Self {
        Self {
            predictor,
            sessions: Arc::new(SessionRegistry::new(session_capacity)),
            display,
        }
    }
}

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/predict",
            get(handlers::predict_view).post(handlers::predict_submit),
        )
        .route("/summary", get(handlers::summary_view))
        .route("/summary/clear", post(handlers::summary_clear))
        .route("/about", get(handlers::about_view))
        .route("/health", get(handlers::health))
        .with_state(app_state)
}

/// Router used when the model artifact failed to load
///
/// Every route answers 503 with the load error; no view is rendered.
pub fn create_unavailable_router(message: String) -> Router {
    let message: Arc<str> = Arc::from(message);
    Router::new().fallback(move || {
        let message = Arc::clone(&message);
        async move {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Html(render::startup_error(&message)),
            )
                .into_response()
        }
    })
}

pub async fn serve(app: Router, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(address = %listener.local_addr()?, "Web surface listening");
    axum::serve(listener, app).await?;
    Ok(())
}
