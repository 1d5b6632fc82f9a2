//! The HTTP form server.

use crate::config::AppConfig;
use crate::page::{self, FormState};
use axum::{
    extract::{Form, State},
    response::Html,
    routing::{get, post},
    Router,
};
use learnloop_tutor::{Level, Submission, Tutor};
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

/// Server errors
#[derive(Error, Debug)]
pub enum ServeError {
    #[error("failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// State shared by all handlers.
#[derive(Debug, Clone, Copy)]
pub struct AppState {
    pub tutor: Tutor,
}

/// The fields of a submitted form. An unchecked checkbox is not sent at all.
#[derive(Debug, Deserialize)]
pub struct ExplainForm {
    #[serde(default)]
    pub question: String,

    #[serde(default)]
    pub level: Option<Level>,

    #[serde(default)]
    pub step_by_step: Option<String>,
}

/// `GET /`: the empty form.
async fn index(State(state): State<AppState>) -> Html<String> {
    Html(page::render(&FormState::empty(state.tutor.config().default_level)))
}

/// `POST /explain`: the form with the answer to the submitted question.
async fn explain(State(state): State<AppState>, Form(form): Form<ExplainForm>) -> Html<String> {
    let submission = Submission {
        question: form.question,
        level: form.level,
        step_by_step: form.step_by_step.is_some(),
    };
    let answer = state.tutor.answer(&submission);

    Html(page::render(&FormState {
        question: &submission.question,
        level: submission.level.unwrap_or(state.tutor.config().default_level),
        step_by_step: submission.step_by_step,
        answer: Some(&answer),
    }))
}

/// `GET /health`
async fn health() -> &'static str {
    "ok"
}

/// Builds the router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/explain", post(explain))
        .route("/health", get(health))
        .with_state(state)
}

/// Resolves when the process receives Ctrl-C.
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

/// Serves the form until the process is interrupted.
pub async fn serve(config: &AppConfig) -> Result<(), ServeError> {
    let addr = config.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ServeError::Bind { addr: addr.clone(), source })?;

    info!(%addr, default_level = %config.default_level, "serving LearnLoop");
    let app = router(AppState { tutor: Tutor::new(config.tutor()) });
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
