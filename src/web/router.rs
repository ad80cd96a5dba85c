use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::agent::QuestionAnswerer;

use super::{ask_handler, form_handler, health_handler, index_handler};

/// Create the application router.
///
/// Routes:
/// - GET  /         - Question form
/// - POST /         - Form submission, re-renders the form with the answer
/// - POST /api/ask  - JSON API
/// - GET  /health   - Liveness check
pub fn create_router(answerer: Arc<QuestionAnswerer>) -> Router {
    Router::new()
        .route("/", get(index_handler).post(form_handler))
        .route("/api/ask", post(ask_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(answerer)
}
