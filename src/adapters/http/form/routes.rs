//! HTTP routes for the web form and prediction API.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{create_prediction, show_form, submit_form, FormHandlers};

/// Creates the form router (`/`, `/predict`, `/api/v1/predictions`).
pub fn form_routes(handlers: FormHandlers) -> Router {
    Router::new()
        .route("/", get(show_form))
        .route("/predict", post(submit_form))
        .route("/api/v1/predictions", post(create_prediction))
        .with_state(handlers)
}
