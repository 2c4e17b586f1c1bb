pub mod health;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::state::AppState;
use crate::sync::handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Form (host input side)
        .route("/api/v1/form", get(handlers::handle_get_form))
        .route(
            "/api/v1/form/education",
            post(handlers::handle_add_education),
        )
        .route("/api/v1/form/work", post(handlers::handle_add_work))
        .route("/api/v1/form/skills", post(handlers::handle_add_skill))
        .route(
            "/api/v1/form/controls",
            patch(handlers::handle_value_changed),
        )
        .route("/api/v1/form/submit", post(handlers::handle_submit))
        .route("/api/v1/events", post(handlers::handle_event))
        // Preview (host output side)
        .route("/api/v1/preview", get(handlers::handle_get_preview))
        .route(
            "/api/v1/preview/targets/:target",
            delete(handlers::handle_detach_target),
        )
        .with_state(state)
}
