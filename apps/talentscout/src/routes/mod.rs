pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::interview::handlers as interview;
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/classify", post(interview::handle_classify))
        // Session API
        .route("/api/v1/sessions", post(session::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(session::handle_get_session).delete(session::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/reset",
            post(session::handle_reset_session),
        )
        .route(
            "/api/v1/sessions/:id/candidate",
            post(session::handle_submit_candidate),
        )
        .route(
            "/api/v1/sessions/:id/answers/:index",
            put(session::handle_record_answer),
        )
        .route(
            "/api/v1/sessions/:id/follow-up",
            post(session::handle_follow_up),
        )
        .route("/api/v1/sessions/:id/messages", post(session::handle_message))
        .with_state(state)
}
