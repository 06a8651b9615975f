use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/habits", get(handlers::list_habits).post(handlers::create_habit))
        .route("/api/habits/:id/status", post(handlers::update_status))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/categories", get(handlers::get_categories))
        .route(
            "/api/settings",
            get(handlers::get_settings).put(handlers::update_settings),
        )
        .with_state(state)
}
