pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::favorites::handlers as favorites;
use crate::jobs::handlers as jobs;
use crate::preferences::handlers as preferences;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Job views
        .route("/api/v1/home", get(jobs::handle_home))
        .route("/api/v1/jobs", get(jobs::handle_board))
        .route("/api/v1/jobs/recommended", get(jobs::handle_recommended))
        .route("/api/v1/jobs/trending", get(jobs::handle_trending))
        // Preferences
        .route(
            "/api/v1/preferences/:user_id",
            get(preferences::handle_get_preferences),
        )
        .route(
            "/api/v1/preferences/:user_id/job_types",
            put(preferences::handle_save_job_types),
        )
        .route(
            "/api/v1/preferences/:user_id/:dimension",
            put(preferences::handle_save_preferences),
        )
        // Favorites
        .route(
            "/api/v1/favorites/:user_id",
            get(favorites::handle_list_favorites),
        )
        .route(
            "/api/v1/favorites/:user_id/toggle",
            post(favorites::handle_toggle_favorite),
        )
        .with_state(state)
}
