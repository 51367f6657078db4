pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::fetch::handlers as fetch;
use crate::prefs::handlers as prefs;
use crate::render::handlers as render;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Remote content
        .route("/api/v1/projects", get(fetch::handle_get_projects))
        .route("/api/v1/articles", get(fetch::handle_get_articles))
        // Résumé
        .route("/api/v1/resume", get(render::handle_render_resume))
        .route(
            "/api/v1/documents/:id",
            get(render::handle_get_document).delete(render::handle_release_document),
        )
        // Preferences
        .route(
            "/api/v1/preferences",
            get(prefs::handle_get_preferences).put(prefs::handle_update_preferences),
        )
        .route(
            "/api/v1/preferences/language/toggle",
            post(prefs::handle_toggle_language),
        )
        .route(
            "/api/v1/preferences/theme/toggle",
            post(prefs::handle_toggle_theme),
        )
        .with_state(state)
}
