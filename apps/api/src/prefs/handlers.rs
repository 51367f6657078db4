use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::prefs::{Locale, Preferences, Theme};
use crate::state::AppState;

/// Partial update; absent fields keep their current value.
#[derive(Debug, Deserialize)]
pub struct UpdatePreferencesRequest {
    pub language: Option<String>,
    pub theme: Option<String>,
}

/// GET /api/v1/preferences
pub async fn handle_get_preferences(State(state): State<AppState>) -> Json<Preferences> {
    Json(state.preferences.preferences())
}

/// PUT /api/v1/preferences
///
/// Both values are validated before either is applied.
pub async fn handle_update_preferences(
    State(state): State<AppState>,
    Json(request): Json<UpdatePreferencesRequest>,
) -> Result<Json<Preferences>, AppError> {
    let language = request
        .language
        .as_deref()
        .map(str::parse::<Locale>)
        .transpose()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let theme = request
        .theme
        .as_deref()
        .map(str::parse::<Theme>)
        .transpose()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    if let Some(language) = language {
        state.preferences.set_locale(language);
    }
    if let Some(theme) = theme {
        state.preferences.set_theme(theme);
    }

    Ok(Json(state.preferences.preferences()))
}

/// POST /api/v1/preferences/language/toggle
pub async fn handle_toggle_language(State(state): State<AppState>) -> Json<Preferences> {
    Json(state.preferences.toggle_locale())
}

/// POST /api/v1/preferences/theme/toggle
pub async fn handle_toggle_theme(State(state): State<AppState>) -> Json<Preferences> {
    Json(state.preferences.toggle_theme())
}
