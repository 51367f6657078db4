use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::prefs::Locale;
use crate::render::PreviewInfo;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ResumeQuery {
    pub locale: Option<String>,
}

/// GET /api/v1/resume
///
/// Renders the résumé for `locale` (default: the current language preference)
/// and replaces the published preview.
pub async fn handle_render_resume(
    State(state): State<AppState>,
    Query(query): Query<ResumeQuery>,
) -> Result<Json<PreviewInfo>, AppError> {
    let locale = match query.locale.as_deref() {
        Some(raw) => raw
            .parse::<Locale>()
            .map_err(|e| AppError::Validation(e.to_string()))?,
        None => state.preferences.locale(),
    };

    let doc = state
        .catalog
        .get(locale)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("No resume for locale '{}'", locale.as_str())))?;

    let info = state.preview.rerender(doc, locale).await?;
    Ok(Json(info))
}

/// GET /api/v1/documents/:id
pub async fn handle_get_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let bytes = state
        .documents
        .get(id)
        .ok_or_else(|| AppError::NotFound(format!("Document {id} not found")))?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (header::CONTENT_DISPOSITION, "inline; filename=\"resume.pdf\""),
        ],
        bytes,
    )
        .into_response())
}

/// DELETE /api/v1/documents/:id
pub async fn handle_release_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.preview.release(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Document {id} not found")))
    }
}
