use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::fetch::ResourceLoader;
use crate::layout::PageGeometry;
use crate::models::resume::ResumeCatalog;
use crate::prefs::{AppContext, PreferenceStore};
use crate::render::{DocumentStore, ResumePreview};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Fetch cascade for projects and articles.
    pub loader: Arc<ResourceLoader>,
    pub catalog: Arc<ResumeCatalog>,
    /// Published PDFs, addressed by `/api/v1/documents/:id`.
    pub documents: Arc<DocumentStore>,
    /// The single résumé preview; owns the live document handle.
    pub preview: Arc<ResumePreview>,
    pub preferences: Arc<AppContext>,
}

impl AppState {
    pub fn from_config(config: &Config, preference_store: Arc<dyn PreferenceStore>) -> Result<Self> {
        let loader = ResourceLoader::from_config(config)?;
        let catalog = ResumeCatalog::embedded().context("Embedded resume data is malformed")?;
        info!(locales = ?catalog.locales(), "Resume catalog loaded");
        let documents = DocumentStore::new();
        let preview = ResumePreview::new(documents.clone(), PageGeometry::letter());
        let preferences = AppContext::load(preference_store, config.prefers_dark);

        Ok(Self {
            loader: Arc::new(loader),
            catalog: Arc::new(catalog),
            documents,
            preview: Arc::new(preview),
            preferences: Arc::new(preferences),
        })
    }
}
