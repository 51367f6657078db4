//! Published documents and their scoped handles.
//!
//! A rendered PDF is reachable at `/api/v1/documents/{id}` for as long as its
//! `DocumentHandle` lives. Releasing the handle, explicitly or by dropping it,
//! revokes the URL exactly once.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::layout::{PageGeometry, StandardMetrics};
use crate::models::resume::ResumeDocument;
use crate::prefs::Locale;
use crate::render::{render_resume, RenderError};

const DOCUMENT_ROUTE: &str = "/api/v1/documents";

pub fn document_url(id: Uuid) -> String {
    format!("{DOCUMENT_ROUTE}/{id}")
}

// ────────────────────────────────────────────────────────────────────────────
// Document store
// ────────────────────────────────────────────────────────────────────────────

/// In-memory registry of published PDFs.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: Mutex<HashMap<Uuid, Bytes>>,
    published: AtomicUsize,
    released: AtomicUsize,
}

impl DocumentStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Makes `bytes` reachable and returns the handle that owns the URL.
    pub fn publish(self: &Arc<Self>, bytes: Bytes) -> DocumentHandle {
        let id = Uuid::new_v4();
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, bytes);
        self.published.fetch_add(1, Ordering::SeqCst);
        debug!(%id, "Document published");

        DocumentHandle {
            id,
            store: Arc::clone(self),
            released: false,
        }
    }

    pub fn get(&self, id: Uuid) -> Option<Bytes> {
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    fn revoke(&self, id: Uuid) {
        let removed = self
            .documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id);
        if removed.is_some() {
            self.released.fetch_add(1, Ordering::SeqCst);
            debug!(%id, "Document released");
        }
    }

    pub fn live_count(&self) -> usize {
        self.documents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn published_count(&self) -> usize {
        self.published.load(Ordering::SeqCst)
    }

    pub fn released_count(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handle
// ────────────────────────────────────────────────────────────────────────────

/// Owner of one published document URL.
#[derive(Debug)]
pub struct DocumentHandle {
    id: Uuid,
    store: Arc<DocumentStore>,
    released: bool,
}

impl DocumentHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn url(&self) -> String {
        document_url(self.id)
    }

    /// Revokes the URL now rather than at drop.
    pub fn release(mut self) {
        self.revoke();
    }

    fn revoke(&mut self) {
        if !self.released {
            self.released = true;
            self.store.revoke(self.id);
        }
    }
}

impl Drop for DocumentHandle {
    fn drop(&mut self) {
        self.revoke();
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Preview
// ────────────────────────────────────────────────────────────────────────────

/// Public description of the current preview.
#[derive(Debug, Clone, Serialize)]
pub struct PreviewInfo {
    pub id: Uuid,
    pub url: String,
    pub locale: Locale,
    pub pages: usize,
    pub bytes: usize,
}

struct PreviewEntry {
    handle: DocumentHandle,
    info: PreviewInfo,
}

/// The single résumé preview the service keeps published.
///
/// A new pass first releases the previous handle. The async mutex is held for
/// the whole pass, so two passes never overlap.
pub struct ResumePreview {
    store: Arc<DocumentStore>,
    geometry: PageGeometry,
    current: tokio::sync::Mutex<Option<PreviewEntry>>,
}

impl ResumePreview {
    pub fn new(store: Arc<DocumentStore>, geometry: PageGeometry) -> Self {
        Self {
            store,
            geometry,
            current: tokio::sync::Mutex::new(None),
        }
    }

    /// Renders `doc` off the async runtime and publishes it as the new preview.
    pub async fn rerender(
        &self,
        doc: ResumeDocument,
        locale: Locale,
    ) -> Result<PreviewInfo, RenderError> {
        let mut current = self.current.lock().await;
        if let Some(previous) = current.take() {
            debug!(id = %previous.info.id, "Releasing previous preview");
            previous.handle.release();
        }

        let geometry = self.geometry;
        let rendered =
            tokio::task::spawn_blocking(move || render_resume(&doc, geometry, &StandardMetrics))
                .await??;

        let handle = self.store.publish(rendered.bytes);
        let info = PreviewInfo {
            id: handle.id(),
            url: handle.url(),
            locale,
            pages: rendered.pages,
            bytes: rendered.size,
        };
        info!(id = %info.id, locale = locale.as_str(), pages = info.pages, "Resume rendered");

        *current = Some(PreviewEntry {
            handle,
            info: info.clone(),
        });
        Ok(info)
    }

    pub async fn current(&self) -> Option<PreviewInfo> {
        self.current.lock().await.as_ref().map(|e| e.info.clone())
    }

    /// Releases the preview if its id is `id`. Returns whether anything was released.
    pub async fn release(&self, id: Uuid) -> bool {
        let mut current = self.current.lock().await;
        match current.take() {
            Some(entry) if entry.info.id == id => {
                entry.handle.release();
                true
            }
            other => {
                *current = other;
                false
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
