// Résumé rendering: layout pass, PDF serialization, published document handles.
// The layout pass is CPU-bound and must run inside tokio::task::spawn_blocking.

pub mod cursor;
pub mod handle;
pub mod handlers;
pub mod pdf;
pub mod resume;

use bytes::Bytes;
use thiserror::Error;

use crate::layout::{PageGeometry, TextMeasure};
use crate::models::resume::ResumeDocument;

pub use handle::{DocumentStore, PreviewInfo, ResumePreview};
pub use resume::layout_resume;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF serialization failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("I/O error while writing PDF: {0}")]
    Io(#[from] std::io::Error),

    #[error("Render task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Immutable output of one render pass.
#[derive(Debug, Clone)]
pub struct RenderedResume {
    pub bytes: Bytes,
    pub pages: usize,
    pub size: usize,
}

/// Lays out and serializes `doc` in one pass.
pub fn render_resume(
    doc: &ResumeDocument,
    geometry: PageGeometry,
    measure: &dyn TextMeasure,
) -> Result<RenderedResume, RenderError> {
    let list = layout_resume(doc, geometry, measure);
    let bytes = pdf::write_pdf(&list)?;
    Ok(RenderedResume {
        pages: list.page_count(),
        size: bytes.len(),
        bytes,
    })
}
