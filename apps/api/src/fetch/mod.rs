// Fetch cascade for remote portfolio content.
// Implements: primary → secondary → embedded fallback, articles throttling, id synthesis.
// `ResourceLoader::load` is infallible; upstream failures surface only as a warning.

pub mod fallback;
pub mod handlers;
pub mod loader;
pub mod sources;
pub mod throttle;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{RemoteItem, ResourceKind};

pub use loader::ResourceLoader;
pub use throttle::Throttle;

/// Which source ultimately answered a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    Primary,
    Secondary,
    Fallback,
}

/// Advisory attached when the fallback dataset was used because live sources failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchWarning {
    /// At least one source failed (transport error, timeout, non-2xx, malformed body, not configured).
    #[serde(rename = "upstream-unavailable")]
    UpstreamUnavailable,
    /// Every source answered, but with zero items.
    #[serde(rename = "upstream-empty")]
    UpstreamEmpty,
}

impl FetchWarning {
    pub fn code(&self) -> &'static str {
        match self {
            FetchWarning::UpstreamUnavailable => "upstream-unavailable",
            FetchWarning::UpstreamEmpty => "upstream-empty",
        }
    }

    /// One-line message suitable for display next to a retry button.
    pub fn message(&self, kind: ResourceKind) -> String {
        match self {
            FetchWarning::UpstreamUnavailable => {
                format!("Could not fetch {kind} from the API. Showing sample {kind} instead.")
            }
            FetchWarning::UpstreamEmpty => {
                format!("No {kind} are available right now. Showing sample {kind} instead.")
            }
        }
    }
}

/// Outcome of one `ResourceLoader::load` call. Built fresh per call and never mutated after.
#[derive(Debug, Clone, Serialize)]
pub struct FetchResult {
    pub kind: ResourceKind,
    pub items: Vec<RemoteItem>,
    pub provenance: Provenance,
    pub warning: Option<FetchWarning>,
}

/// Caller options for a single load.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Skip live sources and serve the fallback dataset. No warning is attached.
    pub force_fallback: bool,
}

/// Failure of a single source attempt. Recovered inside the cascade.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream returned status {status}")]
    Status { status: u16 },

    #[error("Malformed response body: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Source not configured: {0}")]
    NotConfigured(&'static str),
}
