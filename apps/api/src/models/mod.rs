pub mod article;
pub mod project;
pub mod resume;

use serde::{Deserialize, Serialize};

pub use article::ArticleItem;
pub use project::{Language, ProjectItem};

/// The two resource kinds the portfolio fetches from remote backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Projects,
    Articles,
}

impl ResourceKind {
    /// Prefix used when synthesizing positional ids for live items.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            ResourceKind::Projects => "project",
            ResourceKind::Articles => "post",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Projects => f.write_str("projects"),
            ResourceKind::Articles => f.write_str("articles"),
        }
    }
}

/// An externally sourced record, tagged with the kind the loader asked for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RemoteItem {
    Project(ProjectItem),
    Article(ArticleItem),
}

impl RemoteItem {
    pub fn kind(&self) -> ResourceKind {
        match self {
            RemoteItem::Project(_) => ResourceKind::Projects,
            RemoteItem::Article(_) => ResourceKind::Articles,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            RemoteItem::Project(p) => &p.id,
            RemoteItem::Article(a) => &a.id,
        }
    }

    pub(crate) fn set_id(&mut self, id: String) {
        match self {
            RemoteItem::Project(p) => p.id = id,
            RemoteItem::Article(a) => a.id = id,
        }
    }

    pub fn as_article(&self) -> Option<&ArticleItem> {
        match self {
            RemoteItem::Article(a) => Some(a),
            RemoteItem::Project(_) => None,
        }
    }
}
