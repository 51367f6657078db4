use serde::{Deserialize, Serialize};

/// A language badge shown on a project card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub name: String,
    pub color_hex: String,
}

/// A code repository shown in the projects carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub url: String,
    pub homepage_url: Option<String>,
    /// Ordered as reported by the source; empty when the source has no breakdown.
    pub languages: Vec<Language>,
    pub star_count: u32,
    pub fork_count: u32,
}
