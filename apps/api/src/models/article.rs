use serde::{Deserialize, Serialize};

/// A blog post shown on the articles page.
///
/// `body_html` is always sanitized: sources build items through
/// `content::sanitize_html` before the loader hands them out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleItem {
    pub id: String,
    pub title: String,
    pub link: String,
    /// Date string as published by the upstream feed (usually `YYYY-MM-DD[ HH:MM:SS]`).
    pub published_at: String,
    pub body_html: String,
    pub thumbnail_url: Option<String>,
    pub categories: Vec<String>,
}
