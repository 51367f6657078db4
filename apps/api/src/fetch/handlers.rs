use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::content::{
    excerpt, format_display_date, safe_image, safe_link, safe_optional_link, sanitize_html,
    DEFAULT_EXCERPT_LIMIT,
};
use crate::fetch::{FetchResult, LoadOptions, Provenance};
use crate::models::{ArticleItem, ProjectItem, RemoteItem, ResourceKind};
use crate::prefs::Locale;
use crate::state::AppState;

const DEFAULT_ARTICLE_EXCERPT: &str = "Read this article on Medium...";
const MAX_CARD_CATEGORIES: usize = 3;
const MAX_ALT_TEXT_CHARS: usize = 100;

#[derive(Debug, Default, Deserialize)]
pub struct FetchQuery {
    #[serde(default)]
    pub fallback: bool,
}

/// Warning block rendered next to a retry affordance.
#[derive(Debug, Serialize)]
pub struct WarningView {
    pub code: &'static str,
    pub message: String,
    pub retry: bool,
}

#[derive(Debug, Serialize)]
pub struct ProjectsResponse {
    pub items: Vec<ProjectItem>,
    pub provenance: Provenance,
    pub warning: Option<WarningView>,
}

/// Display-ready article. Every URL and every piece of markup here has
/// already been through the content boundary.
#[derive(Debug, Serialize)]
pub struct ArticleCard {
    pub id: String,
    pub title: String,
    pub link: String,
    pub thumbnail_url: String,
    pub thumbnail_alt: String,
    pub body_html: String,
    pub excerpt: String,
    pub published_at: String,
    pub display_date: String,
    pub categories: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ArticlesResponse {
    pub items: Vec<ArticleCard>,
    pub provenance: Provenance,
    pub warning: Option<WarningView>,
}

fn warning_view(result: &FetchResult) -> Option<WarningView> {
    result.warning.map(|w| WarningView {
        code: w.code(),
        message: w.message(result.kind),
        retry: true,
    })
}

fn project_view(mut project: ProjectItem) -> ProjectItem {
    project.homepage_url = safe_optional_link(project.homepage_url.as_deref());
    project.url = safe_link(&project.url);
    project
}

pub(crate) fn article_card(article: &ArticleItem, locale: Locale) -> ArticleCard {
    let body_html = sanitize_html(&article.body_html);
    let summary = excerpt(&body_html, DEFAULT_EXCERPT_LIMIT);

    ArticleCard {
        id: article.id.clone(),
        title: article.title.clone(),
        link: safe_link(&article.link),
        thumbnail_url: safe_image(article.thumbnail_url.as_deref()),
        thumbnail_alt: article.title.chars().take(MAX_ALT_TEXT_CHARS).collect(),
        excerpt: if summary.is_empty() {
            DEFAULT_ARTICLE_EXCERPT.to_string()
        } else {
            summary
        },
        body_html,
        published_at: article.published_at.clone(),
        display_date: format_display_date(&article.published_at, locale),
        categories: article
            .categories
            .iter()
            .take(MAX_CARD_CATEGORIES)
            .cloned()
            .collect(),
    }
}

/// GET /api/v1/projects
pub async fn handle_get_projects(
    State(state): State<AppState>,
    Query(query): Query<FetchQuery>,
) -> Json<ProjectsResponse> {
    let options = LoadOptions {
        force_fallback: query.fallback,
    };
    let result = state.loader.load(ResourceKind::Projects, options).await;
    let warning = warning_view(&result);

    Json(ProjectsResponse {
        items: result
            .items
            .into_iter()
            .filter_map(|item| match item {
                RemoteItem::Project(p) => Some(project_view(p)),
                RemoteItem::Article(_) => None,
            })
            .collect(),
        provenance: result.provenance,
        warning,
    })
}

/// GET /api/v1/articles
pub async fn handle_get_articles(
    State(state): State<AppState>,
    Query(query): Query<FetchQuery>,
) -> Json<ArticlesResponse> {
    let options = LoadOptions {
        force_fallback: query.fallback,
    };
    let result = state.loader.load(ResourceKind::Articles, options).await;
    let locale = state.preferences.locale();

    Json(ArticlesResponse {
        items: result
            .items
            .iter()
            .filter_map(RemoteItem::as_article)
            .map(|a| article_card(a, locale))
            .collect(),
        provenance: result.provenance,
        warning: warning_view(&result),
    })
}
