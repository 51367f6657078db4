//! Remote sources for projects and articles.
//!
//! Each source targets one backend and one resource kind, and maps that
//! backend's JSON shape into `RemoteItem`s. Sources report failures as
//! `SourceError`; deciding what to do about them is the loader's job.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::content::sanitize_html;
use crate::fetch::SourceError;
use crate::models::{ArticleItem, Language, ProjectItem, RemoteItem, ResourceKind};

/// A remote backend able to serve one resource kind.
///
/// The loader holds sources as `Arc<dyn RemoteSource>`, so tests and
/// alternative backends plug in without touching the cascade.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    fn kind(&self) -> ResourceKind;

    /// Fetches and maps the full item list. An empty list is a successful answer.
    async fn fetch(&self) -> Result<Vec<RemoteItem>, SourceError>;
}

/// Sends `request` and decodes a 2xx body as `T`.
async fn get_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, SourceError> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), body = %truncate(&body, 200), "Upstream returned error status");
        return Err(SourceError::Status {
            status: status.as_u16(),
        });
    }
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Upstream ids arrive as strings, numbers or not at all.
fn id_string(value: &Option<Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Projects: primary (pinned repositories API)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PinnedRepo {
    #[serde(default)]
    id: Option<Value>,
    name: String,
    #[serde(default)]
    description: Option<String>,
    url: String,
    #[serde(default)]
    homepage_url: Option<String>,
    #[serde(default)]
    languages: Option<LanguageConnection>,
    #[serde(default)]
    stargazer_count: u32,
    #[serde(default)]
    fork_count: u32,
}

#[derive(Debug, Deserialize)]
struct LanguageConnection {
    #[serde(default)]
    nodes: Vec<LanguageNode>,
}

#[derive(Debug, Deserialize)]
struct LanguageNode {
    name: String,
    #[serde(default)]
    color: Option<String>,
}

impl PinnedRepo {
    pub(crate) fn into_item(self) -> ProjectItem {
        ProjectItem {
            id: id_string(&self.id),
            name: self.name,
            description: self.description.unwrap_or_default(),
            url: self.url,
            homepage_url: self.homepage_url.filter(|h| !h.trim().is_empty()),
            languages: self
                .languages
                .map(|l| l.nodes)
                .unwrap_or_default()
                .into_iter()
                .map(|n| Language {
                    name: n.name,
                    color_hex: n.color.unwrap_or_else(|| "#cccccc".to_string()),
                })
                .collect(),
            star_count: self.stargazer_count,
            fork_count: self.fork_count,
        }
    }
}

/// `GET <primary>/api/github/pinned-repos`
pub struct PinnedReposSource {
    client: Client,
    url: String,
}

impl PinnedReposSource {
    pub fn new(client: Client, primary_base: &str) -> Self {
        Self {
            client,
            url: format!("{}/api/github/pinned-repos", primary_base.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl RemoteSource for PinnedReposSource {
    fn name(&self) -> &str {
        "pinned-repos"
    }

    fn kind(&self) -> ResourceKind {
        ResourceKind::Projects
    }

    async fn fetch(&self) -> Result<Vec<RemoteItem>, SourceError> {
        let repos: Vec<PinnedRepo> = get_json(
            self.client
                .get(&self.url)
                .header("Content-Type", "application/json"),
        )
        .await?;
        Ok(repos
            .into_iter()
            .map(|r| RemoteItem::Project(r.into_item()))
            .collect())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Projects: secondary (code host REST API)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct RestRepo {
    #[serde(default)]
    id: Option<Value>,
    name: String,
    #[serde(default)]
    description: Option<String>,
    html_url: String,
    #[serde(default)]
    homepage: Option<String>,
    #[serde(default)]
    stargazers_count: u32,
    #[serde(default)]
    forks_count: u32,
}

impl RestRepo {
    pub(crate) fn into_item(self) -> ProjectItem {
        ProjectItem {
            id: id_string(&self.id),
            name: self.name,
            description: self
                .description
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| "No description provided".to_string()),
            url: self.html_url,
            homepage_url: self.homepage.filter(|h| !h.trim().is_empty()),
            // The REST listing has no language breakdown.
            languages: Vec::new(),
            star_count: self.stargazers_count,
            fork_count: self.forks_count,
        }
    }
}

/// `GET <code-host>/users/<handle>/repos?sort=updated&per_page=6`
pub struct UserReposSource {
    client: Client,
    url: String,
    token: Option<String>,
}

impl UserReposSource {
    pub fn new(client: Client, api_base: &str, user: &str, token: Option<String>) -> Self {
        Self {
            client,
            url: format!(
                "{}/users/{}/repos?sort=updated&per_page=6",
                api_base.trim_end_matches('/'),
                user
            ),
            token,
        }
    }
}

#[async_trait]
impl RemoteSource for UserReposSource {
    fn name(&self) -> &str {
        "user-repos"
    }

    fn kind(&self) -> ResourceKind {
        ResourceKind::Projects
    }

    async fn fetch(&self) -> Result<Vec<RemoteItem>, SourceError> {
        let mut request = self
            .client
            .get(&self.url)
            .header("Accept", "application/vnd.github.v3+json");
        match &self.token {
            Some(token) => request = request.bearer_auth(token),
            None => debug!("No code host token configured, using public access"),
        }

        let repos: Vec<RestRepo> = get_json(request).await?;
        Ok(repos
            .into_iter()
            .map(|r| RemoteItem::Project(r.into_item()))
            .collect())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Articles: shared feed shape (primary API and post store)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FeedPost {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default, alias = "pub_date", alias = "published_at")]
    pub_date: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    thumbnail: Option<String>,
    #[serde(default)]
    categories: Vec<String>,
}

impl FeedPost {
    /// Builds the article, sanitizing the body at the boundary.
    pub(crate) fn into_item(self) -> ArticleItem {
        ArticleItem {
            id: id_string(&self.id),
            title: self.title,
            link: self.link,
            published_at: self.pub_date,
            body_html: sanitize_html(&self.content),
            thumbnail_url: self.thumbnail.filter(|t| !t.trim().is_empty()),
            categories: self.categories,
        }
    }
}

fn posts_to_items(posts: Vec<FeedPost>) -> Vec<RemoteItem> {
    posts
        .into_iter()
        .map(|p| RemoteItem::Article(p.into_item()))
        .collect()
}

/// `GET <primary>/posts`
pub struct FeedPostsSource {
    client: Client,
    url: String,
}

impl FeedPostsSource {
    pub fn new(client: Client, primary_base: &str) -> Self {
        Self {
            client,
            url: format!("{}/posts", primary_base.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl RemoteSource for FeedPostsSource {
    fn name(&self) -> &str {
        "feed-posts"
    }

    fn kind(&self) -> ResourceKind {
        ResourceKind::Articles
    }

    async fn fetch(&self) -> Result<Vec<RemoteItem>, SourceError> {
        let posts: Vec<FeedPost> = get_json(
            self.client
                .get(&self.url)
                .header("Content-Type", "application/json")
                .header("Accept", "application/json"),
        )
        .await?;
        Ok(posts_to_items(posts))
    }
}

/// `GET <store>/rest/v1/medium_posts?select=*` with API key headers.
///
/// Without both a base URL and a key the source fails immediately.
pub struct PostStoreSource {
    client: Client,
    base_url: Option<String>,
    api_key: Option<String>,
}

impl PostStoreSource {
    pub fn new(client: Client, base_url: Option<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url,
            api_key,
        }
    }
}

#[async_trait]
impl RemoteSource for PostStoreSource {
    fn name(&self) -> &str {
        "post-store"
    }

    fn kind(&self) -> ResourceKind {
        ResourceKind::Articles
    }

    async fn fetch(&self) -> Result<Vec<RemoteItem>, SourceError> {
        let (Some(base_url), Some(api_key)) = (&self.base_url, &self.api_key) else {
            return Err(SourceError::NotConfigured("post store URL or API key missing"));
        };

        let url = format!(
            "{}/rest/v1/medium_posts?select=*",
            base_url.trim_end_matches('/')
        );
        let posts: Vec<FeedPost> = get_json(
            self.client
                .get(url)
                .header("Content-Type", "application/json")
                .header("apikey", api_key)
                .bearer_auth(api_key),
        )
        .await?;
        Ok(posts_to_items(posts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    #[test]
    fn test_pinned_repo_maps_languages_in_order() {
        let json = r##"[{
            "id": "R_1", "name": "chess", "description": "Chess with AI",
            "url": "https://github.com/u/chess", "homepageUrl": null,
            "languages": {"nodes": [{"name": "Java", "color": "#b07219"}, {"name": "CSS", "color": "#563d7c"}]},
            "stargazerCount": 7, "forkCount": 3
        }]"##;
        let repos: Vec<PinnedRepo> = serde_json::from_str(json).unwrap();
        let item = repos.into_iter().next().unwrap().into_item();
        assert_eq!(item.id, "R_1");
        assert_eq!(item.homepage_url, None);
        assert_eq!(item.languages.len(), 2);
        assert_eq!(item.languages[0].name, "Java");
        assert_eq!(item.languages[1].color_hex, "#563d7c");
        assert_eq!(item.star_count, 7);
    }

    #[test]
    fn test_rest_repo_maps_snake_case_and_defaults_description() {
        let json = r#"[{
            "id": 12345, "name": "portfolio", "description": null,
            "html_url": "https://github.com/u/portfolio", "homepage": "",
            "stargazers_count": 4, "forks_count": 1
        }]"#;
        let repos: Vec<RestRepo> = serde_json::from_str(json).unwrap();
        let item = repos.into_iter().next().unwrap().into_item();
        assert_eq!(item.id, "12345");
        assert_eq!(item.description, "No description provided");
        assert_eq!(item.url, "https://github.com/u/portfolio");
        assert_eq!(item.homepage_url, None);
        assert!(item.languages.is_empty());
        assert_eq!(item.fork_count, 1);
    }

    #[test]
    fn test_feed_post_sanitizes_body_and_tolerates_missing_id() {
        let json = r#"[{
            "title": "Spring Boot APIs", "link": "https://medium.com/@u/spring",
            "pubDate": "2023-10-15 10:00:00",
            "content": "<p>Intro</p><script>track()</script>",
            "thumbnail": "", "categories": ["Java"]
        }]"#;
        let posts: Vec<FeedPost> = serde_json::from_str(json).unwrap();
        let item = posts.into_iter().next().unwrap().into_item();
        assert_eq!(item.id, "");
        assert_eq!(item.body_html, "<p>Intro</p>");
        assert_eq!(item.thumbnail_url, None);
        assert_eq!(item.published_at, "2023-10-15 10:00:00");
    }

    #[test]
    fn test_non_array_body_is_a_parse_error() {
        let result: Result<Vec<FeedPost>, _> = serde_json::from_str(r#"{"error": "boom"}"#);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_post_store_without_credentials_fails_fast() {
        let source = PostStoreSource::new(Client::new(), None, Some("key".to_string()));
        let result = source.fetch().await;
        assert!(matches!(result, Err(SourceError::NotConfigured(_))));
    }

    #[test]
    fn test_urls_are_built_from_bases() {
        let pinned = PinnedReposSource::new(Client::new(), "https://api.example.com/");
        assert_eq!(pinned.url, "https://api.example.com/api/github/pinned-repos");

        let repos = UserReposSource::new(Client::new(), "https://api.github.com", "octo", None);
        assert_eq!(
            repos.url,
            "https://api.github.com/users/octo/repos?sort=updated&per_page=6"
        );

        let feed = FeedPostsSource::new(Client::new(), "https://api.example.com");
        assert_eq!(feed.url, "https://api.example.com/posts");
    }

    // ── Against a local HTTP server ──

    /// Serves `router` on an ephemeral port and returns its base URL.
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn header<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn test_error_status_is_reported_with_code() {
        let base = serve(Router::new().route(
            "/api/github/pinned-repos",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded") }),
        ))
        .await;

        let result = PinnedReposSource::new(Client::new(), &base).fetch().await;
        assert!(matches!(result, Err(SourceError::Status { status: 500 })));
    }

    #[tokio::test]
    async fn test_success_status_with_object_body_is_a_parse_error() {
        let base = serve(Router::new().route(
            "/posts",
            get(|| async { Json(json!({"error": "x"})) }),
        ))
        .await;

        let result = FeedPostsSource::new(Client::new(), &base).fetch().await;
        assert!(matches!(result, Err(SourceError::Parse(_))));
    }

    #[tokio::test]
    async fn test_success_status_with_empty_array_is_ok_and_empty() {
        let base = serve(Router::new().route(
            "/api/github/pinned-repos",
            get(|| async { Json(json!([])) }),
        ))
        .await;

        let items = PinnedReposSource::new(Client::new(), &base)
            .fetch()
            .await
            .unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_user_repos_sends_bearer_token() {
        let base = serve(Router::new().route(
            "/users/:user/repos",
            get(|headers: HeaderMap| async move {
                if header(&headers, "authorization") != "Bearer secret-token" {
                    return (StatusCode::UNAUTHORIZED, Json(json!({"message": "Bad credentials"})));
                }
                (
                    StatusCode::OK,
                    Json(json!([{
                        "id": 1, "name": "folio", "description": "site",
                        "html_url": "https://github.com/octo/folio", "homepage": null,
                        "stargazers_count": 2, "forks_count": 0
                    }])),
                )
            }),
        ))
        .await;

        let source = UserReposSource::new(
            Client::new(),
            &base,
            "octo",
            Some("secret-token".to_string()),
        );
        let items = source.fetch().await.unwrap();
        assert_eq!(items.len(), 1);

        let anonymous = UserReposSource::new(Client::new(), &base, "octo", None);
        assert!(matches!(
            anonymous.fetch().await,
            Err(SourceError::Status { status: 401 })
        ));
    }

    #[tokio::test]
    async fn test_post_store_sends_api_key_headers() {
        let base = serve(Router::new().route(
            "/rest/v1/medium_posts",
            get(|headers: HeaderMap| async move {
                if header(&headers, "apikey") != "store-key"
                    || header(&headers, "authorization") != "Bearer store-key"
                {
                    return (StatusCode::UNAUTHORIZED, Json(json!({"message": "no key"})));
                }
                (
                    StatusCode::OK,
                    Json(json!([{
                        "id": "p1", "title": "Ownership", "link": "https://medium.com/@u/own",
                        "pubDate": "2024-01-02 08:00:00", "content": "<p>Borrowing</p>",
                        "categories": ["rust"]
                    }])),
                )
            }),
        ))
        .await;

        let source = PostStoreSource::new(
            Client::new(),
            Some(base),
            Some("store-key".to_string()),
        );
        let items = source.fetch().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id(), "p1");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("ação", 2), "aç");
        assert_eq!(truncate("ok", 10), "ok");
    }
}
