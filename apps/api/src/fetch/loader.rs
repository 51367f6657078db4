//! Resource loader: primary → secondary → fallback cascade.
//!
//! # Policy
//! - Attempts run strictly in sequence, so provenance is unambiguous.
//! - A source that answers with zero items "could not serve": the cascade moves on.
//! - The fallback dataset is used unconditionally when both live sources fail
//!   or are empty, and a warning is attached.
//! - Articles calls pass through a `Throttle` before the first attempt.
//!
//! The loader writes no shared state besides the throttle timestamp, so a
//! dropped `load` future leaves nothing half-applied.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::fetch::fallback::{self, FALLBACK_ID_PREFIX};
use crate::fetch::sources::{
    FeedPostsSource, PinnedReposSource, PostStoreSource, RemoteSource, UserReposSource,
};
use crate::fetch::{FetchResult, FetchWarning, LoadOptions, Provenance, Throttle};
use crate::models::{RemoteItem, ResourceKind};

/// The two live sources for one resource kind, plus an optional throttle.
pub struct Cascade {
    primary: Arc<dyn RemoteSource>,
    secondary: Arc<dyn RemoteSource>,
    throttle: Option<Throttle>,
}

impl Cascade {
    pub fn new(primary: Arc<dyn RemoteSource>, secondary: Arc<dyn RemoteSource>) -> Self {
        Self {
            primary,
            secondary,
            throttle: None,
        }
    }

    pub fn with_throttle(mut self, interval: Duration) -> Self {
        self.throttle = Some(Throttle::new(interval));
        self
    }
}

/// Result of a single source attempt.
enum Attempt {
    Served(Vec<RemoteItem>),
    Empty,
    Failed,
}

pub struct ResourceLoader {
    projects: Cascade,
    articles: Cascade,
}

impl ResourceLoader {
    pub fn new(projects: Cascade, articles: Cascade) -> Self {
        Self { projects, articles }
    }

    /// Wires the HTTP sources described by `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.fetch_timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        if config.post_store_url.is_none() || config.post_store_key.is_none() {
            warn!("Post store credentials not set; secondary articles source will be skipped");
        }

        let projects = Cascade::new(
            Arc::new(PinnedReposSource::new(client.clone(), &config.primary_api_url)),
            Arc::new(UserReposSource::new(
                client.clone(),
                &config.github_api_url,
                &config.github_user,
                config.github_token.clone(),
            )),
        );
        let articles = Cascade::new(
            Arc::new(FeedPostsSource::new(client.clone(), &config.primary_api_url)),
            Arc::new(PostStoreSource::new(
                client,
                config.post_store_url.clone(),
                config.post_store_key.clone(),
            )),
        )
        .with_throttle(config.articles_throttle);

        Ok(Self::new(projects, articles))
    }

    fn cascade(&self, kind: ResourceKind) -> &Cascade {
        match kind {
            ResourceKind::Projects => &self.projects,
            ResourceKind::Articles => &self.articles,
        }
    }

    /// Produces a non-empty `FetchResult` for `kind`. Never fails.
    pub async fn load(&self, kind: ResourceKind, options: LoadOptions) -> FetchResult {
        if options.force_fallback {
            info!(%kind, "Fallback requested by caller");
            return fallback_result(kind, None);
        }

        let cascade = self.cascade(kind);
        if let Some(throttle) = &cascade.throttle {
            throttle.acquire().await;
        }

        let mut any_failed = false;
        for (provenance, source) in [
            (Provenance::Primary, &cascade.primary),
            (Provenance::Secondary, &cascade.secondary),
        ] {
            match attempt(kind, source.as_ref()).await {
                Attempt::Served(items) => {
                    info!(%kind, source = source.name(), count = items.len(), ?provenance, "Fetch served");
                    return FetchResult {
                        kind,
                        items: assign_ids(items, kind.id_prefix()),
                        provenance,
                        warning: None,
                    };
                }
                Attempt::Empty => {
                    debug!(%kind, source = source.name(), "Source returned no items");
                }
                Attempt::Failed => any_failed = true,
            }
        }

        let warning = if any_failed {
            FetchWarning::UpstreamUnavailable
        } else {
            FetchWarning::UpstreamEmpty
        };
        warn!(%kind, warning = warning.code(), "All live sources exhausted, serving fallback data");
        fallback_result(kind, Some(warning))
    }
}

async fn attempt(kind: ResourceKind, source: &dyn RemoteSource) -> Attempt {
    debug!(%kind, source = source.name(), serves = %source.kind(), "Attempting source");
    match source.fetch().await {
        Ok(items) => {
            let total = items.len();
            let items: Vec<RemoteItem> = items.into_iter().filter(|i| i.kind() == kind).collect();
            if items.len() != total {
                warn!(
                    %kind,
                    source = source.name(),
                    dropped = total - items.len(),
                    "Discarding items of the wrong kind"
                );
            }
            if items.is_empty() {
                Attempt::Empty
            } else {
                Attempt::Served(items)
            }
        }
        Err(e) => {
            warn!(%kind, source = source.name(), error = %e, "Source attempt failed");
            Attempt::Failed
        }
    }
}

fn fallback_result(kind: ResourceKind, warning: Option<FetchWarning>) -> FetchResult {
    FetchResult {
        kind,
        items: assign_ids(fallback::dataset(kind), FALLBACK_ID_PREFIX),
        provenance: Provenance::Fallback,
        warning,
    }
}

/// Gives every item a unique id. Missing or repeated ids become `<prefix>-<index>`,
/// where `index` is the item's position in the batch.
pub(crate) fn assign_ids(mut items: Vec<RemoteItem>, prefix: &str) -> Vec<RemoteItem> {
    let mut seen: HashSet<String> = HashSet::with_capacity(items.len());
    for (index, item) in items.iter_mut().enumerate() {
        if !item.id().is_empty() && seen.insert(item.id().to_string()) {
            continue;
        }
        let mut candidate = format!("{prefix}-{index}");
        let mut bump = 1;
        while seen.contains(&candidate) {
            candidate = format!("{prefix}-{index}-{bump}");
            bump += 1;
        }
        seen.insert(candidate.clone());
        item.set_id(candidate);
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::SourceError;
    use crate::models::{ArticleItem, ProjectItem};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tokio::time::Instant;

    #[derive(Debug, Clone, Copy)]
    enum Outcome {
        Items(usize),
        Empty,
        Status(u16),
        Malformed,
        Transport,
        NotConfigured,
        WrongKind,
    }

    const ALL_OUTCOMES: [Outcome; 7] = [
        Outcome::Items(2),
        Outcome::Empty,
        Outcome::Status(500),
        Outcome::Malformed,
        Outcome::Transport,
        Outcome::NotConfigured,
        Outcome::WrongKind,
    ];

    struct ScriptedSource {
        kind: ResourceKind,
        outcome: Outcome,
        calls: AtomicUsize,
        started_at: Mutex<Vec<Instant>>,
    }

    impl ScriptedSource {
        fn new(kind: ResourceKind, outcome: Outcome) -> Arc<Self> {
            Arc::new(Self {
                kind,
                outcome,
                calls: AtomicUsize::new(0),
                started_at: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    fn item(kind: ResourceKind, id: &str) -> RemoteItem {
        match kind {
            ResourceKind::Projects => RemoteItem::Project(ProjectItem {
                id: id.to_string(),
                name: format!("repo {id}"),
                description: String::new(),
                url: "https://github.com/u/repo".to_string(),
                homepage_url: None,
                languages: vec![],
                star_count: 0,
                fork_count: 0,
            }),
            ResourceKind::Articles => RemoteItem::Article(ArticleItem {
                id: id.to_string(),
                title: format!("post {id}"),
                link: "https://medium.com/@u/post".to_string(),
                published_at: "2024-01-01".to_string(),
                body_html: "<p>body</p>".to_string(),
                thumbnail_url: None,
                categories: vec![],
            }),
        }
    }

    fn other(kind: ResourceKind) -> ResourceKind {
        match kind {
            ResourceKind::Projects => ResourceKind::Articles,
            ResourceKind::Articles => ResourceKind::Projects,
        }
    }

    #[async_trait]
    impl RemoteSource for ScriptedSource {
        fn name(&self) -> &str {
            "scripted"
        }

        fn kind(&self) -> ResourceKind {
            self.kind
        }

        async fn fetch(&self) -> Result<Vec<RemoteItem>, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.started_at.lock().unwrap().push(Instant::now());
            match self.outcome {
                Outcome::Items(n) => Ok((0..n).map(|i| item(self.kind, &format!("live-{i}"))).collect()),
                Outcome::Empty => Ok(vec![]),
                Outcome::Status(status) => Err(SourceError::Status { status }),
                Outcome::Malformed => Err(SourceError::Parse(
                    serde_json::from_str::<Vec<serde_json::Value>>("{\"not\": \"an array\"}")
                        .unwrap_err(),
                )),
                Outcome::Transport => Err(SourceError::Http(
                    Client::new().get("not a url").build().unwrap_err(),
                )),
                Outcome::NotConfigured => Err(SourceError::NotConfigured("test")),
                Outcome::WrongKind => Ok(vec![item(other(self.kind), "stray")]),
            }
        }
    }

    fn loader_with(
        kind: ResourceKind,
        primary: Outcome,
        secondary: Outcome,
    ) -> (ResourceLoader, Arc<ScriptedSource>, Arc<ScriptedSource>) {
        let p = ScriptedSource::new(kind, primary);
        let s = ScriptedSource::new(kind, secondary);
        let live = Cascade::new(p.clone(), s.clone());
        let idle = Cascade::new(
            ScriptedSource::new(other(kind), Outcome::Empty),
            ScriptedSource::new(other(kind), Outcome::Empty),
        );
        let loader = match kind {
            ResourceKind::Projects => ResourceLoader::new(live, idle),
            ResourceKind::Articles => ResourceLoader::new(idle, live),
        };
        (loader, p, s)
    }

    #[tokio::test]
    async fn test_primary_success_short_circuits() {
        let (loader, p, s) = loader_with(ResourceKind::Projects, Outcome::Items(3), Outcome::Items(1));
        let result = loader.load(ResourceKind::Projects, LoadOptions::default()).await;
        assert_eq!(result.provenance, Provenance::Primary);
        assert_eq!(result.items.len(), 3);
        assert!(result.warning.is_none());
        assert_eq!(p.calls(), 1);
        assert_eq!(s.calls(), 0);
    }

    #[tokio::test]
    async fn test_primary_failure_then_secondary_success() {
        for failure in [Outcome::Status(503), Outcome::Transport, Outcome::Malformed] {
            let (loader, _, s) = loader_with(ResourceKind::Projects, failure, Outcome::Items(1));
            let result = loader.load(ResourceKind::Projects, LoadOptions::default()).await;
            assert_eq!(result.provenance, Provenance::Secondary, "after {failure:?}");
            assert!(result.warning.is_none());
            assert_eq!(s.calls(), 1);
        }
    }

    #[tokio::test]
    async fn test_primary_empty_falls_through_to_secondary() {
        let (loader, _, s) = loader_with(ResourceKind::Projects, Outcome::Empty, Outcome::Items(2));
        let result = loader.load(ResourceKind::Projects, LoadOptions::default()).await;
        assert_eq!(result.provenance, Provenance::Secondary);
        assert_eq!(s.calls(), 1);
    }

    #[tokio::test]
    async fn test_both_empty_serves_fallback_with_empty_warning() {
        let (loader, _, _) = loader_with(ResourceKind::Projects, Outcome::Empty, Outcome::Empty);
        let result = loader.load(ResourceKind::Projects, LoadOptions::default()).await;
        assert_eq!(result.provenance, Provenance::Fallback);
        assert!(!result.items.is_empty());
        assert_eq!(result.warning, Some(FetchWarning::UpstreamEmpty));
    }

    #[tokio::test]
    async fn test_any_failure_reports_unavailable() {
        let (loader, _, _) = loader_with(ResourceKind::Articles, Outcome::Empty, Outcome::NotConfigured);
        let result = loader.load(ResourceKind::Articles, LoadOptions::default()).await;
        assert_eq!(result.provenance, Provenance::Fallback);
        assert_eq!(result.warning, Some(FetchWarning::UpstreamUnavailable));
    }

    #[tokio::test]
    async fn test_forced_fallback_has_no_warning_and_skips_sources() {
        let (loader, p, s) = loader_with(ResourceKind::Articles, Outcome::Items(2), Outcome::Items(2));
        let result = loader
            .load(ResourceKind::Articles, LoadOptions { force_fallback: true })
            .await;
        assert_eq!(result.provenance, Provenance::Fallback);
        assert!(result.warning.is_none());
        assert_eq!(p.calls() + s.calls(), 0);
    }

    #[tokio::test]
    async fn test_items_of_wrong_kind_count_as_empty() {
        let (loader, _, _) = loader_with(ResourceKind::Projects, Outcome::WrongKind, Outcome::Items(1));
        let result = loader.load(ResourceKind::Projects, LoadOptions::default()).await;
        assert_eq!(result.provenance, Provenance::Secondary);
        assert!(result.items.iter().all(|i| i.kind() == ResourceKind::Projects));
    }

    #[tokio::test(start_paused = true)]
    async fn test_every_outcome_combination_yields_usable_result() {
        for kind in [ResourceKind::Projects, ResourceKind::Articles] {
            for primary in ALL_OUTCOMES {
                for secondary in ALL_OUTCOMES {
                    let (loader, _, _) = loader_with(kind, primary, secondary);
                    let result = loader.load(kind, LoadOptions::default()).await;
                    assert!(!result.items.is_empty(), "{kind} {primary:?}/{secondary:?}");
                    assert!(result.items.iter().all(|i| i.kind() == kind));
                    assert_eq!(
                        result.warning.is_some(),
                        result.provenance == Provenance::Fallback,
                        "{kind} {primary:?}/{secondary:?}"
                    );
                }
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_articles_loads_are_spaced_by_throttle_interval() {
        let interval = Duration::from_millis(1000);
        let primary = ScriptedSource::new(ResourceKind::Articles, Outcome::Items(1));
        let articles = Cascade::new(
            primary.clone(),
            ScriptedSource::new(ResourceKind::Articles, Outcome::Empty),
        )
        .with_throttle(interval);
        let projects = Cascade::new(
            ScriptedSource::new(ResourceKind::Projects, Outcome::Items(1)),
            ScriptedSource::new(ResourceKind::Projects, Outcome::Empty),
        );
        let loader = ResourceLoader::new(projects, articles);

        loader.load(ResourceKind::Articles, LoadOptions::default()).await;
        loader.load(ResourceKind::Articles, LoadOptions::default()).await;

        let started = primary.started_at.lock().unwrap().clone();
        assert_eq!(started.len(), 2);
        assert!(started[1] - started[0] >= interval);
    }

    #[tokio::test(start_paused = true)]
    async fn test_projects_are_not_throttled() {
        let primary = ScriptedSource::new(ResourceKind::Projects, Outcome::Items(1));
        let projects = Cascade::new(
            primary.clone(),
            ScriptedSource::new(ResourceKind::Projects, Outcome::Empty),
        );
        let articles = Cascade::new(
            ScriptedSource::new(ResourceKind::Articles, Outcome::Items(1)),
            ScriptedSource::new(ResourceKind::Articles, Outcome::Empty),
        )
        .with_throttle(Duration::from_millis(1000));
        let loader = ResourceLoader::new(projects, articles);

        let start = Instant::now();
        loader.load(ResourceKind::Projects, LoadOptions::default()).await;
        loader.load(ResourceKind::Projects, LoadOptions::default()).await;
        assert!(start.elapsed() < Duration::from_millis(1000));
    }

    #[test]
    fn test_assign_ids_fills_missing_and_duplicate_ids() {
        let items = vec![
            item(ResourceKind::Articles, ""),
            item(ResourceKind::Articles, "a"),
            item(ResourceKind::Articles, "a"),
            item(ResourceKind::Articles, "post-3"),
        ];
        let ids: Vec<String> = assign_ids(items, "post")
            .iter()
            .map(|i| i.id().to_string())
            .collect();
        assert_eq!(ids, vec!["post-0", "a", "post-2", "post-3"]);
    }

    #[test]
    fn test_assign_ids_is_stable_for_same_order() {
        let make = || vec![item(ResourceKind::Articles, ""), item(ResourceKind::Articles, "")];
        let first: Vec<String> = assign_ids(make(), "post").iter().map(|i| i.id().to_string()).collect();
        let second: Vec<String> = assign_ids(make(), "post").iter().map(|i| i.id().to_string()).collect();
        assert_eq!(first, second);
        assert_eq!(first, vec!["post-0", "post-1"]);
    }

    #[test]
    fn test_assign_ids_avoids_collision_with_real_ids() {
        let items = vec![item(ResourceKind::Projects, "project-1"), item(ResourceKind::Projects, "")];
        let ids: Vec<String> = assign_ids(items, "project")
            .iter()
            .map(|i| i.id().to_string())
            .collect();
        assert_eq!(ids, vec!["project-1", "project-1-1"]);
    }
}
