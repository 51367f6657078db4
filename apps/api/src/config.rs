use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_PRIMARY_API_URL: &str = "https://flask-api-project-ae80711f33c7.herokuapp.com";
const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
const DEFAULT_GITHUB_USER: &str = "luanferreiradev";

/// Application configuration loaded from environment variables.
///
/// Every variable is optional. Missing upstream credentials disable the source
/// that needs them instead of failing startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub primary_api_url: String,
    pub github_api_url: String,
    pub github_user: String,
    pub github_token: Option<String>,
    pub post_store_url: Option<String>,
    pub post_store_key: Option<String>,
    pub articles_throttle: Duration,
    pub fetch_timeout: Duration,
    pub preferences_path: Option<PathBuf>,
    pub prefers_dark: bool,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            primary_api_url: optional_env("PRIMARY_API_URL")
                .unwrap_or_else(|| DEFAULT_PRIMARY_API_URL.to_string()),
            github_api_url: optional_env("GITHUB_API_URL")
                .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string()),
            github_user: optional_env("GITHUB_USER")
                .unwrap_or_else(|| DEFAULT_GITHUB_USER.to_string()),
            github_token: optional_env("GITHUB_TOKEN"),
            post_store_url: optional_env("POST_STORE_URL"),
            post_store_key: optional_env("POST_STORE_KEY"),
            articles_throttle: Duration::from_millis(parse_env("ARTICLES_THROTTLE_MS", 1000)?),
            fetch_timeout: Duration::from_secs(parse_env("FETCH_TIMEOUT_SECS", 10)?),
            preferences_path: optional_env("PREFERENCES_PATH").map(PathBuf::from),
            prefers_dark: parse_env("PREFERS_DARK", false)?,
            port: parse_env("PORT", 8080)?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

/// Reads a variable, treating blank values as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    /// Configuration with every upstream disabled or defaulted, for tests.
    pub fn for_tests() -> Self {
        Config {
            primary_api_url: "http://127.0.0.1:9".to_string(),
            github_api_url: "http://127.0.0.1:9".to_string(),
            github_user: "tester".to_string(),
            github_token: None,
            post_store_url: None,
            post_store_key: None,
            articles_throttle: Duration::from_millis(1000),
            fetch_timeout: Duration::from_secs(1),
            preferences_path: None,
            prefers_dark: false,
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: u64 = parse_env("FOLIO_TEST_SURELY_UNSET_VAR", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("FOLIO_TEST_BAD_PORT", "eighty");
        let result: Result<u16> = parse_env("FOLIO_TEST_BAD_PORT", 8080);
        assert!(result.is_err());
        std::env::remove_var("FOLIO_TEST_BAD_PORT");
    }

    #[test]
    fn test_optional_env_treats_blank_as_unset() {
        std::env::set_var("FOLIO_TEST_BLANK", "   ");
        assert_eq!(optional_env("FOLIO_TEST_BLANK"), None);
        std::env::remove_var("FOLIO_TEST_BLANK");
    }
}
