use reqwest::Url;

/// Substitute for article thumbnails that fail validation.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";
/// Substitute for navigable links that fail validation.
pub const NOOP_LINK: &str = "#";

/// True when `raw` parses as an absolute URL with an `http` or `https` scheme.
pub fn is_valid_url(raw: &str) -> bool {
    match Url::parse(raw.trim()) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    }
}

/// Link target safe to render in an anchor.
pub fn safe_link(raw: &str) -> String {
    if is_valid_url(raw) {
        raw.trim().to_string()
    } else {
        NOOP_LINK.to_string()
    }
}

/// Image source safe to render; falls back to the local placeholder.
pub fn safe_image(raw: Option<&str>) -> String {
    match raw {
        Some(url) if is_valid_url(url) => url.trim().to_string(),
        _ => PLACEHOLDER_IMAGE.to_string(),
    }
}

/// Optional homepage link; invalid values are dropped.
pub fn safe_optional_link(raw: Option<&str>) -> Option<String> {
    raw.filter(|url| is_valid_url(url))
        .map(|url| url.trim().to_string())
}
