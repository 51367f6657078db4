//! HTML sanitization and excerpt extraction for upstream article bodies.
//!
//! Raw upstream HTML never leaves this module: `sanitize_html` is applied when
//! an article is built, and `excerpt` sanitizes again before stripping tags.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use ammonia::{Builder, UrlRelative};
use regex::Regex;

use crate::content::urls::is_valid_url;

/// Default excerpt length in characters.
pub const DEFAULT_EXCERPT_LIMIT: usize = 150;

const ELLIPSIS: &str = "...";

/// Elements removed together with everything inside them.
const DROPPED_ELEMENTS: &[&str] = &[
    "script", "style", "iframe", "object", "embed", "noscript", "template", "svg", "math",
    "textarea", "select", "frameset", "frame", "applet",
];

/// Elements kept (attribute-free, except a validated `href` on `<a>`).
const ALLOWED_TAGS: &[&str] = &[
    "a", "b", "strong", "i", "em", "u", "s", "del", "ins", "mark", "small", "sub", "sup", "code",
    "pre", "kbd", "p", "br", "hr", "blockquote", "ul", "ol", "li", "h1", "h2", "h3", "h4", "h5",
    "h6", "span", "figure", "figcaption",
];

const LINK_REL: &str = "noopener noreferrer";

/// Allow-list cleaner over a parsed DOM. Attribute values are never scanned
/// as text, so quoted `>` cannot split a tag.
static CLEANER: LazyLock<Builder<'static>> = LazyLock::new(|| {
    let mut builder = Builder::empty();
    builder
        .tags(ALLOWED_TAGS.iter().copied().collect())
        .clean_content_tags(DROPPED_ELEMENTS.iter().copied().collect())
        .tag_attributes(HashMap::from([("a", HashSet::from(["href"]))]))
        .url_schemes(HashSet::from(["http", "https"]))
        .url_relative(UrlRelative::Deny)
        .link_rel(Some(LINK_REL))
        .strip_comments(true)
        .attribute_filter(|element, attribute, value| {
            if element == "a" && attribute == "href" && !is_valid_url(value.trim()) {
                return None;
            }
            Some(Cow::Borrowed(value))
        });
    builder
});

/// Matches serialized tags, skipping over double-quoted attribute values.
static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<(?:[^>"]|"[^"]*")*>"#).expect("static tag pattern"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static whitespace pattern"));

/// Removes executable and markup-only content, keeping safe inline/block formatting.
///
/// Script-like elements are dropped with their content, comments are removed,
/// every attribute is removed except a validated http(s) `href` on links
/// (which also get `rel="noopener noreferrer"`), and stray angle brackets in
/// text come back escaped.
pub fn sanitize_html(html: &str) -> String {
    CLEANER.clean(html).to_string()
}

/// Plain text of an HTML fragment: sanitized, tags removed, whitespace collapsed.
pub fn plain_text(html: &str) -> String {
    let cleaned = sanitize_html(html);
    let text = TAG.replace_all(&cleaned, " ");
    let text = decode_entities(&text);
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// Short plain-text preview of an article body.
///
/// Text up to `limit` characters is returned unchanged. Longer text is cut at
/// the last whitespace at or before `limit` and suffixed with `...`; a single
/// word longer than `limit` is cut at `limit`.
pub fn excerpt(html: &str, limit: usize) -> String {
    let text = plain_text(html);
    if text.chars().count() <= limit {
        return text;
    }

    let cut = text
        .char_indices()
        .nth(limit)
        .map(|(byte_idx, _)| byte_idx)
        .unwrap_or(text.len());
    // Whitespace right at the limit counts as a boundary.
    let window = &text[..cut];
    let boundary = if text[cut..].starts_with(char::is_whitespace) {
        Some(cut)
    } else {
        window.rfind(char::is_whitespace)
    };

    let head = match boundary {
        Some(idx) if idx > 0 => &text[..idx],
        _ => window,
    };
    format!("{}{ELLIPSIS}", head.trim_end())
}

/// Decodes the entities that are harmless in plain text. `&lt;` and `&gt;`
/// stay encoded so an excerpt can never reintroduce markup.
fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
