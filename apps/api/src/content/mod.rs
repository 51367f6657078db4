//! Safety boundary for upstream content: HTML sanitization, excerpts,
//! URL validation and display dates.

pub mod dates;
pub mod sanitize;
pub mod urls;

pub use dates::format_display_date;
pub use sanitize::{excerpt, sanitize_html, DEFAULT_EXCERPT_LIMIT};
pub use urls::{safe_image, safe_link, safe_optional_link};
