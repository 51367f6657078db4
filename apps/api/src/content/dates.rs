use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::prefs::Locale;

const MONTHS_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

const MONTHS_PT: [&str; 12] = [
    "janeiro", "fevereiro", "março", "abril", "maio", "junho", "julho", "agosto", "setembro",
    "outubro", "novembro", "dezembro",
];

/// Parses the date formats seen in upstream feeds.
pub fn parse_published_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    DateTime::parse_from_rfc2822(raw)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Long-form date for display, e.g. `October 15, 2023` or `15 de outubro de 2023`.
/// Unparseable input is returned unchanged.
pub fn format_display_date(raw: &str, locale: Locale) -> String {
    let Some(date) = parse_published_date(raw) else {
        return raw.to_string();
    };
    let month = date.month0() as usize;
    match locale {
        Locale::En => format!("{} {}, {}", MONTHS_EN[month], date.day(), date.year()),
        Locale::Pt => format!("{} de {} de {}", date.day(), MONTHS_PT[month], date.year()),
    }
}
