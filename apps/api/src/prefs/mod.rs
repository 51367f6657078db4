//! Visitor preferences: display locale and colour theme.
//!
//! These are the only process-wide mutable values. `AppContext` reads them once
//! from an injected `PreferenceStore` and writes back on every change
//! (last write wins).

pub mod handlers;
pub mod store;

use std::str::FromStr;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub use store::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};

pub const LANGUAGE_KEY: &str = "language";
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed preference file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid value '{value}' for preference '{key}'")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Pt,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Pt => "pt",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Locale::En => Locale::Pt,
            Locale::Pt => Locale::En,
        }
    }
}

impl FromStr for Locale {
    type Err = PreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "en" => Ok(Locale::En),
            "pt" => Ok(Locale::Pt),
            other => Err(PreferenceError::InvalidValue {
                key: LANGUAGE_KEY,
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl FromStr for Theme {
    type Err = PreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(PreferenceError::InvalidValue {
                key: THEME_KEY,
                value: other.to_string(),
            }),
        }
    }
}

/// Snapshot of both preferences, as returned by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub language: Locale,
    pub theme: Theme,
}

/// Explicit application context holding the current preferences.
pub struct AppContext {
    store: Arc<dyn PreferenceStore>,
    current: RwLock<Preferences>,
}

impl AppContext {
    /// Reads persisted preferences. Missing or malformed values fall back to
    /// English and to light unless `prefers_dark` (the OS hint) is set.
    pub fn load(store: Arc<dyn PreferenceStore>, prefers_dark: bool) -> Self {
        let language = read_or_default(store.as_ref(), LANGUAGE_KEY, Locale::default());
        let default_theme = if prefers_dark { Theme::Dark } else { Theme::Light };
        let theme = read_or_default(store.as_ref(), THEME_KEY, default_theme);

        debug!(language = language.as_str(), theme = theme.as_str(), "Preferences loaded");

        Self {
            store,
            current: RwLock::new(Preferences { language, theme }),
        }
    }

    pub fn preferences(&self) -> Preferences {
        match self.current.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    pub fn locale(&self) -> Locale {
        self.preferences().language
    }

    pub fn theme(&self) -> Theme {
        self.preferences().theme
    }

    pub fn set_locale(&self, locale: Locale) -> Preferences {
        self.apply(|p| {
            p.language = locale;
            (LANGUAGE_KEY, locale.as_str())
        })
    }

    pub fn set_theme(&self, theme: Theme) -> Preferences {
        self.apply(|p| {
            p.theme = theme;
            (THEME_KEY, theme.as_str())
        })
    }

    pub fn toggle_locale(&self) -> Preferences {
        self.apply(|p| {
            p.language = p.language.toggled();
            (LANGUAGE_KEY, p.language.as_str())
        })
    }

    pub fn toggle_theme(&self) -> Preferences {
        self.apply(|p| {
            p.theme = p.theme.toggled();
            (THEME_KEY, p.theme.as_str())
        })
    }

    /// Changes one preference and writes it back under the same write guard,
    /// so the store always ends with the value held in memory.
    fn apply(
        &self,
        change: impl FnOnce(&mut Preferences) -> (&'static str, &'static str),
    ) -> Preferences {
        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let (key, value) = change(&mut guard);
        // Write failures keep the in-memory value and are only logged.
        if let Err(e) = self.store.write(key, value) {
            warn!(key, error = %e, "Failed to persist preference");
        }
        *guard
    }
}

fn read_or_default<T>(store: &dyn PreferenceStore, key: &'static str, default: T) -> T
where
    T: FromStr<Err = PreferenceError>,
{
    match store.read(key) {
        Ok(Some(raw)) => raw.parse().unwrap_or_else(|e| {
            warn!(key, error = %e, "Ignoring malformed stored preference");
            default
        }),
        Ok(None) => default,
        Err(e) => {
            warn!(key, error = %e, "Failed to read stored preference");
            default
        }
    }
}
