use std::sync::Arc;

use tracing::warn;

use crate::storage::KeyValueStore;

pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
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

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Anything other than `"dark"` is light.
    pub fn parse_lenient(value: &str) -> Self {
        if value.trim() == "dark" { Theme::Dark } else { Theme::Light }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted display theme.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    store: Arc<dyn KeyValueStore>,
}

impl ThemeStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn load(&self) -> Theme {
        match self.store.get(THEME_KEY) {
            Ok(Some(raw)) => Theme::parse_lenient(&raw),
            Ok(None) => Theme::default(),
            Err(err) => {
                warn!(error = %err, "failed to read theme, using default");
                Theme::default()
            }
        }
    }

    pub fn save(&self, theme: Theme) {
        if let Err(err) = self.store.set(THEME_KEY, theme.as_str()) {
            warn!(error = %err, theme = %theme, "failed to persist theme");
        }
    }

    /// Flips the persisted theme and returns the new one.
    pub fn toggle(&self) -> Theme {
        let theme = self.load().toggled();
        self.save(theme);
        theme
    }
}
