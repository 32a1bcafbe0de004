use std::fmt;

use tracing::warn;

use crate::errors::StorageError;
use crate::storage::KeyValueStore;

/// Display theme. Stored verbatim as `"light"` or `"dark"`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Anything other than `"dark"` is light.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Indicator shown on the toggle: the theme a click switches to.
    pub fn indicator(self) -> ThemeIndicator {
        match self {
            Theme::Light => ThemeIndicator::Moon,
            Theme::Dark => ThemeIndicator::Sun,
        }
    }

    /// Class put on `<body>` while the theme is active.
    pub fn body_class(self) -> Option<&'static str> {
        match self {
            Theme::Light => None,
            Theme::Dark => Some("dark-theme"),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeIndicator {
    Sun,
    Moon,
}

/// Light/dark preference persisted under its own key, apart from notes.
#[derive(Clone, Debug)]
pub struct ThemeController<S: KeyValueStore> {
    backend: S,
    key: String,
    theme: Theme,
}

impl<S: KeyValueStore> ThemeController<S> {
    /// Read the stored preference; unreadable storage means light.
    pub fn load(backend: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let stored = backend.get(&key).unwrap_or_else(|e| {
            warn!(error = %e, "could not read theme preference");
            None
        });
        let theme = Theme::from_stored(stored.as_deref());
        Self {
            backend,
            key,
            theme,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Flip the theme and persist it. The in-memory theme changes even when
    /// the write fails; the error is returned alongside for reporting.
    pub fn toggle(&mut self) -> (Theme, Option<StorageError>) {
        self.theme = self.theme.toggled();
        let failure = self.backend.set(&self.key, self.theme.as_str()).err();
        if let Some(e) = &failure {
            warn!(error = %e, theme = %self.theme, "could not persist theme");
        }
        (self.theme, failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }
    }

    #[test]
    fn test_defaults_to_light() {
        let controller = ThemeController::load(MemoryStore::new(), "theme");
        assert_eq!(controller.theme(), Theme::Light);
        assert_eq!(controller.theme().indicator(), ThemeIndicator::Moon);
    }

    #[test]
    fn test_toggle_persists_and_reloads() {
        let backend = MemoryStore::new();
        let mut controller = ThemeController::load(backend.clone(), "theme");

        assert_eq!(controller.toggle(), (Theme::Dark, None));
        assert_eq!(backend.get("theme").unwrap().as_deref(), Some("dark"));

        let reloaded = ThemeController::load(backend.clone(), "theme");
        assert_eq!(reloaded.theme(), Theme::Dark);
        assert_eq!(reloaded.theme().indicator(), ThemeIndicator::Sun);
        assert_eq!(reloaded.theme().body_class(), Some("dark-theme"));
    }

    #[test]
    fn test_unknown_value_is_light() {
        assert_eq!(Theme::from_stored(Some("sepia")), Theme::Light);
        assert_eq!(Theme::from_stored(None), Theme::Light);
    }

    #[test]
    fn test_broken_storage_still_toggles() {
        let mut controller = ThemeController::load(BrokenStore, "theme");
        assert_eq!(controller.theme(), Theme::Light);

        let (theme, failure) = controller.toggle();

        assert_eq!(theme, Theme::Dark);
        assert_eq!(failure, Some(StorageError::Unavailable));
        assert_eq!(controller.theme(), Theme::Dark);
    }
}
