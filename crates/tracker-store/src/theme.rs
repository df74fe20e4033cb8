// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use tracing::debug;

use crate::{Storage, StorageError};

pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

pub struct ThemeStore<S> {
    storage: S,
}

impl<S: Storage> ThemeStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Stored theme; unreadable storage and unknown values mean light.
    pub fn load(&self) -> Theme {
        match self.storage.get_item(THEME_KEY) {
            Ok(Some(raw)) => Theme::parse(&raw).unwrap_or_default(),
            Ok(None) => Theme::default(),
            Err(error) => {
                debug!(%error, "theme preference unavailable");
                Theme::default()
            }
        }
    }

    pub fn save(&mut self, theme: Theme) -> Result<(), StorageError> {
        self.storage.set_item(THEME_KEY, theme.as_str())
    }

    pub fn toggle(&mut self) -> Result<Theme, StorageError> {
        let next = self.load().toggled();
        self.save(next)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::{THEME_KEY, Theme, ThemeStore};
    use crate::{MemoryStorage, Storage};
    use anyhow::Result;

    #[test]
    fn missing_and_unknown_values_mean_light() -> Result<()> {
        let mut storage = MemoryStorage::new();
        assert_eq!(ThemeStore::new(&mut storage).load(), Theme::Light);

        storage.set_item(THEME_KEY, "sepia")?;
        assert_eq!(ThemeStore::new(&mut storage).load(), Theme::Light);
        Ok(())
    }

    #[test]
    fn toggle_persists_choice() -> Result<()> {
        let mut storage = MemoryStorage::new();
        let mut themes = ThemeStore::new(&mut storage);
        assert_eq!(themes.toggle()?, Theme::Dark);
        assert_eq!(themes.toggle()?, Theme::Light);
        assert_eq!(themes.toggle()?, Theme::Dark);
        drop(themes);

        assert_eq!(storage.get_item(THEME_KEY)?.as_deref(), Some("dark"));
        Ok(())
    }

    #[test]
    fn disabled_storage_still_loads_default() {
        let themes = ThemeStore::new(MemoryStorage::disabled());
        assert_eq!(themes.load(), Theme::Light);
    }
}
