use std::sync::Arc;

use crate::errors::CoreError;
use crate::events::{ChangeBus, ChangeEvent};
use crate::models::preferences::{Language, PreferenceKind, Theme};
use crate::storage::backend::KeyValueStore;
use crate::storage::keys::{LANGUAGE_PREFERENCE, THEME_PREFERENCE};

/// Device-wide display preferences (not per account).
pub struct PreferenceService {
    store: Arc<dyn KeyValueStore>,
    bus: ChangeBus,
}

impl PreferenceService {
    pub fn new(store: Arc<dyn KeyValueStore>, bus: ChangeBus) -> Self {
        Self { store, bus }
    }

    /// Current theme; unknown or missing values read as light.
    pub fn theme(&self) -> Result<Theme, CoreError> {
        Ok(self
            .store
            .get(THEME_PREFERENCE)?
            .and_then(|raw| Theme::parse(&raw))
            .unwrap_or_default())
    }

    pub fn set_theme(&self, theme: Theme) -> Result<(), CoreError> {
        self.store.set(THEME_PREFERENCE, theme.as_str())?;
        self.bus
            .publish(ChangeEvent::PreferenceChanged(PreferenceKind::Theme));
        Ok(())
    }

    /// Flip light/dark and return the new theme.
    pub fn toggle_theme(&self) -> Result<Theme, CoreError> {
        let next = self.theme()?.toggled();
        self.set_theme(next)?;
        Ok(next)
    }

    /// Current language; unknown or missing codes read as English.
    pub fn language(&self) -> Result<Language, CoreError> {
        Ok(self
            .store
            .get(LANGUAGE_PREFERENCE)?
            .and_then(|raw| Language::from_code(&raw))
            .unwrap_or_default())
    }

    pub fn set_language(&self, language: Language) -> Result<(), CoreError> {
        self.store.set(LANGUAGE_PREFERENCE, language.code())?;
        self.bus
            .publish(ChangeEvent::PreferenceChanged(PreferenceKind::Language));
        Ok(())
    }
}
