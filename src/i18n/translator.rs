//! The translation context shared across the launcher
//!
//! A [`Translator`] is built once by the composition root and handed to
//! whatever needs translated text (usually behind an `Arc`). It resolves the
//! startup language lazily on first use and caches the resulting catalog.
//!
//! # State machine
//!
//! ```text
//! Uninitialized --ensure_ready()--> Initialized(lang, catalog)
//! Initialized   --switch(lang')--> Initialized(lang', catalog')
//! ```
//!
//! Initialization runs under the write lock with a re-check, so concurrent
//! first use resolves exactly once. `switch` keeps the write lock across
//! load, replace and persist. Callers that must know whether the choice
//! reached the settings file use [`Translator::switch_and_save`].

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::catalog::{Catalog, CatalogLoader, CatalogSource};
use super::resolver::{LanguageResolver, LocaleProbe};
use super::Language;
use crate::config::{SettingsStore, LANGUAGE_KEY};
use crate::error::{LauncherError, Result};

#[derive(Debug)]
struct ActiveLocale {
    language: Language,
    catalog: Catalog,
}

/// Language state plus the collaborators needed to change it
pub struct Translator {
    resolver: LanguageResolver,
    loader: CatalogLoader,
    store: Option<SettingsStore>,
    state: RwLock<Option<ActiveLocale>>,
}

impl Translator {
    /// Translator over `store` with bundled catalogs and the real environment
    pub fn new(store: Option<SettingsStore>) -> Self {
        Self::with_parts(
            LanguageResolver::new(store.clone()),
            CatalogLoader::default(),
            store,
        )
    }

    /// Translator over the settings file in the user's home directory
    pub fn from_default_location() -> Self {
        let store = SettingsStore::default_location();
        if store.is_none() {
            tracing::warn!("No home directory; language changes will not be saved");
        }
        Self::new(store)
    }

    /// Assemble from explicit collaborators
    pub fn with_parts(
        resolver: LanguageResolver,
        loader: CatalogLoader,
        store: Option<SettingsStore>,
    ) -> Self {
        Self {
            resolver,
            loader,
            store,
            state: RwLock::new(None),
        }
    }

    /// Start from a builder, mostly useful for tests and tooling
    pub fn builder() -> TranslatorBuilder {
        TranslatorBuilder::default()
    }

    fn read_state(&self) -> RwLockReadGuard<'_, Option<ActiveLocale>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, Option<ActiveLocale>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Resolve and load the startup language if that has not happened yet
    pub fn ensure_ready(&self) {
        if self.read_state().is_some() {
            return;
        }

        let mut state = self.write_state();
        if state.is_some() {
            return;
        }

        let language = self.resolver.resolve();
        let catalog = self.loader.load(language);
        *state = Some(ActiveLocale { language, catalog });

        tracing::info!(
            "Language initialized: {} ({})",
            language,
            language.display_name()
        );
    }

    /// Whether the startup language has been resolved
    pub fn is_initialized(&self) -> bool {
        self.read_state().is_some()
    }

    /// The active language
    pub fn current_language(&self) -> Language {
        self.ensure_ready();
        self.read_state()
            .as_ref()
            .map(|active| active.language)
            .unwrap_or(Language::NATIVE)
    }

    /// Supported languages with their display names
    pub fn supported_languages(&self) -> Vec<(Language, &'static str)> {
        super::supported_languages()
    }

    /// Translate `text` through the active catalog
    pub fn translate(&self, text: &str) -> String {
        self.ensure_ready();
        match self.read_state().as_ref() {
            Some(active) => active.catalog.lookup(text).to_string(),
            None => text.to_string(),
        }
    }

    /// Switch to `code` and persist the choice
    ///
    /// Returns `false` only for unsupported codes. A failed save is logged
    /// and the in-memory switch still stands.
    pub fn switch(&self, code: &str) -> bool {
        match self.switch_and_save(code) {
            Ok(switched) => switched,
            Err(e) => {
                tracing::error!("Failed to save language setting: {}", e);
                true
            }
        }
    }

    /// Switch to `code` and persist the choice, reporting save failures
    ///
    /// `Ok(false)` means the code is unsupported and nothing changed.
    /// `Ok(true)` means the language is active and saved, or was already
    /// active so there was nothing to write. On `Err` the in-memory switch
    /// has happened but the settings file does not record it.
    pub fn switch_and_save(&self, code: &str) -> Result<bool> {
        let Some(language) = Language::from_code(code) else {
            tracing::warn!("Unsupported language: {}", code);
            return Ok(false);
        };

        // Held until the save finishes so concurrent switches persist in order
        let mut state = self.write_locked();
        if !Self::replace(&mut state, language, &self.loader) {
            return Ok(true);
        }

        let store = self.store.as_ref().ok_or_else(|| {
            LauncherError::Config(format!(
                "Language switched to {} but there is no settings file",
                language
            ))
        })?;
        store.set(LANGUAGE_KEY, language.code())?;
        tracing::info!(
            "Language switched to {} and saved to {:?}",
            language,
            store.path()
        );
        Ok(true)
    }

    /// Switch to `code` for this process only
    pub fn switch_for_session(&self, code: &str) -> bool {
        let Some(language) = Language::from_code(code) else {
            tracing::warn!("Unsupported language: {}", code);
            return false;
        };

        let mut state = self.write_locked();
        if Self::replace(&mut state, language, &self.loader) {
            tracing::info!("Language switched to {} for this session", language);
        }
        true
    }

    /// Initialized state under the write lock
    fn write_locked(&self) -> RwLockWriteGuard<'_, Option<ActiveLocale>> {
        self.ensure_ready();
        self.write_state()
    }

    /// Install `language`; false when it was already active
    fn replace(
        state: &mut Option<ActiveLocale>,
        language: Language,
        loader: &CatalogLoader,
    ) -> bool {
        if state.as_ref().map(|active| active.language) == Some(language) {
            tracing::info!("Language is already set to {}", language);
            return false;
        }

        let catalog = loader.load(language);
        *state = Some(ActiveLocale { language, catalog });
        true
    }

    /// The settings store this translator writes to
    pub fn settings(&self) -> Option<&SettingsStore> {
        self.store.as_ref()
    }
}

impl std::fmt::Debug for Translator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator")
            .field("store", &self.store)
            .field("state", &*self.read_state())
            .finish_non_exhaustive()
    }
}

/// Builder for [`Translator`]
#[derive(Default)]
pub struct TranslatorBuilder {
    store: Option<SettingsStore>,
    env_var: Option<String>,
    probe: Option<Box<dyn LocaleProbe>>,
    loader: Option<CatalogLoader>,
}

impl TranslatorBuilder {
    /// Settings document to resolve from and persist into
    pub fn settings(mut self, store: SettingsStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Environment variable holding the override
    pub fn env_var(mut self, name: impl Into<String>) -> Self {
        self.env_var = Some(name.into());
        self
    }

    /// Host locale source
    pub fn locale_probe(mut self, probe: impl LocaleProbe + 'static) -> Self {
        self.probe = Some(Box::new(probe));
        self
    }

    /// Catalog resources for non-native languages
    pub fn catalogs(mut self, source: impl CatalogSource + 'static) -> Self {
        self.loader = Some(CatalogLoader::new(source));
        self
    }

    pub fn build(self) -> Translator {
        let mut resolver = LanguageResolver::new(self.store.clone());
        if let Some(name) = self.env_var {
            resolver = resolver.with_env_var(name);
        }
        if let Some(probe) = self.probe {
            resolver = resolver.with_boxed_probe(probe);
        }

        Translator::with_parts(resolver, self.loader.unwrap_or_default(), self.store)
    }
}
