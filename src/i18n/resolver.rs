//! Startup language resolution
//!
//! The active language is decided once, from the first source that yields a
//! supported code:
//!
//! 1. `VNPY_LANGUAGE` environment variable (ephemeral override)
//! 2. `language` key of the shared settings document
//! 3. Host locale: any `zh*` locale maps to Simplified Chinese, anything
//!    else to English
//! 4. Simplified Chinese when the host reports no locale at all
//!
//! A present environment value is authoritative even when it names the
//! native language; only an absent or blank variable falls through.

use super::Language;
use crate::config::{SettingsStore, LANGUAGE_ENV_VAR};

/// Source of the host's default locale
#[cfg_attr(test, mockall::automock)]
pub trait LocaleProbe: Send + Sync {
    /// BCP 47 or POSIX style locale such as `zh-CN` or `en_US`
    fn system_locale(&self) -> Option<String>;
}

/// Reads the locale reported by the operating system
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLocale;

impl LocaleProbe for SystemLocale {
    fn system_locale(&self) -> Option<String> {
        sys_locale::get_locale()
    }
}

/// A locale fixed at construction, for deterministic startup
#[derive(Debug, Clone, Default)]
pub struct FixedLocale(pub Option<String>);

impl LocaleProbe for FixedLocale {
    fn system_locale(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Which input decided the language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedFrom {
    Environment,
    Settings,
    System,
    Default,
}

/// Outcome of a resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub language: Language,
    pub source: ResolvedFrom,
}

/// Walks the priority chain to pick the startup language
pub struct LanguageResolver {
    env_var: String,
    store: Option<SettingsStore>,
    probe: Box<dyn LocaleProbe>,
}

impl LanguageResolver {
    /// Resolver over `store` using the real environment and OS locale
    pub fn new(store: Option<SettingsStore>) -> Self {
        Self {
            env_var: LANGUAGE_ENV_VAR.to_string(),
            store,
            probe: Box::new(SystemLocale),
        }
    }

    /// Read the override from a different environment variable
    pub fn with_env_var(mut self, name: impl Into<String>) -> Self {
        self.env_var = name.into();
        self
    }

    /// Replace the host locale source
    pub fn with_probe(mut self, probe: impl LocaleProbe + 'static) -> Self {
        self.probe = Box::new(probe);
        self
    }

    /// Replace the host locale source with an already boxed probe
    pub fn with_boxed_probe(mut self, probe: Box<dyn LocaleProbe>) -> Self {
        self.probe = probe;
        self
    }

    /// Pick the startup language
    pub fn resolve(&self) -> Language {
        self.resolve_detailed().language
    }

    /// Pick the startup language and report which input decided it
    pub fn resolve_detailed(&self) -> Resolution {
        if let Some(language) = self.from_env() {
            tracing::info!("Using language from environment: {}", language);
            return Resolution {
                language,
                source: ResolvedFrom::Environment,
            };
        }

        if let Some(language) = self.from_settings() {
            tracing::info!("Using language from settings: {}", language);
            return Resolution {
                language,
                source: ResolvedFrom::Settings,
            };
        }

        if let Some(language) = self.from_system() {
            tracing::info!("Using system language: {}", language);
            return Resolution {
                language,
                source: ResolvedFrom::System,
            };
        }

        tracing::info!("Using default language: {}", Language::NATIVE);
        Resolution {
            language: Language::NATIVE,
            source: ResolvedFrom::Default,
        }
    }

    fn from_env(&self) -> Option<Language> {
        let raw = std::env::var(&self.env_var).ok()?;
        let code = raw.trim();
        if code.is_empty() {
            return None;
        }

        let language = Language::from_code(code);
        if language.is_none() {
            tracing::warn!("Ignoring unsupported {}={:?}", self.env_var, code);
        }
        language
    }

    fn from_settings(&self) -> Option<Language> {
        let store = self.store.as_ref()?;
        let code = store.language()?;

        let language = Language::from_code(&code);
        if language.is_none() {
            tracing::warn!("Ignoring unsupported language {:?} in {:?}", code, store.path());
        }
        language
    }

    fn from_system(&self) -> Option<Language> {
        let locale = self.probe.system_locale()?;
        tracing::debug!("System locale: {}", locale);
        Some(language_for_locale(&locale))
    }
}

impl std::fmt::Debug for LanguageResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageResolver")
            .field("env_var", &self.env_var)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

/// Map a host locale onto a supported language
pub fn language_for_locale(locale: &str) -> Language {
    let primary = locale
        .split(['-', '_', '.'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    if primary == "zh" {
        Language::SimplifiedChinese
    } else {
        Language::English
    }
}
