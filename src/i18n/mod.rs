//! Internationalization (i18n) support
//!
//! Provides language selection, catalog loading and the [`Translator`]
//! context that the rest of the launcher translates through.
//!
//! Simplified Chinese is the native language: source strings are written in
//! it and its catalog is the identity mapping. Every other language loads a
//! catalog of source text to translated text.

pub mod catalog;
pub mod resolver;
pub mod translator;

pub use catalog::{Catalog, CatalogLoader, CatalogSource, DirectoryCatalogs, EmbeddedCatalogs};
pub use resolver::{
    language_for_locale, FixedLocale, LanguageResolver, LocaleProbe, Resolution, ResolvedFrom,
    SystemLocale,
};
pub use translator::{Translator, TranslatorBuilder};

use crate::error::LauncherError;
use serde::{Deserialize, Serialize};

/// Supported languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "zh_CN")]
    SimplifiedChinese,
    #[serde(rename = "en")]
    English,
}

impl Language {
    /// The language source strings are written in
    pub const NATIVE: Language = Language::SimplifiedChinese;

    /// Get the locale code for this language
    pub fn code(&self) -> &'static str {
        match self {
            Language::SimplifiedChinese => "zh_CN",
            Language::English => "en",
        }
    }

    /// Get the display name for this language
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::SimplifiedChinese => "中文 (简体)",
            Language::English => "English",
        }
    }

    /// Get all available languages
    pub fn all() -> &'static [Language] {
        &[Language::SimplifiedChinese, Language::English]
    }

    /// Parse a language from its locale code
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "zh_CN" => Some(Language::SimplifiedChinese),
            "en" => Some(Language::English),
            _ => None,
        }
    }

    /// Parse an interactive menu answer: a 1-based position in
    /// [`Language::all`] or a locale code
    pub fn from_menu_choice(input: &str) -> Option<Self> {
        let input = input.trim();
        match input.parse::<usize>() {
            Ok(n) => n.checked_sub(1).and_then(|i| Self::all().get(i)).copied(),
            Err(_) => Self::from_code(input),
        }
    }

    /// Whether this is the native language
    pub fn is_native(&self) -> bool {
        *self == Self::NATIVE
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = LauncherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_code(s).ok_or_else(|| LauncherError::UnsupportedLanguage(s.to_string()))
    }
}

/// Supported languages with their display names, in presentation order
pub fn supported_languages() -> Vec<(Language, &'static str)> {
    Language::all()
        .iter()
        .map(|lang| (*lang, lang.display_name()))
        .collect()
}
