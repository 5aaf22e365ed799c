//! Translation catalogs
//!
//! A catalog maps source text (Simplified Chinese) to translated text. The
//! native language uses the identity catalog. Other languages read a JSON
//! object of `"source": "translation"` pairs from a [`CatalogSource`].
//!
//! Loading never fails outward: a missing or malformed resource degrades to
//! the identity catalog so the UI shows source text instead of crashing.

use rust_embed::RustEmbed;
use std::collections::HashMap;
use std::path::PathBuf;

use super::Language;
use crate::error::{LauncherError, Result};

#[derive(RustEmbed)]
#[folder = "assets/locale/"]
struct LocaleAssets;

/// Source text to translated text lookup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Catalog {
    /// Every lookup returns its input
    #[default]
    Identity,
    /// Loaded translations; misses pass through
    Table(HashMap<String, String>),
}

impl Catalog {
    /// Parse a JSON catalog resource
    ///
    /// Entries with an empty translation are dropped so they pass through
    /// untranslated instead of rendering as blank text.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let entries: HashMap<String, String> = serde_json::from_slice(bytes)
            .map_err(|e| LauncherError::Catalog(format!("Malformed catalog: {}", e)))?;

        Ok(Catalog::Table(
            entries
                .into_iter()
                .filter(|(_, translated)| !translated.is_empty())
                .collect(),
        ))
    }

    /// Translate `text`, returning it unchanged on a miss
    pub fn lookup<'a>(&'a self, text: &'a str) -> &'a str {
        match self {
            Catalog::Identity => text,
            Catalog::Table(entries) => entries.get(text).map(String::as_str).unwrap_or(text),
        }
    }

    /// Whether this is the identity catalog
    pub fn is_identity(&self) -> bool {
        matches!(self, Catalog::Identity)
    }

    /// Number of translated entries
    pub fn len(&self) -> usize {
        match self {
            Catalog::Identity => 0,
            Catalog::Table(entries) => entries.len(),
        }
    }

    /// Whether the catalog holds no translations
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Where catalog resources come from
pub trait CatalogSource: Send + Sync {
    /// Raw bytes of the catalog for `language`
    fn read(&self, language: Language) -> Result<Vec<u8>>;
}

fn resource_name(language: Language) -> String {
    format!("{}.json", language.code())
}

/// Catalogs bundled into the binary from `assets/locale/`
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedCatalogs;

impl CatalogSource for EmbeddedCatalogs {
    fn read(&self, language: Language) -> Result<Vec<u8>> {
        let name = resource_name(language);
        LocaleAssets::get(&name)
            .map(|file| file.data.into_owned())
            .ok_or_else(|| LauncherError::Catalog(format!("No bundled catalog {}", name)))
    }
}

/// Catalogs read from `<dir>/<code>.json` on disk
#[derive(Debug, Clone)]
pub struct DirectoryCatalogs {
    dir: PathBuf,
}

impl DirectoryCatalogs {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl CatalogSource for DirectoryCatalogs {
    fn read(&self, language: Language) -> Result<Vec<u8>> {
        let path = self.dir.join(resource_name(language));
        std::fs::read(&path)
            .map_err(|e| LauncherError::Catalog(format!("Failed to read {:?}: {}", path, e)))
    }
}

/// Turns a language into a catalog, falling back to identity on failure
pub struct CatalogLoader {
    source: Box<dyn CatalogSource>,
}

impl Default for CatalogLoader {
    fn default() -> Self {
        Self::new(EmbeddedCatalogs)
    }
}

impl CatalogLoader {
    pub fn new(source: impl CatalogSource + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    /// Load the catalog for `language`
    pub fn load(&self, language: Language) -> Catalog {
        if language.is_native() {
            return Catalog::Identity;
        }

        match self
            .source
            .read(language)
            .and_then(|bytes| Catalog::from_json(&bytes))
        {
            Ok(catalog) => {
                tracing::debug!("Loaded {} catalog with {} entries", language, catalog.len());
                catalog
            }
            Err(e) => {
                tracing::warn!(
                    "Translation catalog for {} unavailable, showing source text: {}",
                    language,
                    e
                );
                Catalog::Identity
            }
        }
    }
}

impl std::fmt::Debug for CatalogLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogLoader").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_lookup() {
        let catalog = Catalog::Identity;
        assert_eq!(catalog.lookup("系统"), "系统");
        assert!(catalog.is_identity());
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_table_lookup_and_miss() {
        let catalog = Catalog::from_json(r#"{"系统": "System", "帮助": ""}"#.as_bytes()).unwrap();
        assert_eq!(catalog.lookup("系统"), "System");
        assert_eq!(catalog.lookup("帮助"), "帮助");
        assert_eq!(catalog.lookup("未知"), "未知");
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(Catalog::from_json(b"[\"not\", \"a map\"]").is_err());
        assert!(Catalog::from_json(b"{").is_err());
    }

    #[test]
    fn test_native_never_touches_source() {
        struct Unreachable;
        impl CatalogSource for Unreachable {
            fn read(&self, _language: Language) -> Result<Vec<u8>> {
                panic!("native catalog must not be read");
            }
        }

        let loader = CatalogLoader::new(Unreachable);
        assert_eq!(loader.load(Language::SimplifiedChinese), Catalog::Identity);
    }

    #[test]
    fn test_embedded_english_catalog() {
        let catalog = CatalogLoader::default().load(Language::English);
        assert!(!catalog.is_identity());
        assert_eq!(catalog.lookup("系统"), "System");
        assert_eq!(catalog.lookup("退出"), "Exit");
    }

    #[test]
    fn test_missing_directory_resource_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let loader = CatalogLoader::new(DirectoryCatalogs::new(dir.path()));
        assert!(loader.load(Language::English).is_identity());
    }

    #[test]
    fn test_malformed_directory_resource_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("en.json"), "not json").unwrap();
        let loader = CatalogLoader::new(DirectoryCatalogs::new(dir.path()));
        assert!(loader.load(Language::English).is_identity());
    }

    #[test]
    fn test_directory_resource_loads() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("en.json"), r#"{"连接": "Connect"}"#).unwrap();
        let loader = CatalogLoader::new(DirectoryCatalogs::new(dir.path()));
        assert_eq!(loader.load(Language::English).lookup("连接"), "Connect");
    }
}
