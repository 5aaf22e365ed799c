//! Test data builders for creating translators

use std::path::Path;
use trader_launcher::i18n::{DirectoryCatalogs, FixedLocale};
use trader_launcher::Translator;

/// Builder for test Translators with deterministic inputs
pub struct TranslatorFixture {
    env_var: String,
    locale: Option<String>,
    settings_dir: Option<std::path::PathBuf>,
    catalog_dir: Option<std::path::PathBuf>,
}

impl TranslatorFixture {
    /// `name` keeps the override variable unique per test
    pub fn new(name: &str) -> Self {
        Self {
            env_var: format!("TRADER_LAUNCHER_IT_LANG_{}", name.to_ascii_uppercase()),
            locale: None,
            settings_dir: None,
            catalog_dir: None,
        }
    }

    pub fn locale(mut self, locale: &str) -> Self {
        self.locale = Some(locale.to_string());
        self
    }

    pub fn settings_dir(mut self, dir: &Path) -> Self {
        self.settings_dir = Some(dir.to_path_buf());
        self
    }

    pub fn catalog_dir(mut self, dir: &Path) -> Self {
        self.catalog_dir = Some(dir.to_path_buf());
        self
    }

    pub fn env_var(&self) -> &str {
        &self.env_var
    }

    pub fn build(self) -> Translator {
        let mut builder = Translator::builder()
            .env_var(self.env_var)
            .locale_probe(FixedLocale(self.locale));
        if let Some(dir) = self.settings_dir {
            builder = builder.settings(super::settings_in(&dir));
        }
        if let Some(dir) = self.catalog_dir {
            builder = builder.catalogs(DirectoryCatalogs::new(dir));
        }
        builder.build()
    }
}
