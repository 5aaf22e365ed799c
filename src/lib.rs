//! # Trader Launcher
//!
//! Assembles the trading platform from optional plugins and decides which
//! language the user interface speaks.
//!
//! ## Architecture
//!
//! - **Config**: Paths under `~/.vntrader/` and the shared `vt_setting.json`
//! - **I18n**: Language resolution, translation catalogs and the [`Translator`]
//! - **Launcher**: Plugin resolution and registration with the trading engine
//!
//! The trading engine and the graphical shell are external; this crate only
//! talks to them through the [`launcher::Engine`] trait.
//!
//! ## Language selection
//!
//! The startup language comes from the first of these that names a
//! supported language: the `VNPY_LANGUAGE` environment variable, the
//! `language` key in `vt_setting.json`, the operating system locale. Chinese
//! is used when none of them applies.
//!
//! ## Example
//!
//! ```ignore
//! use trader_launcher::Translator;
//!
//! let translator = Translator::from_default_location();
//! println!("{}", translator.translate("系统"));
//!
//! if translator.switch("en") {
//!     assert_eq!(translator.translate("系统"), "System");
//! }
//! ```

pub mod config;
pub mod error;
pub mod i18n;
pub mod launcher;

// Re-export commonly used types
pub use config::{SettingsDocument, SettingsStore};
pub use error::{LauncherError, Result};
pub use i18n::{Catalog, Language, Translator};
pub use launcher::{load_plugins, LoadReport, MainEngine, ManifestResolver};
