//! Configuration module for the launcher
//!
//! This module handles the on-disk layout shared with the rest of the
//! trading platform:
//! - The user-scoped application directory
//! - The shared settings document (see [`SettingsStore`])
//! - Log and plugin directories
//!
//! # App Data Location
//!
//! Everything lives under a dot-directory in the user's home:
//! - **Linux**: `~/.vntrader/`
//! - **macOS**: `~/.vntrader/`
//! - **Windows**: `%USERPROFILE%\.vntrader\`
//!
//! # Files
//!
//! - `vt_setting.json` - Shared key-value settings; this crate owns only `language`
//! - `log/` - Daily rolling launcher logs
//! - `plugins/` - Plugin manifests (`<module>.json`)
//!
//! # Example
//!
//! ```ignore
//! use trader_launcher::config::{settings_path, SettingsStore};
//!
//! let store = SettingsStore::new(settings_path().unwrap());
//! let doc = store.read();
//! store.write(serde_json::json!({ "language": "en" }).as_object().unwrap().clone())?;
//! ```

pub mod settings;

pub use settings::*;

use std::path::{Path, PathBuf};

use crate::error::{LauncherError, Result};

/// Name of the application directory under the user's home
pub const APP_DIR_NAME: &str = ".vntrader";

/// Shared settings filename
pub const SETTING_FILENAME: &str = "vt_setting.json";

/// Settings key owned by the locale subsystem
pub const LANGUAGE_KEY: &str = "language";

/// Environment variable that overrides the persisted language
pub const LANGUAGE_ENV_VAR: &str = "VNPY_LANGUAGE";

/// Log directory name inside the app directory
pub const LOG_DIR_NAME: &str = "log";

/// Plugin manifest directory name inside the app directory
pub const PLUGIN_DIR_NAME: &str = "plugins";

// ==================== App Directory ====================

/// Get the application directory path
pub fn app_dir() -> Option<PathBuf> {
    dirs_next::home_dir().map(|p| p.join(APP_DIR_NAME))
}

/// Get the application directory, creating it if it doesn't exist
pub fn ensure_app_dir() -> Result<PathBuf> {
    let dir = app_dir()
        .ok_or_else(|| LauncherError::Config("Could not determine home directory".into()))?;
    ensure_dir(&dir)?;
    Ok(dir)
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        std::fs::create_dir_all(dir).map_err(|e| {
            LauncherError::Config(format!("Failed to create app directory {:?}: {}", dir, e))
        })?;
    }
    Ok(())
}

/// Get the path to the shared settings file
pub fn settings_path() -> Option<PathBuf> {
    app_dir().map(|p| p.join(SETTING_FILENAME))
}

/// Get the launcher log directory
pub fn log_dir() -> Option<PathBuf> {
    app_dir().map(|p| p.join(LOG_DIR_NAME))
}

/// Get the plugin manifest directory
pub fn plugin_dir() -> Option<PathBuf> {
    app_dir().map(|p| p.join(PLUGIN_DIR_NAME))
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_share_app_dir() {
        let Some(dir) = app_dir() else {
            return;
        };
        assert!(dir.ends_with(APP_DIR_NAME));
        assert_eq!(settings_path(), Some(dir.join(SETTING_FILENAME)));
        assert_eq!(log_dir(), Some(dir.join(LOG_DIR_NAME)));
        assert_eq!(plugin_dir(), Some(dir.join(PLUGIN_DIR_NAME)));
    }

    #[test]
    fn test_ensure_dir_creates_nested_and_is_idempotent() {
        let base = tempfile::tempdir().unwrap();
        let dir = base.path().join("home").join(APP_DIR_NAME);

        ensure_dir(&dir).unwrap();
        assert!(dir.is_dir());
        ensure_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_ensure_dir_fails_when_a_file_is_in_the_way() {
        let base = tempfile::tempdir().unwrap();
        let blocker = base.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();

        let err = ensure_dir(&blocker.join(APP_DIR_NAME)).unwrap_err();
        assert!(err.to_string().contains("Failed to create app directory"));
    }
}
