//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;

use std::path::Path;
use trader_launcher::{SettingsDocument, SettingsStore};

/// Settings filename used inside temporary directories
pub const SETTINGS_FILE: &str = "vt_setting.json";

/// Store rooted in `dir`
pub fn settings_in(dir: &Path) -> SettingsStore {
    SettingsStore::new(dir.join(SETTINGS_FILE))
}

/// Write raw JSON as the settings document
pub fn write_settings(dir: &Path, json: &str) -> SettingsStore {
    let store = settings_in(dir);
    std::fs::write(store.path(), json).expect("write settings fixture");
    store
}

/// Parse the settings file without going through the store
pub fn read_raw(dir: &Path) -> SettingsDocument {
    let content = std::fs::read_to_string(dir.join(SETTINGS_FILE)).expect("read settings");
    serde_json::from_str(&content).expect("settings should be a JSON object")
}
