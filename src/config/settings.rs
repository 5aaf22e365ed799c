//! Shared settings document persistence
//!
//! The settings file is a single JSON object shared by every subsystem of
//! the platform. The launcher only owns the `language` key, so every write
//! is read-merge-write: unrelated keys (and their order) survive untouched.
//!
//! | Operation | Missing file | Malformed file | I/O error |
//! |-----------|--------------|----------------|-----------|
//! | `read`    | empty doc    | empty doc      | empty doc |
//! | `write`   | created      | `Err`, kept    | `Err`     |
//!
//! `write` never replaces a file it cannot parse: the keys in it belong to
//! other subsystems, so the save is refused and the file left as it is.
//!
//! There is no cross-process locking. Two processes writing at the same
//! time can lose an update; the last rename wins.

use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use crate::config::{settings_path, LANGUAGE_KEY};
use crate::error::{LauncherError, Result, ResultExt};

/// The whole settings document: arbitrary keys to JSON values
pub type SettingsDocument = Map<String, Value>;

/// File-backed settings store
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Create a store backed by the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default user-scoped location, if a home directory exists
    pub fn default_location() -> Option<Self> {
        settings_path().map(Self::new)
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document, failing on unreadable or malformed content
    pub fn try_read(&self) -> Result<SettingsDocument> {
        if !self.path.exists() {
            return Ok(SettingsDocument::new());
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings {:?}", self.path))?;

        match serde_json::from_str::<Value>(&content)
            .with_context(|| format!("Failed to parse settings {:?}", self.path))?
        {
            Value::Object(doc) => Ok(doc),
            other => Err(LauncherError::Config(format!(
                "Settings {:?} is not a JSON object (found {})",
                self.path,
                json_kind(&other)
            ))),
        }
    }

    /// Load the document, returning an empty one on any error
    pub fn read(&self) -> SettingsDocument {
        self.try_read().unwrap_or_else(|e| {
            tracing::warn!("Ignoring unusable settings file: {}", e);
            SettingsDocument::new()
        })
    }

    /// Merge `patch` into the stored document and write it back
    ///
    /// A missing file counts as an empty document. An existing file that is
    /// unreadable or not a JSON object is left alone and reported as `Err`.
    pub fn write(&self, patch: SettingsDocument) -> Result<()> {
        let mut doc = self.try_read()?;
        for (key, value) in patch {
            doc.insert(key, value);
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    LauncherError::Config(format!("Failed to create settings directory: {}", e))
                })?;
            }
        }

        let content = to_pretty_json(&doc)?;

        // Write beside the target and rename so readers never see a torn file.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content)
            .with_context(|| format!("Failed to write settings {:?}", tmp))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp);
            LauncherError::from(e).with_context(format!("Failed to replace {:?}", self.path))
        })?;

        tracing::debug!("Saved settings to {:?}", self.path);
        Ok(())
    }

    /// Read a single key
    pub fn get(&self, key: &str) -> Option<Value> {
        self.read().remove(key)
    }

    /// Write a single key, preserving the rest of the document
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) -> Result<()> {
        let mut patch = SettingsDocument::new();
        patch.insert(key.into(), value.into());
        self.write(patch)
    }

    /// The persisted language code, if present and a string
    pub fn language(&self) -> Option<String> {
        match self.get(LANGUAGE_KEY)? {
            Value::String(code) => Some(code),
            other => {
                tracing::warn!(
                    "Settings key '{}' holds a {}, expected a string",
                    LANGUAGE_KEY,
                    json_kind(&other)
                );
                None
            }
        }
    }
}

/// Serialize with four-space indentation; non-ASCII text is kept verbatim
fn to_pretty_json(doc: &SettingsDocument) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    doc.serialize(&mut ser)
        .context("Failed to serialize settings")?;
    Ok(buf)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
