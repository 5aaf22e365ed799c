//! Error handling for the launcher
//!
//! This module defines custom error types and a Result alias for use
//! throughout the application. Most failures in the locale subsystem are
//! absorbed into fallbacks, so these errors surface mainly from the
//! settings writer, catalog parsing, and plugin loading.

use thiserror::Error;

/// Main error type for launcher operations
#[derive(Error, Debug)]
pub enum LauncherError {
    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// A language code outside the supported set
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Errors related to translation catalog resources
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Errors related to plugin resolution or registration
    #[error("Plugin error: {0}")]
    Plugin(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<LauncherError>,
    },
}

impl LauncherError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        LauncherError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

impl From<serde_json::Error> for LauncherError {
    fn from(err: serde_json::Error) -> Self {
        LauncherError::Serialization(err.to_string())
    }
}

/// Result type alias for launcher operations
pub type Result<T> = std::result::Result<T, LauncherError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<LauncherError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.into().with_context(f()))
    }
}
