//! Error types for the core crate.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading settings.
#[derive(Debug, Error)]
pub enum Error {
    /// Settings file could not be opened.
    #[error("Failed to read settings file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings document is not a valid properties file.
    #[error("Invalid settings document: {0}")]
    Properties(#[from] java_properties::PropertiesError),
}
