//! Error types for connector descriptor loading.

use edgebroker_core::MessageCategory;
use thiserror::Error;

use crate::catalog::MessageFamily;

/// Result type for connector operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building the descriptor registry.
///
/// Every variant aborts the whole load; no partial registry is kept.
#[derive(Debug, Error)]
pub enum Error {
    /// A configured type reference does not name a usable message type.
    #[error("Cannot resolve message type '{type_ref}' for key '{key}': {reason}")]
    TypeResolution {
        key: String,
        type_ref: String,
        #[source]
        reason: ResolutionFailure,
    },

    /// The configuration document could not be fetched.
    #[error("Failed to fetch connector configuration from {uri}: {reason}")]
    Fetch { uri: String, reason: String },

    /// The configuration URI uses a scheme no source handles.
    #[error("Unsupported connector configuration URI scheme: {0}")]
    UnsupportedScheme(String),

    /// The configuration document is not a valid properties file.
    #[error("Invalid connector configuration document: {0}")]
    Parse(#[from] java_properties::PropertiesError),

    /// The message type catalog does not cover every category.
    #[error("Incomplete message type catalog: {0}")]
    Catalog(String),
}

/// Why a type reference could not be resolved against the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionFailure {
    #[error("no {0} message type is registered under this name")]
    Unknown(MessageFamily),

    #[error("registered as a {found} message type, expected a {expected} message type")]
    WrongFamily {
        expected: MessageFamily,
        found: MessageFamily,
    },

    #[error("message type handles {declared} messages, expected {expected}")]
    WrongCategory {
        expected: MessageCategory,
        declared: MessageCategory,
    },
}
