//! Error types for response translation.

use edgebroker_core::{DeviceResponseChannel, DeviceResponsePayload};
use thiserror::Error;

use crate::packages::DeploymentPackages;

/// Result type for translation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while translating a device response.
#[derive(Debug, Error)]
pub enum Error {
    /// The device channel does not belong to the expected application.
    #[error("Invalid channel {}/{}: {source}", .channel.app_id, .channel.app_version)]
    InvalidChannel {
        channel: Box<DeviceResponseChannel>,
        source: ChannelError,
    },

    /// The device payload could not be translated.
    #[error("Invalid payload: {0}")]
    InvalidPayload(#[from] PayloadError),
}

/// Why a device channel was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    #[error("expected application id '{expected}', found '{found}'")]
    AppId { expected: &'static str, found: String },

    #[error("expected application version '{expected}', found '{found}'")]
    AppVersion { expected: &'static str, found: String },
}

/// Why a device payload could not be translated.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// Download status token outside the known set.
    #[error("Unknown download status: {0}")]
    UnknownStatusToken(String),

    /// The configured charset is not known.
    #[error("Unsupported charset '{charset}' for a {} byte body", .body.len())]
    UnsupportedCharset { charset: String, body: Vec<u8> },

    /// The body is not valid in the configured charset.
    #[error("Body is not valid {charset} ({} bytes)", .body.len())]
    MalformedBody { charset: String, body: Vec<u8> },

    /// The decoded body is not a package list document.
    #[error("Invalid package list: {reason}")]
    PackageList { document: String, reason: String },

    /// The canonical package list could not be written.
    #[error("Cannot encode package list: {reason}")]
    PackageEncode {
        packages: Box<DeploymentPackages>,
        reason: String,
    },

    /// Any other payload failure, with the payload it occurred on.
    #[error("{source}")]
    Invalid {
        payload: Box<DeviceResponsePayload>,
        source: MetricError,
    },
}

/// Metric content that cannot be translated.
#[derive(Debug, Error)]
pub enum MetricError {
    #[error("metric '{metric}' must be a {expected}, found a {found}")]
    WrongType {
        metric: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("metric '{metric}' is not an operation id: '{value}'")]
    InvalidOperationId {
        metric: &'static str,
        value: String,
        source: num_bigint::ParseBigIntError,
    },
}
