//! Broker settings.
//!
//! Settings are a flat key/value set layered as: built-in defaults, an
//! optional properties file, then `EDGEBROKER_<KEY>` environment variables.
//! Components never read them globally; typed views such as
//! [`BrokerSettings`] and [`DeviceManagementSettings`] are built once at
//! startup and passed to constructors.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{Error, Result};

/// Setting keys.
pub mod keys {
    /// Location of the connector descriptor document.
    pub const CONFIGURATION_URI: &str = "CONFIGURATION_URI";
    /// When true, unknown connectors resolve to nothing instead of the default descriptor.
    pub const DISABLE_DEFAULT_CONNECTOR_DESCRIPTOR: &str = "DISABLE_DEFAULT_CONNECTOR_DESCRIPTOR";
    /// Charset used for response body text.
    pub const CHAR_ENCODING: &str = "CHAR_ENCODING";

    pub const ALL: [&str; 3] = [
        CONFIGURATION_URI,
        DISABLE_DEFAULT_CONNECTOR_DESCRIPTOR,
        CHAR_ENCODING,
    ];
}

/// Default values.
pub mod defaults {
    pub const CHAR_ENCODING: &str = "UTF-8";
    pub const DISABLE_DEFAULT_CONNECTOR_DESCRIPTOR: bool = false;
}

/// Environment variable names.
pub mod env_vars {
    pub const PREFIX: &str = "EDGEBROKER_";

    /// Environment variable overriding a setting key.
    pub fn for_key(key: &str) -> String {
        format!("{}{}", PREFIX, key)
    }
}

/// Flat key/value settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    values: HashMap<String, String>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from an optional properties file, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let settings = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::new(),
        };
        Ok(settings.with_env_overrides())
    }

    /// Read a properties file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_properties(BufReader::new(file))
    }

    /// Parse a properties document.
    pub fn from_properties<R: Read>(reader: R) -> Result<Self> {
        let values = java_properties::read(reader)?;
        Ok(Self { values })
    }

    /// Set a value.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Override known keys from `EDGEBROKER_<KEY>` environment variables.
    pub fn with_env_overrides(mut self) -> Self {
        for key in keys::ALL {
            if let Ok(value) = std::env::var(env_vars::for_key(key)) {
                tracing::debug!("Setting {} overridden from environment", key);
                self.values.insert(key.to_string(), value);
            }
        }
        self
    }

    /// Get a string value, or the default when the key is absent.
    pub fn get_string(&self, key: &str, default: Option<&str>) -> Option<String> {
        self.values
            .get(key)
            .map(String::as_str)
            .or(default)
            .map(str::to_string)
    }

    /// Get a boolean value, or the default when the key is absent or not a boolean.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.values.get(key) {
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "true" => true,
                "false" => false,
                _ => {
                    tracing::warn!("Setting {} is not a boolean: '{}', using {}", key, raw, default);
                    default
                }
            },
            None => default,
        }
    }
}

/// Settings consumed by the connector descriptor registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrokerSettings {
    /// Location of the connector descriptor document; `None` when unset or empty
    pub configuration_uri: Option<String>,
    pub disable_default_connector_descriptor: bool,
}

impl BrokerSettings {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            configuration_uri: settings
                .get_string(keys::CONFIGURATION_URI, None)
                .filter(|uri| !uri.trim().is_empty()),
            disable_default_connector_descriptor: settings.get_bool(
                keys::DISABLE_DEFAULT_CONNECTOR_DESCRIPTOR,
                defaults::DISABLE_DEFAULT_CONNECTOR_DESCRIPTOR,
            ),
        }
    }
}

/// Settings consumed by device management translators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceManagementSettings {
    /// Charset label used to decode and encode response bodies
    pub char_encoding: String,
}

impl DeviceManagementSettings {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            char_encoding: settings
                .get_string(keys::CHAR_ENCODING, Some(defaults::CHAR_ENCODING))
                .unwrap_or_else(|| defaults::CHAR_ENCODING.to_string()),
        }
    }
}

impl Default for DeviceManagementSettings {
    fn default() -> Self {
        Self {
            char_encoding: defaults::CHAR_ENCODING.to_string(),
        }
    }
}
