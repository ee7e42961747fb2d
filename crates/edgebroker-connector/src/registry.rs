//! Connector descriptor registry.
//!
//! The registry is built once at startup from the connector configuration
//! document and is read-only afterwards, so lookups take `&self` and need no
//! locking.
//!
//! ## Configuration document
//!
//! ```text
//! transports=mqtt,amqp
//! mqtt.transport_protocol=MQTT
//! mqtt.device.APP=edgebroker.device.ResponseMessage
//! mqtt.kapua.APP=edgebroker.domain.PackageResponseMessage
//! ```
//!
//! For each transport every category is looked up under
//! `<transport>.device.<CATEGORY>` and `<transport>.kapua.<CATEGORY>`.
//! Missing or empty keys leave the category unmapped; a key naming a type the
//! catalog cannot resolve fails the whole load. A type also only resolves
//! under the category it is registered for: `mqtt.device.NOTIFY` naming a
//! `BIRTH` type is rejected rather than accepted as any device message.

use std::collections::{BTreeMap, HashMap};

use edgebroker_core::{BrokerSettings, MessageCategory};

use crate::catalog::{MessageFamily, MessageTypeCatalog};
use crate::descriptor::{ConnectorDescriptor, DEFAULT_TRANSPORT_PROTOCOL};
use crate::error::{Error, ResolutionFailure, Result};
use crate::source::{ConfigSource, UriConfigSource};

/// Key listing the configured transports.
pub const TRANSPORTS_KEY: &str = "transports";

/// Connector name -> descriptor table, with an optional fallback descriptor.
#[derive(Debug, Clone, Default)]
pub struct DescriptorRegistry {
    by_connector_name: HashMap<String, ConnectorDescriptor>,
    default: Option<ConnectorDescriptor>,
}

impl DescriptorRegistry {
    /// Build the registry from settings, fetching the configuration document
    /// from its URI when one is set.
    pub fn load(settings: &BrokerSettings, catalog: &MessageTypeCatalog) -> Result<Self> {
        Self::load_with(settings, catalog, &UriConfigSource::new())
    }

    /// Build the registry, fetching the configuration document through `source`.
    pub fn load_with(
        settings: &BrokerSettings,
        catalog: &MessageTypeCatalog,
        source: &dyn ConfigSource,
    ) -> Result<Self> {
        catalog.validate()?;

        let default = if settings.disable_default_connector_descriptor {
            tracing::info!("Default connector descriptor disabled");
            None
        } else {
            Some(Self::create_default())
        };

        let Some(uri) = settings.configuration_uri.as_deref() else {
            tracing::info!("No connector configuration URI set, no connector descriptors loaded");
            return Ok(Self {
                by_connector_name: HashMap::new(),
                default,
            });
        };

        tracing::info!("Loading connector descriptors from {}", uri);
        let document = source.fetch(uri)?;
        Self::from_properties(&document, catalog, default)
    }

    /// Build the registry from an already fetched configuration document.
    pub fn from_properties(
        document: &[u8],
        catalog: &MessageTypeCatalog,
        default: Option<ConnectorDescriptor>,
    ) -> Result<Self> {
        let properties = java_properties::read(document)?;
        let by_connector_name = load_descriptors(&properties, catalog)?;

        tracing::info!("Loaded {} connector descriptor(s)", by_connector_name.len());
        Ok(Self {
            by_connector_name,
            default,
        })
    }

    /// Descriptor answering for connectors without their own configuration.
    pub fn create_default() -> ConnectorDescriptor {
        ConnectorDescriptor::new(
            Some(DEFAULT_TRANSPORT_PROTOCOL.to_string()),
            BTreeMap::new(),
            BTreeMap::new(),
        )
    }

    /// Look up the descriptor of a connector, falling back to the default
    /// descriptor when it is enabled.
    pub fn resolve(&self, connector_name: &str) -> Option<&ConnectorDescriptor> {
        match self.by_connector_name.get(connector_name) {
            Some(descriptor) => Some(descriptor),
            None => {
                tracing::debug!(
                    "No descriptor for connector '{}', using {}",
                    connector_name,
                    if self.default.is_some() { "default" } else { "none" }
                );
                self.default.as_ref()
            }
        }
    }

    /// The fallback descriptor, if enabled.
    pub fn default_descriptor(&self) -> Option<&ConnectorDescriptor> {
        self.default.as_ref()
    }

    /// Names of all configured connectors, sorted.
    pub fn connector_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.by_connector_name.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of configured connectors.
    pub fn len(&self) -> usize {
        self.by_connector_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_connector_name.is_empty()
    }
}

/// Split the transport list: comma separated, trimmed, empty entries dropped.
fn transport_names(properties: &HashMap<String, String>) -> Vec<&str> {
    properties
        .get(TRANSPORTS_KEY)
        .map(|list| {
            list.split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

fn load_descriptors(
    properties: &HashMap<String, String>,
    catalog: &MessageTypeCatalog,
) -> Result<HashMap<String, ConnectorDescriptor>> {
    let mut descriptors = HashMap::new();
    for transport in transport_names(properties) {
        let descriptor = load_descriptor(properties, transport, catalog)?;
        if descriptors.insert(transport.to_string(), descriptor).is_some() {
            tracing::warn!(
                "Transport '{}' is listed more than once, keeping the last definition",
                transport
            );
        }
    }
    Ok(descriptors)
}

fn load_descriptor(
    properties: &HashMap<String, String>,
    transport: &str,
    catalog: &MessageTypeCatalog,
) -> Result<ConnectorDescriptor> {
    let transport_protocol = properties
        .get(&format!("{}.transport_protocol", transport))
        .cloned();

    let mut device_types = BTreeMap::new();
    let mut domain_types = BTreeMap::new();

    for category in MessageCategory::ALL {
        let key = type_key(transport, MessageFamily::Device, category);
        if let Some(type_ref) = type_reference(properties, &key) {
            let message_type = catalog
                .resolve_device(type_ref, category)
                .map_err(|reason| resolution_error(&key, type_ref, reason))?;
            device_types.insert(category, message_type);
        }

        let key = type_key(transport, MessageFamily::Domain, category);
        if let Some(type_ref) = type_reference(properties, &key) {
            let message_type = catalog
                .resolve_domain(type_ref, category)
                .map_err(|reason| resolution_error(&key, type_ref, reason))?;
            domain_types.insert(category, message_type);
        }
    }

    tracing::debug!(
        "Transport '{}': {} device and {} domain message type(s)",
        transport,
        device_types.len(),
        domain_types.len()
    );
    Ok(ConnectorDescriptor::new(
        transport_protocol,
        device_types,
        domain_types,
    ))
}

fn type_key(transport: &str, family: MessageFamily, category: MessageCategory) -> String {
    format!("{}.{}.{}", transport, family.config_segment(), category.as_str())
}

/// Non-empty type reference under `key`; logs when there is none.
fn type_reference<'a>(properties: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    let type_ref = properties
        .get(key)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty());
    if type_ref.is_none() {
        tracing::info!("No message type mapping for key {}", key);
    }
    type_ref
}

fn resolution_error(key: &str, type_ref: &str, reason: ResolutionFailure) -> Error {
    Error::TypeResolution {
        key: key.to_string(),
        type_ref: type_ref.to_string(),
        reason,
    }
}
