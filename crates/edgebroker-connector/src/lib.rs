//! Connector descriptors for the edge broker.
//!
//! Each transport the broker speaks (MQTT, AMQP, ...) is described by a
//! [`ConnectorDescriptor`]: which device-native and which domain message type
//! represents each [`MessageCategory`](edgebroker_core::MessageCategory) on
//! that transport. The [`DescriptorRegistry`] builds the descriptors once at
//! startup from a properties document and answers lookups by connector name.
//!
//! ## Components
//!
//! - **Catalog**: fully-qualified type names -> message constructors ([`catalog`])
//! - **Descriptors**: per-transport category mappings ([`descriptor`])
//! - **Registry**: loading and lookup, with an optional fallback descriptor ([`registry`])
//! - **Sources**: where the properties document comes from ([`source`])
//!
//! ## Example
//!
//! ```rust,no_run
//! use edgebroker_connector::{DescriptorRegistry, MessageTypeCatalog};
//! use edgebroker_core::{BrokerSettings, MessageCategory, Settings};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = BrokerSettings::from_settings(&Settings::load(None)?);
//!     let registry = DescriptorRegistry::load(&settings, &MessageTypeCatalog::builtin())?;
//!
//!     if let Some(descriptor) = registry.resolve("mqtt") {
//!         let message = descriptor.new_domain_message(MessageCategory::App);
//!         println!("{:?}", message.map(|m| m.type_name()));
//!     }
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod descriptor;
pub mod error;
pub mod registry;
pub mod source;

pub use catalog::{DeviceMessageType, DomainMessageType, MessageFamily, MessageType, MessageTypeCatalog};
pub use descriptor::{ConnectorDescriptor, DescriptorInfo, DEFAULT_TRANSPORT_PROTOCOL};
pub use error::{Error, ResolutionFailure, Result};
pub use registry::{DescriptorRegistry, TRANSPORTS_KEY};
pub use source::{ConfigSource, InlineConfigSource, UriConfigSource};
