//! Connector descriptors.

use std::collections::BTreeMap;

use edgebroker_core::{DeviceMessage, DomainMessage, MessageCategory};
use serde::Serialize;

use crate::catalog::{DeviceMessageType, DomainMessageType};

/// Transport protocol label of the default descriptor.
pub const DEFAULT_TRANSPORT_PROTOCOL: &str = "NONE";

/// Binding of one transport to the message types used on each side of
/// translation, per category. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorDescriptor {
    transport_protocol: Option<String>,
    device_types: BTreeMap<MessageCategory, DeviceMessageType>,
    domain_types: BTreeMap<MessageCategory, DomainMessageType>,
}

impl ConnectorDescriptor {
    pub fn new(
        transport_protocol: Option<String>,
        device_types: BTreeMap<MessageCategory, DeviceMessageType>,
        domain_types: BTreeMap<MessageCategory, DomainMessageType>,
    ) -> Self {
        Self {
            transport_protocol,
            device_types,
            domain_types,
        }
    }

    /// Protocol label, absent when the transport block does not set one.
    pub fn transport_protocol(&self) -> Option<&str> {
        self.transport_protocol.as_deref()
    }

    pub fn device_type(&self, category: MessageCategory) -> Option<&DeviceMessageType> {
        self.device_types.get(&category)
    }

    pub fn domain_type(&self, category: MessageCategory) -> Option<&DomainMessageType> {
        self.domain_types.get(&category)
    }

    pub fn device_types(&self) -> &BTreeMap<MessageCategory, DeviceMessageType> {
        &self.device_types
    }

    pub fn domain_types(&self) -> &BTreeMap<MessageCategory, DomainMessageType> {
        &self.domain_types
    }

    /// Instantiate an empty device-native message for a category, if mapped.
    pub fn new_device_message(&self, category: MessageCategory) -> Option<Box<dyn DeviceMessage>> {
        self.device_type(category).map(DeviceMessageType::create)
    }

    /// Instantiate an empty domain message for a category, if mapped.
    pub fn new_domain_message(&self, category: MessageCategory) -> Option<Box<dyn DomainMessage>> {
        self.domain_type(category).map(DomainMessageType::create)
    }

    /// Serializable summary.
    pub fn info(&self) -> DescriptorInfo {
        DescriptorInfo {
            transport_protocol: self.transport_protocol.clone(),
            device: self
                .device_types
                .iter()
                .map(|(category, message_type)| (*category, message_type.name().to_string()))
                .collect(),
            domain: self
                .domain_types
                .iter()
                .map(|(category, message_type)| (*category, message_type.name().to_string()))
                .collect(),
        }
    }
}

/// Summary of a connector descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescriptorInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport_protocol: Option<String>,
    /// Category -> device-native type reference
    pub device: BTreeMap<MessageCategory, String>,
    /// Category -> domain type reference
    pub domain: BTreeMap<MessageCategory, String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MessageTypeCatalog;

    fn descriptor() -> ConnectorDescriptor {
        let catalog = MessageTypeCatalog::builtin();
        let mut device = BTreeMap::new();
        device.insert(
            MessageCategory::Birth,
            catalog
                .resolve_device("edgebroker.device.BirthMessage", MessageCategory::Birth)
                .unwrap(),
        );
        let mut domain = BTreeMap::new();
        domain.insert(
            MessageCategory::App,
            catalog
                .resolve_domain("edgebroker.domain.PackageResponseMessage", MessageCategory::App)
                .unwrap(),
        );
        ConnectorDescriptor::new(Some("MQTT".to_string()), device, domain)
    }

    #[test]
    fn test_instantiate_mapped_messages() {
        let descriptor = descriptor();

        let birth = descriptor.new_device_message(MessageCategory::Birth).unwrap();
        assert_eq!(birth.category(), MessageCategory::Birth);
        assert_eq!(birth.type_name(), "edgebroker.device.BirthMessage");

        let response = descriptor.new_domain_message(MessageCategory::App).unwrap();
        assert_eq!(response.type_name(), "edgebroker.domain.PackageResponseMessage");
    }

    #[test]
    fn test_unmapped_category() {
        let descriptor = descriptor();
        assert!(descriptor.new_device_message(MessageCategory::Data).is_none());
        assert!(descriptor.domain_type(MessageCategory::Missing).is_none());
    }

    #[test]
    fn test_info_serialization() {
        let json = serde_json::to_value(descriptor().info()).unwrap();
        assert_eq!(json["transport_protocol"], "MQTT");
        assert_eq!(json["device"]["BIRTH"], "edgebroker.device.BirthMessage");
        assert_eq!(json["domain"]["APP"], "edgebroker.domain.PackageResponseMessage");
    }
}
