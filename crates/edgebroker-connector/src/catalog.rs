//! Message type catalog.
//!
//! Connector configuration refers to message types by fully-qualified name.
//! The catalog is the explicit table those names are resolved against: each
//! entry pairs a name with the category it handles and a constructor for an
//! empty message of that type.
//!
//! ```text
//! "edgebroker.device.BirthMessage"  ──→  DeviceMessageType { BIRTH, || DeviceEventMessage }
//! "edgebroker.domain.PackageResponseMessage"  ──→  DomainMessageType { APP, || PackageResponseMessage }
//! ```

use std::collections::HashMap;
use std::fmt;

use edgebroker_core::{
    DeviceEventMessage, DeviceMessage, DeviceResponseMessage, DomainEventMessage, DomainMessage,
    MessageCategory, PackageResponseMessage,
};
use serde::Serialize;

use crate::error::{Error, ResolutionFailure, Result};

/// Which side of the translation a message type belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageFamily {
    /// Device-native messages (`<transport>.device.<CATEGORY>` keys)
    Device,
    /// Canonical domain messages (`<transport>.kapua.<CATEGORY>` keys)
    Domain,
}

impl MessageFamily {
    /// Segment used in connector configuration keys.
    pub fn config_segment(&self) -> &'static str {
        match self {
            Self::Device => "device",
            Self::Domain => "kapua",
        }
    }
}

impl fmt::Display for MessageFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Device => f.write_str("device"),
            Self::Domain => f.write_str("domain"),
        }
    }
}

/// A registered message type: name, handled category and constructor.
pub struct MessageType<M: ?Sized> {
    name: &'static str,
    category: MessageCategory,
    create: fn() -> Box<M>,
}

/// Device-native message type.
pub type DeviceMessageType = MessageType<dyn DeviceMessage>;

/// Canonical domain message type.
pub type DomainMessageType = MessageType<dyn DomainMessage>;

impl<M: ?Sized> MessageType<M> {
    pub fn new(name: &'static str, category: MessageCategory, create: fn() -> Box<M>) -> Self {
        Self {
            name,
            category,
            create,
        }
    }

    /// Fully-qualified type reference.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn category(&self) -> MessageCategory {
        self.category
    }

    /// Instantiate an empty message of this type.
    pub fn create(&self) -> Box<M> {
        (self.create)()
    }
}

impl<M: ?Sized> Clone for MessageType<M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: ?Sized> Copy for MessageType<M> {}

// Identity is the registered name and category.
impl<M: ?Sized> PartialEq for MessageType<M> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.category == other.category
    }
}

impl<M: ?Sized> Eq for MessageType<M> {}

impl<M: ?Sized> fmt::Debug for MessageType<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageType")
            .field("name", &self.name)
            .field("category", &self.category)
            .finish()
    }
}

macro_rules! device_event_type {
    ($category:expr) => {
        DeviceMessageType::new(
            DeviceEventMessage::type_name_for($category),
            $category,
            || -> Box<dyn DeviceMessage> { Box::new(DeviceEventMessage::new($category)) },
        )
    };
}

macro_rules! domain_event_type {
    ($category:expr) => {
        DomainMessageType::new(
            DomainEventMessage::type_name_for($category),
            $category,
            || -> Box<dyn DomainMessage> { Box::new(DomainEventMessage::new($category)) },
        )
    };
}

/// Built-in device-native message types.
pub fn builtin_device_types() -> Vec<DeviceMessageType> {
    vec![
        DeviceMessageType::new(
            DeviceResponseMessage::TYPE_NAME,
            MessageCategory::App,
            || -> Box<dyn DeviceMessage> { Box::new(DeviceResponseMessage::default()) },
        ),
        device_event_type!(MessageCategory::App),
        device_event_type!(MessageCategory::Birth),
        device_event_type!(MessageCategory::Disconnect),
        device_event_type!(MessageCategory::Missing),
        device_event_type!(MessageCategory::Notify),
        device_event_type!(MessageCategory::Data),
    ]
}

/// Built-in canonical domain message types.
pub fn builtin_domain_types() -> Vec<DomainMessageType> {
    vec![
        DomainMessageType::new(
            PackageResponseMessage::TYPE_NAME,
            MessageCategory::App,
            || -> Box<dyn DomainMessage> { Box::new(PackageResponseMessage::default()) },
        ),
        domain_event_type!(MessageCategory::App),
        domain_event_type!(MessageCategory::Birth),
        domain_event_type!(MessageCategory::Disconnect),
        domain_event_type!(MessageCategory::Missing),
        domain_event_type!(MessageCategory::Notify),
        domain_event_type!(MessageCategory::Data),
    ]
}

/// Name -> message type tables for both families.
#[derive(Debug, Clone, Default)]
pub struct MessageTypeCatalog {
    device: HashMap<&'static str, DeviceMessageType>,
    domain: HashMap<&'static str, DomainMessageType>,
}

impl MessageTypeCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog holding the built-in message types.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for message_type in builtin_device_types() {
            catalog.register_device(message_type);
        }
        for message_type in builtin_domain_types() {
            catalog.register_domain(message_type);
        }
        catalog
    }

    /// Register a device-native message type, replacing any type of the same name.
    pub fn register_device(&mut self, message_type: DeviceMessageType) {
        self.device.insert(message_type.name(), message_type);
    }

    /// Register a domain message type, replacing any type of the same name.
    pub fn register_domain(&mut self, message_type: DomainMessageType) {
        self.domain.insert(message_type.name(), message_type);
    }

    /// Resolve a device-native type reference for the given category.
    pub fn resolve_device(
        &self,
        type_ref: &str,
        category: MessageCategory,
    ) -> std::result::Result<DeviceMessageType, ResolutionFailure> {
        match self.device.get(type_ref) {
            Some(message_type) => check_category(*message_type, category),
            None if self.domain.contains_key(type_ref) => Err(ResolutionFailure::WrongFamily {
                expected: MessageFamily::Device,
                found: MessageFamily::Domain,
            }),
            None => Err(ResolutionFailure::Unknown(MessageFamily::Device)),
        }
    }

    /// Resolve a domain type reference for the given category.
    pub fn resolve_domain(
        &self,
        type_ref: &str,
        category: MessageCategory,
    ) -> std::result::Result<DomainMessageType, ResolutionFailure> {
        match self.domain.get(type_ref) {
            Some(message_type) => check_category(*message_type, category),
            None if self.device.contains_key(type_ref) => Err(ResolutionFailure::WrongFamily {
                expected: MessageFamily::Domain,
                found: MessageFamily::Device,
            }),
            None => Err(ResolutionFailure::Unknown(MessageFamily::Domain)),
        }
    }

    /// Check that every category has at least one type in each family and
    /// that every constructor builds a message matching its registration.
    pub fn validate(&self) -> Result<()> {
        for category in MessageCategory::ALL {
            if !self.device.values().any(|t| t.category() == category) {
                return Err(Error::Catalog(format!("no device message type for {}", category)));
            }
            if !self.domain.values().any(|t| t.category() == category) {
                return Err(Error::Catalog(format!("no domain message type for {}", category)));
            }
        }
        for message_type in self.device.values() {
            let message = message_type.create();
            check_instance(message_type, message.type_name(), message.category())?;
        }
        for message_type in self.domain.values() {
            let message = message_type.create();
            check_instance(message_type, message.type_name(), message.category())?;
        }
        Ok(())
    }

    /// Number of registered types in a family.
    pub fn len(&self, family: MessageFamily) -> usize {
        match family {
            MessageFamily::Device => self.device.len(),
            MessageFamily::Domain => self.domain.len(),
        }
    }
}

fn check_category<M: ?Sized>(
    message_type: MessageType<M>,
    expected: MessageCategory,
) -> std::result::Result<MessageType<M>, ResolutionFailure> {
    if message_type.category() == expected {
        Ok(message_type)
    } else {
        Err(ResolutionFailure::WrongCategory {
            expected,
            declared: message_type.category(),
        })
    }
}

fn check_instance<M: ?Sized>(
    message_type: &MessageType<M>,
    type_name: &str,
    category: MessageCategory,
) -> Result<()> {
    if type_name != message_type.name() || category != message_type.category() {
        return Err(Error::Catalog(format!(
            "'{}' ({}) constructs '{}' ({})",
            message_type.name(),
            message_type.category(),
            type_name,
            category
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_is_complete() {
        let catalog = MessageTypeCatalog::builtin();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.len(MessageFamily::Device), 7);
        assert_eq!(catalog.len(MessageFamily::Domain), 7);
    }

    #[test]
    fn test_empty_catalog_is_incomplete() {
        let err = MessageTypeCatalog::new().validate().unwrap_err();
        assert!(matches!(err, Error::Catalog(_)));
    }

    #[test]
    fn test_resolve_device_type() {
        let catalog = MessageTypeCatalog::builtin();
        let resolved = catalog
            .resolve_device("edgebroker.device.ResponseMessage", MessageCategory::App)
            .unwrap();
        assert_eq!(resolved.name(), DeviceResponseMessage::TYPE_NAME);
        assert_eq!(resolved.create().category(), MessageCategory::App);
    }

    #[test]
    fn test_resolve_unknown_type() {
        let catalog = MessageTypeCatalog::builtin();
        assert_eq!(
            catalog.resolve_device("com.example.Nope", MessageCategory::App),
            Err(ResolutionFailure::Unknown(MessageFamily::Device))
        );
    }

    #[test]
    fn test_resolve_wrong_family() {
        let catalog = MessageTypeCatalog::builtin();
        assert_eq!(
            catalog.resolve_device(PackageResponseMessage::TYPE_NAME, MessageCategory::App),
            Err(ResolutionFailure::WrongFamily {
                expected: MessageFamily::Device,
                found: MessageFamily::Domain,
            })
        );
    }

    #[test]
    fn test_resolve_wrong_category() {
        let catalog = MessageTypeCatalog::builtin();
        assert_eq!(
            catalog.resolve_domain("edgebroker.domain.BirthMessage", MessageCategory::Data),
            Err(ResolutionFailure::WrongCategory {
                expected: MessageCategory::Data,
                declared: MessageCategory::Birth,
            })
        );
    }

    #[test]
    fn test_mismatched_constructor_fails_validation() {
        let mut catalog = MessageTypeCatalog::builtin();
        catalog.register_device(DeviceMessageType::new(
            "com.example.LyingBirth",
            MessageCategory::Birth,
            || -> Box<dyn DeviceMessage> { Box::new(DeviceEventMessage::new(MessageCategory::Data)) },
        ));
        let err = catalog.validate().unwrap_err();
        assert!(err.to_string().contains("com.example.LyingBirth"));
    }
}
