//! Message category.

use serde::{Deserialize, Serialize};

/// Message category is the symbolic kind of a message, independent of the
/// transport that carries it. Connector descriptors are keyed by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MessageCategory {
    /// Application request/response traffic
    App,
    /// Device came online
    Birth,
    /// Device disconnected cleanly
    Disconnect,
    /// Device went away without disconnecting
    Missing,
    /// Asynchronous application notification
    Notify,
    /// Telemetry
    Data,
}

impl MessageCategory {
    /// Every category, in declaration order.
    pub const ALL: [MessageCategory; 6] = [
        Self::App,
        Self::Birth,
        Self::Disconnect,
        Self::Missing,
        Self::Notify,
        Self::Data,
    ];

    /// Upper-case name, as used in connector configuration keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::App => "APP",
            Self::Birth => "BIRTH",
            Self::Disconnect => "DISCONNECT",
            Self::Missing => "MISSING",
            Self::Notify => "NOTIFY",
            Self::Data => "DATA",
        }
    }

    pub fn from_string(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.as_str() == s)
    }
}

impl std::fmt::Display for MessageCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_str() {
        assert_eq!(MessageCategory::from_string("APP"), Some(MessageCategory::App));
        assert_eq!(MessageCategory::from_string("MISSING"), Some(MessageCategory::Missing));
        assert_eq!(MessageCategory::from_string("app"), None);
        assert_eq!(MessageCategory::from_string("invalid"), None);
    }

    #[test]
    fn test_category_names_round_trip() {
        for category in MessageCategory::ALL {
            assert_eq!(MessageCategory::from_string(category.as_str()), Some(category));
        }
    }

    #[test]
    fn test_category_serde() {
        let json = serde_json::to_string(&MessageCategory::Disconnect).unwrap();
        assert_eq!(json, "\"DISCONNECT\"");
    }
}
