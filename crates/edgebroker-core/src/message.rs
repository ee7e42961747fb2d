//! Message traits and metric values.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::MessageCategory;

/// A message as produced or consumed by the field device or gateway.
pub trait DeviceMessage: std::fmt::Debug + Send + Sync {
    /// Fully-qualified type reference this message is registered under.
    fn type_name(&self) -> &'static str;

    /// Category of this message.
    fn category(&self) -> MessageCategory;
}

/// The broker's transport-agnostic representation of a message.
pub trait DomainMessage: std::fmt::Debug + Send + Sync {
    /// Fully-qualified type reference this message is registered under.
    fn type_name(&self) -> &'static str;

    /// Category of this message.
    fn category(&self) -> MessageCategory;
}

/// Typed metric value carried in a device payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Boolean(bool),
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    Bytes(Vec<u8>),
}

impl MetricValue {
    /// Name of the value type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Boolean(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Long(_) => "long",
            Self::Float(_) => "float",
            Self::Double(_) => "double",
            Self::String(_) => "string",
            Self::Bytes(_) => "bytes",
        }
    }

    /// Borrow the value when it is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value when it is a 32-bit integer.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }
}

impl std::fmt::Display for MetricValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Boolean(v) => write!(f, "{}", v),
            Self::Integer(v) => write!(f, "{}", v),
            Self::Long(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Double(v) => write!(f, "{}", v),
            Self::String(v) => f.write_str(v),
            Self::Bytes(v) => f.write_str(&BASE64.encode(v)),
        }
    }
}

impl From<&str> for MetricValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for MetricValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i32> for MetricValue {
    fn from(value: i32) -> Self {
        Self::Integer(value)
    }
}

impl From<i64> for MetricValue {
    fn from(value: i64) -> Self {
        Self::Long(value)
    }
}

impl From<bool> for MetricValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// Metric name -> value map of a device payload.
pub type Metrics = HashMap<String, MetricValue>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_textual_form() {
        assert_eq!(MetricValue::from("COMPLETED").to_string(), "COMPLETED");
        assert_eq!(MetricValue::from(42).to_string(), "42");
        assert_eq!(MetricValue::from(1_234_567_890_123_i64).to_string(), "1234567890123");
        assert_eq!(MetricValue::Bytes(vec![1, 2, 3]).to_string(), "AQID");
    }

    #[test]
    fn test_metric_accessors() {
        assert_eq!(MetricValue::from("x").as_str(), Some("x"));
        assert_eq!(MetricValue::from(7).as_str(), None);
        assert_eq!(MetricValue::from(7).as_i32(), Some(7));
        assert_eq!(MetricValue::from(7_i64).as_i32(), None);
        assert_eq!(MetricValue::from(7_i64).type_name(), "long");
    }
}
