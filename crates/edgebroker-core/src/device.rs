//! Device-native messages, as they arrive from the field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::message::{DeviceMessage, MetricValue, Metrics};
use crate::MessageCategory;

/// Channel of an unsolicited device message (lifecycle, notification, telemetry).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceChannel {
    /// Account the device belongs to
    pub scope: String,
    /// Client identifier of the device
    pub client_id: String,
    /// Semantic topic parts following the client id
    #[serde(default)]
    pub semantic_parts: Vec<String>,
}

/// Generic device payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DevicePayload {
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub metrics: Metrics,
    pub body: Option<Vec<u8>>,
}

/// Unsolicited device message of a given category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceEventMessage {
    pub category: MessageCategory,
    pub channel: DeviceChannel,
    pub payload: DevicePayload,
}

impl DeviceEventMessage {
    /// Create an empty message of the given category.
    pub fn new(category: MessageCategory) -> Self {
        Self {
            category,
            channel: DeviceChannel::default(),
            payload: DevicePayload::default(),
        }
    }

    /// Type reference of the event message registered for a category.
    pub fn type_name_for(category: MessageCategory) -> &'static str {
        match category {
            MessageCategory::App => "edgebroker.device.AppMessage",
            MessageCategory::Birth => "edgebroker.device.BirthMessage",
            MessageCategory::Disconnect => "edgebroker.device.DisconnectMessage",
            MessageCategory::Missing => "edgebroker.device.MissingMessage",
            MessageCategory::Notify => "edgebroker.device.NotifyMessage",
            MessageCategory::Data => "edgebroker.device.DataMessage",
        }
    }
}

impl DeviceMessage for DeviceEventMessage {
    fn type_name(&self) -> &'static str {
        Self::type_name_for(self.category)
    }

    fn category(&self) -> MessageCategory {
        self.category
    }
}

/// Response code reported by a device application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceResponseCode {
    #[default]
    Accepted,
    BadRequest,
    NotFound,
    InternalError,
}

impl DeviceResponseCode {
    /// Numeric code as sent on the wire.
    pub fn code(&self) -> u16 {
        match self {
            Self::Accepted => 200,
            Self::BadRequest => 400,
            Self::NotFound => 404,
            Self::InternalError => 500,
        }
    }

    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            200 => Some(Self::Accepted),
            400 => Some(Self::BadRequest),
            404 => Some(Self::NotFound),
            500 => Some(Self::InternalError),
            _ => None,
        }
    }
}

impl std::fmt::Display for DeviceResponseCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Channel of a device application response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceResponseChannel {
    pub scope: String,
    pub client_id: String,
    /// Application identifier, e.g. `DEPLOY`
    pub app_id: String,
    /// Application version, e.g. `V2`
    pub app_version: String,
    pub request_id: Option<String>,
    pub requester_client_id: Option<String>,
}

/// Payload of a device application response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceResponsePayload {
    pub response_code: DeviceResponseCode,
    #[serde(default)]
    pub metrics: Metrics,
    pub body: Option<Vec<u8>>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl DeviceResponsePayload {
    pub fn new(response_code: DeviceResponseCode) -> Self {
        Self {
            response_code,
            ..Default::default()
        }
    }

    /// Set a metric.
    pub fn with_metric(mut self, name: impl Into<String>, value: impl Into<MetricValue>) -> Self {
        self.metrics.insert(name.into(), value.into());
        self
    }

    /// Set the raw body.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn metric(&self, name: &str) -> Option<&MetricValue> {
        self.metrics.get(name)
    }

    /// Whether a non-empty body is attached.
    pub fn has_body(&self) -> bool {
        self.body.as_ref().is_some_and(|body| !body.is_empty())
    }
}

/// Response sent by a device application to a broker request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceResponseMessage {
    pub channel: DeviceResponseChannel,
    pub payload: DeviceResponsePayload,
    /// When the broker received the message
    pub received_on: DateTime<Utc>,
}

impl DeviceResponseMessage {
    pub const TYPE_NAME: &'static str = "edgebroker.device.ResponseMessage";

    pub fn new(channel: DeviceResponseChannel, payload: DeviceResponsePayload) -> Self {
        Self {
            channel,
            payload,
            received_on: Utc::now(),
        }
    }
}

impl Default for DeviceResponseMessage {
    fn default() -> Self {
        Self::new(DeviceResponseChannel::default(), DeviceResponsePayload::default())
    }
}

impl DeviceMessage for DeviceResponseMessage {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn category(&self) -> MessageCategory {
        MessageCategory::App
    }
}
