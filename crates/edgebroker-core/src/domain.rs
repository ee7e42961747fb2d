//! Canonical domain messages.

use chrono::{DateTime, Utc};
use num_bigint::BigInt;
use serde::{Serialize, Serializer};
use uuid::Uuid;

use crate::device::DeviceResponseCode;
use crate::message::{DomainMessage, Metrics};
use crate::MessageCategory;

/// Response code of a canonical response message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainResponseCode {
    #[default]
    Accepted,
    BadRequest,
    NotFound,
    InternalError,
}

impl From<DeviceResponseCode> for DomainResponseCode {
    fn from(code: DeviceResponseCode) -> Self {
        match code {
            DeviceResponseCode::Accepted => Self::Accepted,
            DeviceResponseCode::BadRequest => Self::BadRequest,
            DeviceResponseCode::NotFound => Self::NotFound,
            DeviceResponseCode::InternalError => Self::InternalError,
        }
    }
}

/// Status of a package download operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PackageOperationStatus {
    /// No operation is running on the device
    None,
    InProgress,
    Failed,
    Completed,
}

impl PackageOperationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::InProgress => "IN_PROGRESS",
            Self::Failed => "FAILED",
            Self::Completed => "COMPLETED",
        }
    }
}

impl std::fmt::Display for PackageOperationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Channel of a package application response. Always carries the fixed
/// package application identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageResponseChannel {
    pub app_name: String,
    pub app_version: String,
}

impl PackageResponseChannel {
    pub const APP_NAME: &'static str = "PACKAGE";
    pub const APP_VERSION: &'static str = "1.0";
}

impl Default for PackageResponseChannel {
    fn default() -> Self {
        Self {
            app_name: Self::APP_NAME.to_string(),
            app_version: Self::APP_VERSION.to_string(),
        }
    }
}

/// Payload of a package application response.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PackageResponsePayload {
    #[serde(serialize_with = "serialize_big_int")]
    pub operation_id: Option<BigInt>,
    pub operation_status: Option<PackageOperationStatus>,
    pub operation_size: Option<i32>,
    pub operation_progress: Option<i32>,
    /// Canonical package list document, encoded with the configured charset
    pub body: Option<Vec<u8>>,
    pub error_message: Option<String>,
}

fn serialize_big_int<S: Serializer>(value: &Option<BigInt>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => serializer.serialize_some(&v.to_string()),
        None => serializer.serialize_none(),
    }
}

/// Canonical response of the package application.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackageResponseMessage {
    pub id: Uuid,
    pub scope: String,
    pub client_id: String,
    pub channel: PackageResponseChannel,
    pub payload: PackageResponsePayload,
    pub response_code: DomainResponseCode,
    pub captured_on: Option<DateTime<Utc>>,
    pub sent_on: Option<DateTime<Utc>>,
    pub received_on: Option<DateTime<Utc>>,
}

impl PackageResponseMessage {
    pub const TYPE_NAME: &'static str = "edgebroker.domain.PackageResponseMessage";

    pub fn new(channel: PackageResponseChannel, payload: PackageResponsePayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            scope: String::new(),
            client_id: String::new(),
            channel,
            payload,
            response_code: DomainResponseCode::default(),
            captured_on: None,
            sent_on: None,
            received_on: None,
        }
    }
}

impl Default for PackageResponseMessage {
    fn default() -> Self {
        Self::new(PackageResponseChannel::default(), PackageResponsePayload::default())
    }
}

impl DomainMessage for PackageResponseMessage {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn category(&self) -> MessageCategory {
        MessageCategory::App
    }
}

/// Canonical form of an unsolicited device message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainEventMessage {
    pub id: Uuid,
    pub category: MessageCategory,
    pub scope: String,
    pub client_id: String,
    pub captured_on: Option<DateTime<Utc>>,
    pub metrics: Metrics,
    pub body: Option<Vec<u8>>,
}

impl DomainEventMessage {
    /// Create an empty message of the given category.
    pub fn new(category: MessageCategory) -> Self {
        Self {
            id: Uuid::new_v4(),
            category,
            scope: String::new(),
            client_id: String::new(),
            captured_on: None,
            metrics: Metrics::new(),
            body: None,
        }
    }

    /// Type reference of the event message registered for a category.
    pub fn type_name_for(category: MessageCategory) -> &'static str {
        match category {
            MessageCategory::App => "edgebroker.domain.AppMessage",
            MessageCategory::Birth => "edgebroker.domain.BirthMessage",
            MessageCategory::Disconnect => "edgebroker.domain.DisconnectMessage",
            MessageCategory::Missing => "edgebroker.domain.MissingMessage",
            MessageCategory::Notify => "edgebroker.domain.NotifyMessage",
            MessageCategory::Data => "edgebroker.domain.DataMessage",
        }
    }
}

impl DomainMessage for DomainEventMessage {
    fn type_name(&self) -> &'static str {
        Self::type_name_for(self.category)
    }

    fn category(&self) -> MessageCategory {
        self.category
    }
}
