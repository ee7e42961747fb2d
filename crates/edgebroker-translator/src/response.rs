//! Package application response translation.
//!
//! Turns the device-native response of the deployment application
//! (`DEPLOY`/`V2`) into the canonical [`PackageResponseMessage`].
//!
//! ## Payload mapping
//!
//! | device metric | canonical field |
//! |---|---|
//! | `job.id` | `operation_id` |
//! | `dp.download.status` | `operation_status` (via [`StatusMapper`]) |
//! | `dp.download.size` | `operation_size` |
//! | `dp.download.progress` | `operation_progress` |
//!
//! A response without `job.id` reports `operation_status = NONE`. A body is
//! decoded with the configured charset, parsed as a native package list and
//! re-encoded as a canonical one. `INTERNAL_ERROR` responses only carry the
//! body text as the error message.

use edgebroker_core::{
    DeviceManagementSettings, DeviceResponseChannel, DeviceResponseCode, DeviceResponseMessage,
    DeviceResponsePayload, MetricValue, PackageOperationStatus, PackageResponseChannel,
    PackageResponseMessage, PackageResponsePayload,
};
use num_bigint::BigInt;

use crate::charset::Charset;
use crate::error::{ChannelError, Error, MetricError, PayloadError, Result};
use crate::packages::PackageStructureTranslator;
use crate::status::StatusMapper;
use crate::xml;

/// Device application id of the deployment application.
pub const APP_ID: &str = "DEPLOY";
/// Device application version of the deployment application.
pub const APP_VERSION: &str = "V2";

/// Device metric names of the deployment application.
pub mod metrics {
    pub const OPERATION_ID: &str = "job.id";
    pub const DOWNLOAD_STATUS: &str = "dp.download.status";
    pub const DOWNLOAD_SIZE: &str = "dp.download.size";
    pub const DOWNLOAD_PROGRESS: &str = "dp.download.progress";
}

/// Converts one message type into another.
pub trait Translator<In, Out> {
    fn translate(&self, message: In) -> Result<Out>;
}

/// Translator for package application responses.
#[derive(Debug, Clone)]
pub struct PackageResponseTranslator {
    settings: DeviceManagementSettings,
    packages: PackageStructureTranslator,
}

impl PackageResponseTranslator {
    pub fn new(settings: DeviceManagementSettings) -> Self {
        Self {
            settings,
            packages: PackageStructureTranslator,
        }
    }

    /// Check the device channel and build the fixed package channel.
    pub fn translate_channel(&self, channel: &DeviceResponseChannel) -> Result<PackageResponseChannel> {
        validate_channel(channel).map_err(|source| Error::InvalidChannel {
            channel: Box::new(channel.clone()),
            source,
        })?;
        Ok(PackageResponseChannel::default())
    }

    /// Map a device payload to the package payload.
    pub fn translate_payload(&self, payload: &DeviceResponsePayload) -> Result<PackageResponsePayload> {
        if payload.response_code == DeviceResponseCode::InternalError {
            return Ok(PackageResponsePayload {
                error_message: payload
                    .body
                    .as_deref()
                    .filter(|_| payload.has_body())
                    .map(|body| String::from_utf8_lossy(body).into_owned()),
                ..Default::default()
            });
        }

        let mut translated = self.translate_metrics(payload).map_err(|source| {
            PayloadError::Invalid {
                payload: Box::new(payload.clone()),
                source,
            }
        })?;

        let status = payload
            .metric(metrics::DOWNLOAD_STATUS)
            .filter(|_| translated.operation_id.is_some());
        if let Some(token) = status {
            let token = token.as_str().ok_or_else(|| PayloadError::Invalid {
                payload: Box::new(payload.clone()),
                source: wrong_type(metrics::DOWNLOAD_STATUS, "string", token),
            })?;
            translated.operation_status = Some(StatusMapper::map(token)?);
        }

        if let Some(body) = payload.body.as_deref().filter(|_| payload.has_body()) {
            translated.body = self.translate_body(body)?;
        }

        Ok(translated)
    }

    fn translate_metrics(
        &self,
        payload: &DeviceResponsePayload,
    ) -> std::result::Result<PackageResponsePayload, MetricError> {
        let mut translated = PackageResponsePayload::default();

        match payload.metric(metrics::OPERATION_ID) {
            Some(value) => translated.operation_id = Some(parse_operation_id(value)?),
            None => translated.operation_status = Some(PackageOperationStatus::None),
        }
        translated.operation_size = integer_metric(payload, metrics::DOWNLOAD_SIZE)?;
        translated.operation_progress = integer_metric(payload, metrics::DOWNLOAD_PROGRESS)?;

        Ok(translated)
    }

    fn translate_body(&self, body: &[u8]) -> std::result::Result<Option<Vec<u8>>, PayloadError> {
        let label = self.settings.char_encoding.as_str();
        let charset = Charset::for_label(label).ok_or_else(|| PayloadError::UnsupportedCharset {
            charset: label.to_string(),
            body: body.to_vec(),
        })?;

        let document = charset.decode(body).ok_or_else(|| PayloadError::MalformedBody {
            charset: label.to_string(),
            body: body.to_vec(),
        })?;

        let native = xml::parse_native(&document)?;
        let Some(packages) = self.packages.translate(Some(&native)) else {
            tracing::debug!("Package list is empty, no body");
            return Ok(None);
        };

        tracing::debug!("Translated {} package(s)", packages.packages.len());
        xml::write_canonical(&packages, &charset).map(Some)
    }
}

impl<'a> Translator<&'a DeviceResponseMessage, PackageResponseMessage> for PackageResponseTranslator {
    fn translate(&self, message: &'a DeviceResponseMessage) -> Result<PackageResponseMessage> {
        let channel = self.translate_channel(&message.channel)?;
        let payload = self.translate_payload(&message.payload)?;

        let mut translated = PackageResponseMessage::new(channel, payload);
        translated.scope = message.channel.scope.clone();
        translated.client_id = message.channel.client_id.clone();
        translated.response_code = message.payload.response_code.into();
        translated.captured_on = message.payload.timestamp;
        translated.sent_on = message.payload.timestamp;
        translated.received_on = Some(message.received_on);

        tracing::debug!(
            "Translated {} response from {} into {}",
            message.payload.response_code,
            message.channel.client_id,
            translated.id
        );
        Ok(translated)
    }
}

fn validate_channel(channel: &DeviceResponseChannel) -> std::result::Result<(), ChannelError> {
    if channel.app_id != APP_ID {
        return Err(ChannelError::AppId {
            expected: APP_ID,
            found: channel.app_id.clone(),
        });
    }
    if channel.app_version != APP_VERSION {
        return Err(ChannelError::AppVersion {
            expected: APP_VERSION,
            found: channel.app_version.clone(),
        });
    }
    Ok(())
}

fn parse_operation_id(value: &MetricValue) -> std::result::Result<BigInt, MetricError> {
    let text = value.to_string();
    text.trim()
        .parse::<BigInt>()
        .map_err(|source| MetricError::InvalidOperationId {
            metric: metrics::OPERATION_ID,
            value: text.clone(),
            source,
        })
}

fn integer_metric(
    payload: &DeviceResponsePayload,
    metric: &'static str,
) -> std::result::Result<Option<i32>, MetricError> {
    payload
        .metric(metric)
        .map(|value| value.as_i32().ok_or_else(|| wrong_type(metric, "integer", value)))
        .transpose()
}

fn wrong_type(metric: &'static str, expected: &'static str, value: &MetricValue) -> MetricError {
    MetricError::WrongType {
        metric,
        expected,
        found: value.type_name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translator() -> PackageResponseTranslator {
        PackageResponseTranslator::new(DeviceManagementSettings::default())
    }

    fn channel(app_id: &str, app_version: &str) -> DeviceResponseChannel {
        DeviceResponseChannel {
            app_id: app_id.to_string(),
            app_version: app_version.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_channel_constants() {
        let translated = translator().translate_channel(&channel("DEPLOY", "V2")).unwrap();
        assert_eq!(translated.app_name, "PACKAGE");
        assert_eq!(translated.app_version, "1.0");
    }

    #[test]
    fn test_channel_is_case_sensitive() {
        let err = translator().translate_channel(&channel("deploy", "V2")).unwrap_err();
        match err {
            Error::InvalidChannel { channel, source } => {
                assert_eq!(channel.app_id, "deploy");
                assert!(matches!(source, ChannelError::AppId { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = translator().translate_channel(&channel("DEPLOY", "V1")).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidChannel {
                source: ChannelError::AppVersion { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_operation_id_from_long() {
        let payload = DeviceResponsePayload::new(DeviceResponseCode::Accepted)
            .with_metric(metrics::OPERATION_ID, 9_007_199_254_740_993_i64);
        let translated = translator().translate_payload(&payload).unwrap();
        assert_eq!(translated.operation_id, Some(BigInt::from(9_007_199_254_740_993_i64)));
        assert_eq!(translated.operation_status, None);
    }

    #[test]
    fn test_status_ignored_without_operation_id() {
        let payload = DeviceResponsePayload::new(DeviceResponseCode::Accepted)
            .with_metric(metrics::DOWNLOAD_STATUS, "BOGUS");
        let translated = translator().translate_payload(&payload).unwrap();
        assert_eq!(translated.operation_status, Some(PackageOperationStatus::None));
    }

    #[test]
    fn test_invalid_operation_id() {
        let payload = DeviceResponsePayload::new(DeviceResponseCode::Accepted)
            .with_metric(metrics::OPERATION_ID, "not-a-number");
        let err = translator().translate_payload(&payload).unwrap_err();
        match err {
            Error::InvalidPayload(PayloadError::Invalid { payload: original, source }) => {
                assert_eq!(*original, payload);
                assert!(matches!(source, MetricError::InvalidOperationId { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_size_must_be_integer() {
        let payload = DeviceResponsePayload::new(DeviceResponseCode::Accepted)
            .with_metric(metrics::DOWNLOAD_SIZE, "1024");
        let err = translator().translate_payload(&payload).unwrap_err();
        assert!(err.to_string().contains("dp.download.size"));
    }

    #[test]
    fn test_status_must_be_string() {
        let payload = DeviceResponsePayload::new(DeviceResponseCode::Accepted)
            .with_metric(metrics::OPERATION_ID, 1)
            .with_metric(metrics::DOWNLOAD_STATUS, 3);
        let err = translator().translate_payload(&payload).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidPayload(PayloadError::Invalid {
                source: MetricError::WrongType { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_internal_error_without_body() {
        let payload = DeviceResponsePayload::new(DeviceResponseCode::InternalError)
            .with_metric(metrics::OPERATION_ID, 5);
        let translated = translator().translate_payload(&payload).unwrap();
        assert_eq!(translated, PackageResponsePayload::default());
    }
}
