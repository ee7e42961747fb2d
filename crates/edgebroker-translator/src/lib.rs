//! Device response translation for the edge broker.
//!
//! Converts device-native application responses into the broker's canonical
//! domain messages. The package application translator is the one shipped
//! here; other applications follow the same [`Translator`] shape.
//!
//! ## Modules
//!
//! - [`response`]: channel validation and payload mapping ([`PackageResponseTranslator`])
//! - [`status`]: download status normalization ([`StatusMapper`])
//! - [`packages`]: native and canonical package trees ([`PackageStructureTranslator`])
//! - [`xml`]: package list documents
//! - [`charset`]: strict body decoding and encoding
//!
//! ## Example
//!
//! ```rust,no_run
//! use edgebroker_core::{
//!     DeviceManagementSettings, DeviceResponseChannel, DeviceResponseCode, DeviceResponseMessage,
//!     DeviceResponsePayload,
//! };
//! use edgebroker_translator::{PackageResponseTranslator, Translator};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let translator = PackageResponseTranslator::new(DeviceManagementSettings::default());
//!
//!     let channel = DeviceResponseChannel {
//!         app_id: "DEPLOY".to_string(),
//!         app_version: "V2".to_string(),
//!         ..Default::default()
//!     };
//!     let payload = DeviceResponsePayload::new(DeviceResponseCode::Accepted).with_metric("job.id", 42);
//!
//!     let message = translator.translate(&DeviceResponseMessage::new(channel, payload))?;
//!     println!("{:?}", message.payload.operation_id);
//!     Ok(())
//! }
//! ```

pub mod charset;
pub mod error;
pub mod packages;
pub mod response;
pub mod status;
pub mod xml;

pub use charset::Charset;
pub use error::{ChannelError, Error, MetricError, PayloadError, Result};
pub use packages::{
    BundleInfo, BundleInfos, DeploymentPackage, DeploymentPackages, NativeBundle, NativeBundles,
    NativePackage, NativePackageList, PackageStructureTranslator,
};
pub use response::{metrics, PackageResponseTranslator, Translator, APP_ID, APP_VERSION};
pub use status::StatusMapper;
