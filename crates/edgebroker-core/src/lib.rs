//! Shared model for the edge broker.
//!
//! ## Contents
//!
//! - **Categories**: the fixed set of symbolic message kinds ([`MessageCategory`])
//! - **Device messages**: messages as produced by field devices ([`device`])
//! - **Domain messages**: the broker's canonical representation ([`domain`])
//! - **Settings**: key/value settings and the typed views built from them ([`settings`])
//!
//! ## Example
//!
//! ```rust,no_run
//! use edgebroker_core::settings::{BrokerSettings, DeviceManagementSettings, Settings};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Settings::load(None)?;
//!     let broker = BrokerSettings::from_settings(&settings);
//!     let device = DeviceManagementSettings::from_settings(&settings);
//!     println!("{:?} {}", broker.configuration_uri, device.char_encoding);
//!     Ok(())
//! }
//! ```

pub mod category;
pub mod device;
pub mod domain;
pub mod error;
pub mod message;
pub mod settings;

pub use category::MessageCategory;
pub use device::{
    DeviceChannel, DeviceEventMessage, DevicePayload, DeviceResponseChannel, DeviceResponseCode,
    DeviceResponseMessage, DeviceResponsePayload,
};
pub use domain::{
    DomainEventMessage, DomainResponseCode, PackageOperationStatus, PackageResponseChannel,
    PackageResponseMessage, PackageResponsePayload,
};
pub use error::{Error, Result};
pub use message::{DeviceMessage, DomainMessage, MetricValue, Metrics};
pub use settings::{BrokerSettings, DeviceManagementSettings, Settings};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
