//! Package list documents.

use quick_xml::{de, se};

use crate::charset::Charset;
use crate::error::PayloadError;
use crate::packages::{DeploymentPackages, NativePackageList};

/// Parse a native package list document.
pub fn parse_native(document: &str) -> Result<NativePackageList, PayloadError> {
    de::from_str(document).map_err(|e| PayloadError::PackageList {
        document: document.to_string(),
        reason: e.to_string(),
    })
}

/// Parse a canonical package list document.
pub fn parse_canonical(document: &str) -> Result<DeploymentPackages, de::DeError> {
    de::from_str(document)
}

/// Render a canonical package list as text, with an XML declaration naming
/// the charset label.
pub fn render_canonical(packages: &DeploymentPackages, charset: &Charset<'_>) -> Result<String, PayloadError> {
    let body = se::to_string(packages).map_err(|e| PayloadError::PackageEncode {
        packages: Box::new(packages.clone()),
        reason: e.to_string(),
    })?;
    Ok(format!(
        "<?xml version=\"1.0\" encoding=\"{}\"?>{}",
        charset.label(),
        body
    ))
}

/// Render a canonical package list and encode it with `charset`.
pub fn write_canonical(packages: &DeploymentPackages, charset: &Charset<'_>) -> Result<Vec<u8>, PayloadError> {
    let document = render_canonical(packages, charset)?;
    charset.encode(&document).ok_or_else(|| PayloadError::PackageEncode {
        packages: Box::new(packages.clone()),
        reason: format!("document is not representable in {}", charset.label()),
    })
}
