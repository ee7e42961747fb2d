//! Deployment package lists.
//!
//! Devices report installed packages as a native document:
//!
//! ```xml
//! <packages>
//!   <package>
//!     <name>org.example.app</name>
//!     <version>1.0.0</version>
//!     <bundles>
//!       <bundle><name>org.example.app.core</name><version>1.0.0</version></bundle>
//!     </bundles>
//!   </package>
//! </packages>
//! ```
//!
//! The broker republishes the same content as a canonical document rooted at
//! `<devicePackages>` with `<devicePackage>`, `<bundleInfos>` and `<bundleInfo>`
//! elements. Both trees are plain data built per translation.
//!
//! Names and versions are read with surrounding whitespace trimmed, so
//! `<name>  a &amp; b  </name>` becomes `a & b`. Entities are unescaped and
//! empty elements read as empty strings.

use serde::{Deserialize, Serialize};

/// Native package list as sent by the device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "packages")]
pub struct NativePackageList {
    #[serde(rename = "package", default)]
    pub packages: Vec<NativePackage>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativePackage {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub bundles: NativeBundles,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeBundles {
    #[serde(rename = "bundle", default)]
    pub bundles: Vec<NativeBundle>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeBundle {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
}

/// Canonical package list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "devicePackages")]
pub struct DeploymentPackages {
    #[serde(rename = "devicePackage", default)]
    pub packages: Vec<DeploymentPackage>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentPackage {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(rename = "bundleInfos", default)]
    pub bundle_infos: BundleInfos,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleInfos {
    #[serde(rename = "bundleInfo", default)]
    pub bundles: Vec<BundleInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
}

impl DeploymentPackage {
    /// Bundles of this package, in device order.
    pub fn bundles(&self) -> &[BundleInfo] {
        &self.bundle_infos.bundles
    }
}

/// Copies a native package list into the canonical tree.
///
/// Order and cardinality are kept as reported: nothing is sorted, merged or
/// filtered.
#[derive(Debug, Clone, Copy, Default)]
pub struct PackageStructureTranslator;

impl PackageStructureTranslator {
    /// Translate a native list; an absent or empty list has no canonical form.
    pub fn translate(&self, native: Option<&NativePackageList>) -> Option<DeploymentPackages> {
        let native = native.filter(|list| !list.packages.is_empty())?;

        let packages = native
            .packages
            .iter()
            .map(|package| DeploymentPackage {
                name: package.name.clone(),
                version: package.version.clone(),
                bundle_infos: BundleInfos {
                    bundles: package
                        .bundles
                        .bundles
                        .iter()
                        .map(|bundle| BundleInfo {
                            name: bundle.name.clone(),
                            version: bundle.version.clone(),
                        })
                        .collect(),
                },
            })
            .collect();

        Some(DeploymentPackages { packages })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn native_package(name: &str, bundles: &[&str]) -> NativePackage {
        NativePackage {
            name: name.to_string(),
            version: "1.0.0".to_string(),
            bundles: NativeBundles {
                bundles: bundles
                    .iter()
                    .map(|b| NativeBundle {
                        name: b.to_string(),
                        version: "2.0".to_string(),
                    })
                    .collect(),
            },
        }
    }

    #[test]
    fn test_translate_keeps_order() {
        let native = NativePackageList {
            packages: vec![
                native_package("zeta", &["c", "a", "b"]),
                native_package("alpha", &[]),
                native_package("zeta", &["a"]),
            ],
        };

        let canonical = PackageStructureTranslator.translate(Some(&native)).unwrap();
        let names: Vec<_> = canonical.packages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "zeta"]);

        let bundles: Vec<_> = canonical.packages[0]
            .bundles()
            .iter()
            .map(|b| b.name.as_str())
            .collect();
        assert_eq!(bundles, vec!["c", "a", "b"]);
        assert!(canonical.packages[1].bundles().is_empty());
        assert_eq!(canonical.packages[2].bundles()[0].version, "2.0");
    }

    #[test]
    fn test_absent_or_empty_list() {
        assert!(PackageStructureTranslator.translate(None).is_none());
        assert!(PackageStructureTranslator
            .translate(Some(&NativePackageList::default()))
            .is_none());
    }
}
