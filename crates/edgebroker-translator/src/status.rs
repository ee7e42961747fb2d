//! Download status normalization.

use edgebroker_core::PackageOperationStatus;

use crate::error::PayloadError;

/// Maps device download status tokens to [`PackageOperationStatus`].
///
/// | token | status |
/// |---|---|
/// | `IN_PROGRESS` | `IN_PROGRESS` |
/// | `FAILED` | `FAILED` |
/// | `COMPLETED`, `ALREADY DONE` | `COMPLETED` |
///
/// Tokens are matched exactly; anything else is rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusMapper;

impl StatusMapper {
    pub fn map(token: &str) -> Result<PackageOperationStatus, PayloadError> {
        match token {
            "IN_PROGRESS" => Ok(PackageOperationStatus::InProgress),
            "FAILED" => Ok(PackageOperationStatus::Failed),
            "COMPLETED" | "ALREADY DONE" => Ok(PackageOperationStatus::Completed),
            other => Err(PayloadError::UnknownStatusToken(other.to_string())),
        }
    }
}
