//! Manifest errors

use super::BundleKitError;

/// Creates a manifest parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> BundleKitError {
    BundleKitError::ManifestParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a bundle not found error
pub fn bundle_not_found(name: impl Into<String>) -> BundleKitError {
    BundleKitError::BundleNotFound { name: name.into() }
}

/// Creates an item not found error
pub fn item_not_found(path: impl Into<String>) -> BundleKitError {
    BundleKitError::ItemNotFound { path: path.into() }
}
