//! Configuration errors

use super::BundleKitError;

/// Creates a configuration not found error
pub fn not_found(path: impl Into<String>) -> BundleKitError {
    BundleKitError::ConfigNotFound { path: path.into() }
}

/// Creates a configuration parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> BundleKitError {
    BundleKitError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid configuration error
pub fn invalid(message: impl Into<String>) -> BundleKitError {
    BundleKitError::ConfigInvalid {
        message: message.into(),
    }
}
