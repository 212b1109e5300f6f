//! File system errors

use std::path::Path;

use super::BundleKitError;

/// Creates a file read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> BundleKitError {
    BundleKitError::FileReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a file write failed error
pub fn write_failed(path: impl Into<String>, reason: impl Into<String>) -> BundleKitError {
    BundleKitError::FileWriteFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a file move failed error
pub fn move_failed(
    from: impl Into<String>,
    to: impl Into<String>,
    reason: impl Into<String>,
) -> BundleKitError {
    BundleKitError::FileMoveFailed {
        from: from.into(),
        to: to.into(),
        reason: reason.into(),
    }
}

/// Creates a file delete failed error
pub fn delete_failed(path: impl Into<String>, reason: impl Into<String>) -> BundleKitError {
    BundleKitError::FileDeleteFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an IO error
pub fn io_error(message: impl Into<String>) -> BundleKitError {
    BundleKitError::IoError {
        message: message.into(),
    }
}

/// Maps an `io::Error` on `path` to a read failure
pub(crate) fn read_error(path: &Path) -> impl FnOnce(std::io::Error) -> BundleKitError + '_ {
    move |e| read_failed(path.display().to_string(), e.to_string())
}

/// Maps an `io::Error` on `path` to a write failure
pub(crate) fn write_error(path: &Path) -> impl FnOnce(std::io::Error) -> BundleKitError + '_ {
    move |e| write_failed(path.display().to_string(), e.to_string())
}
