//! Error types and handling for bundlekit
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`config`]: Build configuration errors
//! - [`build`]: Packaging pipeline errors
//! - [`manifest`]: Manifest read/write errors
//! - [`fs`]: File system errors

pub mod build;
pub mod config;
pub mod fs;
pub mod manifest;

pub use build::{BuildStage, build_failed, duplicate_bundle_name};
pub use config::{
    invalid as config_invalid, not_found as config_not_found, parse_failed as config_parse_failed,
};
pub use fs::{
    delete_failed as file_delete_failed, io_error, move_failed as file_move_failed,
    read_failed as file_read_failed, write_failed as file_write_failed,
};
pub use manifest::{bundle_not_found, item_not_found, parse_failed as manifest_parse_failed};

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for bundlekit operations
#[derive(Error, Diagnostic, Debug)]
pub enum BundleKitError {
    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(
        code(bundlekit::config::not_found),
        help("Create a bundlekit.yaml in the project root or pass --config")
    )]
    ConfigNotFound { path: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(bundlekit::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(bundlekit::config::invalid))]
    ConfigInvalid { message: String },

    // Build errors
    #[error("Build failed during {stage}: {reason}")]
    #[diagnostic(
        code(bundlekit::build::failed),
        help("The previous manifest and bundles in the output directory were left untouched")
    )]
    BuildFailed { stage: BuildStage, reason: String },

    #[error("Bundle name '{name}' produced twice (by '{first}' and '{second}')")]
    #[diagnostic(
        code(bundlekit::build::duplicate_bundle_name),
        help("Rename one of the files, or move it under a rule with a different strategy")
    )]
    DuplicateBundleName {
        name: String,
        first: String,
        second: String,
    },

    // Manifest errors
    #[error("Failed to parse manifest: {path}: {reason}")]
    #[diagnostic(
        code(bundlekit::manifest::parse_failed),
        help("Run 'bundlekit build' to regenerate the manifest")
    )]
    ManifestParseFailed { path: String, reason: String },

    #[error("Bundle '{name}' not found in manifest")]
    #[diagnostic(code(bundlekit::manifest::bundle_not_found))]
    BundleNotFound { name: String },

    #[error("No bundle contains item '{path}'")]
    #[diagnostic(
        code(bundlekit::manifest::item_not_found),
        help("Item paths are relative to the project root and case-sensitive")
    )]
    ItemNotFound { path: String },

    // CLI errors
    #[error("Invalid argument: {message}")]
    #[diagnostic(code(bundlekit::cli::invalid_argument))]
    InvalidArgument { message: String },

    // File system errors
    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(bundlekit::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(bundlekit::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("Failed to move file: {from} -> {to}: {reason}")]
    #[diagnostic(code(bundlekit::fs::move_failed))]
    FileMoveFailed {
        from: String,
        to: String,
        reason: String,
    },

    #[error("Failed to delete file: {path}: {reason}")]
    #[diagnostic(code(bundlekit::fs::delete_failed))]
    FileDeleteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(bundlekit::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for BundleKitError {
    fn from(err: std::io::Error) -> Self {
        BundleKitError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for BundleKitError {
    fn from(err: serde_yaml::Error) -> Self {
        BundleKitError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for BundleKitError {
    fn from(err: serde_json::Error) -> Self {
        BundleKitError::ManifestParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, BundleKitError>;
