//! Packaging pipeline errors

use std::fmt;

use super::BundleKitError;

/// Pipeline stage at which a build failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStage {
    Collect,
    Archive,
    Manifest,
    Version,
    Reconcile,
    Report,
    Export,
}

impl fmt::Display for BuildStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuildStage::Collect => "collect",
            BuildStage::Archive => "archive",
            BuildStage::Manifest => "manifest",
            BuildStage::Version => "version",
            BuildStage::Reconcile => "reconcile",
            BuildStage::Report => "report",
            BuildStage::Export => "export",
        };
        f.write_str(name)
    }
}

/// Creates a build failed error
pub fn build_failed(stage: BuildStage, reason: impl Into<String>) -> BundleKitError {
    BundleKitError::BuildFailed {
        stage,
        reason: reason.into(),
    }
}

/// Creates a duplicate bundle name error
pub fn duplicate_bundle_name(
    name: impl Into<String>,
    first: impl Into<String>,
    second: impl Into<String>,
) -> BundleKitError {
    BundleKitError::DuplicateBundleName {
        name: name.into(),
        first: first.into(),
        second: second.into(),
    }
}
