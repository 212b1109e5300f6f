//! Manifest data (manifest.json) and the runtime index built over it
//!
//! The manifest is split in two phases:
//!
//! ```text
//! ManifestData  --ManifestIndex::new-->  ManifestIndex
//!  (serialized)                           (name / tag / item maps, read-only)
//! ```
//!
//! `ManifestData` is exactly what is written to disk. `ManifestIndex` owns a
//! `ManifestData` and is indexed on construction, so a query can never run
//! against an unindexed manifest. To change the bundle list, take the data
//! back with [`ManifestIndex::into_data`], edit it, and build a new index.

pub mod bundle;
pub mod index;
pub mod version;

use std::path::Path;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::common::fs::write_atomic;
use crate::error::{Result, manifest_parse_failed};
use crate::error::fs::read_error;

pub use bundle::{BUNDLE_EXTENSION, BundleInfo};
pub use index::ManifestIndex;
pub use version::{VERSION_FILE, VersionInfo};

/// Manifest file name in the output directory
pub const MANIFEST_FILE: &str = "manifest.json";

/// Format of `BuildTime` in manifest.json and version.json
pub const BUILD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time in [`BUILD_TIME_FORMAT`]
pub fn build_timestamp() -> String {
    Local::now().format(BUILD_TIME_FORMAT).to_string()
}

/// Contents of manifest.json
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ManifestData {
    pub version: String,
    pub build_time: String,
    pub platform: String,
    pub bundles: Vec<BundleInfo>,
}

impl ManifestData {
    pub fn new(
        version: impl Into<String>,
        build_time: impl Into<String>,
        platform: impl Into<String>,
    ) -> Self {
        Self {
            version: version.into(),
            build_time: build_time.into(),
            platform: platform.into(),
            bundles: Vec::new(),
        }
    }

    /// Parse manifest JSON; fields not listed here are ignored
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read manifest.json from `dir`
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(MANIFEST_FILE);
        let content = std::fs::read_to_string(&path).map_err(read_error(&path))?;
        serde_json::from_str(&content)
            .map_err(|e| manifest_parse_failed(path.display().to_string(), e.to_string()))
    }

    /// Write manifest.json into `dir`, replacing any previous one atomically
    pub fn write(&self, dir: &Path) -> Result<()> {
        write_atomic(&dir.join(MANIFEST_FILE), self.to_json()?.as_bytes())
    }
}
