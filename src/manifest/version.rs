//! version.json: a small descriptor clients fetch before the manifest

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::fs::write_atomic;
use crate::error::Result;
use crate::error::fs::read_error;
use crate::hash::digest_file;

/// Version file name in the output directory
pub const VERSION_FILE: &str = "version.json";

/// Contents of version.json
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct VersionInfo {
    pub version: String,
    /// BLAKE3 of the manifest.json bytes
    pub manifest_hash: String,
    /// Size of manifest.json in bytes
    pub manifest_size: u64,
    pub build_time: String,
    pub min_app_version: String,
    pub force_update: bool,
}

impl VersionInfo {
    /// Describe the manifest file at `manifest_path` from its own bytes
    pub fn for_manifest(
        manifest_path: &Path,
        version: &str,
        build_time: &str,
        min_app_version: &str,
        force_update: bool,
    ) -> Result<Self> {
        let digest = digest_file(manifest_path)?;
        Ok(Self {
            version: version.to_string(),
            manifest_hash: digest.hash,
            manifest_size: digest.size,
            build_time: build_time.to_string(),
            min_app_version: min_app_version.to_string(),
            force_update,
        })
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write version.json into `dir`
    pub fn write(&self, dir: &Path) -> Result<()> {
        write_atomic(&dir.join(VERSION_FILE), self.to_json()?.as_bytes())
    }

    /// Read version.json from `dir`
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(VERSION_FILE);
        let content = std::fs::read_to_string(&path).map_err(read_error(&path))?;
        serde_json::from_str(&content).map_err(|e| {
            crate::error::manifest_parse_failed(path.display().to_string(), e.to_string())
        })
    }
}
