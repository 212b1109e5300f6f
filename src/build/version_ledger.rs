//! Build numbers for `version_mode: auto_increment`
//!
//! The ledger maps `{output_path}|{platform}` to the last build number
//! handed out and lives next to bundlekit.yaml:
//!
//! ```json
//! {
//!   "bundles|Android": 4,
//!   "bundles|Linux": 12
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::common::fs::write_atomic;
use crate::error::Result;
use crate::error::fs::read_error;

/// Ledger file name in the project root
pub const LEDGER_FILE: &str = "bundlekit.versions.json";

/// Last build number per output path and platform
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionLedger {
    path: PathBuf,
    entries: BTreeMap<String, u64>,
}

impl VersionLedger {
    /// Load the ledger of `project_root`
    ///
    /// A missing file is an empty ledger. An unreadable one is logged and
    /// started over.
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = project_root.join(LEDGER_FILE);
        if !path.is_file() {
            return Ok(Self {
                path,
                entries: BTreeMap::new(),
            });
        }

        let content = std::fs::read_to_string(&path).map_err(read_error(&path))?;
        let entries = if content.trim().is_empty() {
            BTreeMap::new()
        } else {
            serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "build number ledger is corrupt, starting over");
                BTreeMap::new()
            })
        };

        Ok(Self { path, entries })
    }

    /// Last number handed out for `key`, 0 if none
    pub fn current(&self, key: &str) -> u64 {
        self.entries.get(key).copied().unwrap_or(0)
    }

    /// Hand out the next number for `key` and persist the ledger
    pub fn allocate(&mut self, key: &str) -> Result<u64> {
        let next = self.current(key) + 1;
        self.entries.insert(key.to_string(), next);
        write_atomic(&self.path, serde_json::to_string_pretty(&self.entries)?.as_bytes())?;
        tracing::debug!(key, build = next, "allocated build number");
        Ok(next)
    }
}

/// Ledger key for an output path and platform
pub fn ledger_key(output_path: &str, platform: &str) -> String {
    format!("{output_path}|{platform}")
}

/// Next build number for `output_path` and `platform` under `project_root`
pub fn allocate_build_number(project_root: &Path, output_path: &str, platform: &str) -> Result<u64> {
    VersionLedger::load(project_root)?.allocate(&ledger_key(output_path, platform))
}
