//! `BundleInfo`: the persisted record of one archive or raw file

use serde::{Deserialize, Serialize};

use crate::common::path_normalizer::extension;

/// Extension of archive files in the output directory
pub const BUNDLE_EXTENSION: &str = "bundle";

/// One entry of manifest.json
///
/// Field names are serialized verbatim (`BundleName`, `Hash`, `CRC`, ...).
/// `assets` always holds the original logical item paths fed to the
/// archive builder, with their original casing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BundleInfo {
    /// Bundle name
    pub bundle_name: String,

    /// Content hash (BLAKE3 hex)
    pub hash: String,

    /// CRC-32 of the file on disk
    #[serde(rename = "CRC")]
    pub crc: u32,

    /// File size in bytes
    pub size: u64,

    /// Passed through without archiving
    pub is_raw_file: bool,

    /// Encrypted on disk
    pub is_encrypted: bool,

    /// Tags, without duplicates
    pub tags: Vec<String>,

    /// Names of bundles this bundle directly depends on
    pub dependencies: Vec<String>,

    /// Logical item paths contained in this bundle
    pub assets: Vec<String>,

    /// Priority, 0-10
    pub priority: u8,
}

impl BundleInfo {
    /// Content-addressed file name: `{BundleName}_{Hash}.{ext}`
    ///
    /// Archives use [`BUNDLE_EXTENSION`]; raw files keep the extension of
    /// the file they pass through.
    pub fn file_name(&self) -> String {
        let ext = if self.is_raw_file {
            self.assets.first().and_then(|a| extension(a))
        } else {
            Some(BUNDLE_EXTENSION)
        };

        match ext {
            Some(ext) => format!("{}_{}.{}", self.bundle_name, self.hash, ext),
            None => format!("{}_{}", self.bundle_name, self.hash),
        }
    }

    /// Add tags not already present, keeping first-seen order
    pub fn add_tags<'a, I>(&mut self, tags: I)
    where
        I: IntoIterator<Item = &'a String>,
    {
        for tag in tags {
            if !self.tags.contains(tag) {
                self.tags.push(tag.clone());
            }
        }
    }

    /// Whether the bundle carries `tag`
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
