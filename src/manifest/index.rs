//! Read-only index over a manifest
//!
//! Three maps are built in one pass when the index is constructed:
//!
//! ```text
//! bundle name -> bundle
//! tag         -> [bundle, ...]   (discovery order)
//! item path   -> bundle          (last writer wins)
//! ```
//!
//! The index never changes after construction. Share it between threads
//! with `Arc<ManifestIndex>`; readers need no locking.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use super::{BundleInfo, ManifestData};
use crate::error::{Result, bundle_not_found};

/// Manifest with name, tag and item lookups
#[derive(Debug, Clone)]
pub struct ManifestIndex {
    data: ManifestData,
    by_name: HashMap<String, usize>,
    by_tag: HashMap<String, Vec<usize>>,
    by_asset: HashMap<String, usize>,
}

impl From<ManifestData> for ManifestIndex {
    fn from(data: ManifestData) -> Self {
        Self::new(data)
    }
}

impl ManifestIndex {
    /// Take ownership of `data` and index it
    pub fn new(data: ManifestData) -> Self {
        let mut by_name = HashMap::with_capacity(data.bundles.len());
        let mut by_tag: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_asset = HashMap::new();

        for (i, bundle) in data.bundles.iter().enumerate() {
            by_name.insert(bundle.bundle_name.clone(), i);

            for tag in &bundle.tags {
                by_tag.entry(tag.clone()).or_default().push(i);
            }

            for asset in &bundle.assets {
                by_asset.insert(asset.clone(), i);
            }
        }

        Self {
            data,
            by_name,
            by_tag,
            by_asset,
        }
    }

    /// Parse manifest JSON and index it
    ///
    /// A parse failure returns an error; no partially filled index exists.
    pub fn from_json(json: &str) -> Result<Self> {
        ManifestData::from_json(json).map(Self::new)
    }

    /// Load and index manifest.json from `dir`
    pub fn load(dir: &Path) -> Result<Self> {
        ManifestData::load(dir).map(Self::new)
    }

    pub fn to_json(&self) -> Result<String> {
        self.data.to_json()
    }

    pub fn data(&self) -> &ManifestData {
        &self.data
    }

    /// Give back the data, e.g. to edit it and index again
    pub fn into_data(self) -> ManifestData {
        self.data
    }

    pub fn version(&self) -> &str {
        &self.data.version
    }

    pub fn platform(&self) -> &str {
        &self.data.platform
    }

    pub fn build_time(&self) -> &str {
        &self.data.build_time
    }

    /// All bundles in manifest order
    pub fn bundles(&self) -> &[BundleInfo] {
        &self.data.bundles
    }

    /// Look up a bundle by name
    pub fn bundle(&self, name: &str) -> Option<&BundleInfo> {
        self.by_name.get(name).map(|&i| &self.data.bundles[i])
    }

    /// Look up a bundle by name, failing with `BundleNotFound`
    pub fn require_bundle(&self, name: &str) -> Result<&BundleInfo> {
        self.bundle(name).ok_or_else(|| bundle_not_found(name))
    }

    /// Bundle holding the item at `item_path`
    pub fn bundle_by_asset(&self, item_path: &str) -> Option<&BundleInfo> {
        self.by_asset.get(item_path).map(|&i| &self.data.bundles[i])
    }

    /// Name of the bundle holding `item_path`
    pub fn bundle_name_by_asset(&self, item_path: &str) -> Option<&str> {
        self.bundle_by_asset(item_path)
            .map(|b| b.bundle_name.as_str())
    }

    pub fn contains_asset(&self, item_path: &str) -> bool {
        self.by_asset.contains_key(item_path)
    }

    /// Whether `item_path` is shipped as a pass-through raw file
    pub fn is_raw_file(&self, item_path: &str) -> bool {
        self.bundle_by_asset(item_path)
            .is_some_and(|b| b.is_raw_file)
    }

    /// Every indexed item path, sorted
    pub fn assets(&self) -> Vec<&str> {
        let mut assets: Vec<&str> = self.by_asset.keys().map(String::as_str).collect();
        assets.sort_unstable();
        assets
    }

    /// Bundles carrying `tag`, in manifest order
    pub fn bundles_by_tag(&self, tag: &str) -> Vec<&BundleInfo> {
        self.by_tag
            .get(tag)
            .map(|indices| indices.iter().map(|&i| &self.data.bundles[i]).collect())
            .unwrap_or_default()
    }

    /// Bundles carrying any of `tags` (union), each listed once
    pub fn bundles_by_tags<S: AsRef<str>>(&self, tags: &[S]) -> Vec<&BundleInfo> {
        let mut seen = HashSet::new();
        let mut result = Vec::new();

        for tag in tags {
            if let Some(indices) = self.by_tag.get(tag.as_ref()) {
                for &i in indices {
                    if seen.insert(i) {
                        result.push(&self.data.bundles[i]);
                    }
                }
            }
        }

        result
    }

    /// Transitive dependencies of bundle `name`, depth-first
    ///
    /// The starting bundle is never part of the result, even when a cycle
    /// leads back to it. Names without a bundle in this manifest are skipped.
    pub fn all_dependencies(&self, name: &str) -> Vec<&BundleInfo> {
        let mut visited = HashSet::new();
        let mut result = Vec::new();

        if let Some(&start) = self.by_name.get(name) {
            visited.insert(start);
            self.collect_dependencies(start, &mut visited, &mut result);
        }

        result
    }

    fn collect_dependencies<'a>(
        &'a self,
        index: usize,
        visited: &mut HashSet<usize>,
        result: &mut Vec<&'a BundleInfo>,
    ) {
        for dep in &self.data.bundles[index].dependencies {
            let Some(&dep_index) = self.by_name.get(dep) else {
                continue;
            };
            if !visited.insert(dep_index) {
                continue;
            }
            result.push(&self.data.bundles[dep_index]);
            self.collect_dependencies(dep_index, visited, result);
        }
    }

    /// Bundles needed to obtain `item_path`: its dependency closure, then
    /// the owning bundle itself
    ///
    /// This is a set; it is not a load order.
    pub fn required_bundles(&self, item_path: &str) -> Vec<&BundleInfo> {
        let Some(owner) = self.bundle_by_asset(item_path) else {
            return Vec::new();
        };

        let mut bundles = self.all_dependencies(&owner.bundle_name);
        bundles.push(owner);
        bundles
    }

    /// Total number of items across all bundles
    pub fn asset_count(&self) -> usize {
        self.data.bundles.iter().map(|b| b.assets.len()).sum()
    }

    /// Total size of all bundles in bytes
    pub fn total_size(&self) -> u64 {
        self.data.bundles.iter().map(|b| b.size).sum()
    }

    /// Total size of the bundles carrying `tag`
    pub fn size_by_tag(&self, tag: &str) -> u64 {
        self.bundles_by_tag(tag).iter().map(|b| b.size).sum()
    }

    /// Every tag in the manifest, sorted
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.by_tag.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }
}
