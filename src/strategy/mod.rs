//! Partitioning strategies
//!
//! Each strategy turns the items one rule collected into named groups
//! ([`BundleBuild`]). Names depend only on the rule and the item paths, so
//! an unchanged source tree always partitions the same way.

mod by_file;
mod by_folder;
mod by_size;
mod by_top_folder;
mod raw;

use std::collections::HashMap;

use crate::collector::SourceItem;
use crate::config::{PackageRule, PackageStrategy};
use crate::error::{Result, duplicate_bundle_name};

pub use by_file::partition_by_file;
pub use by_folder::partition_by_folder;
pub use by_size::partition_by_size;
pub use by_top_folder::partition_by_top_folder;
pub use raw::{RAW_PREFIX, partition_raw};

/// A bundle before archiving: its name and the items assigned to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleBuild {
    pub name: String,
    pub items: Vec<SourceItem>,
}

impl BundleBuild {
    pub fn new(name: impl Into<String>, items: Vec<SourceItem>) -> Self {
        Self {
            name: name.into(),
            items,
        }
    }

    /// Logical paths of the items, in order
    pub fn item_paths(&self) -> Vec<String> {
        self.items.iter().map(|item| item.path.clone()).collect()
    }

    /// Sum of item sizes in bytes
    pub fn total_size(&self) -> u64 {
        self.items.iter().map(|item| item.size).sum()
    }
}

/// Partition `items` with the strategy `rule` selects
pub fn partition(rule: &PackageRule, items: Vec<SourceItem>) -> Vec<BundleBuild> {
    if items.is_empty() {
        return Vec::new();
    }

    match rule.strategy {
        PackageStrategy::ByFolder => partition_by_folder(rule, items),
        PackageStrategy::ByFile => partition_by_file(rule, items),
        PackageStrategy::BySize => partition_by_size(rule, items),
        PackageStrategy::ByTopFolder => partition_by_top_folder(rule, items),
        PackageStrategy::RawFile => partition_raw(items),
    }
}

/// Lower-case a bundle name and replace separators with `_`
pub(crate) fn sanitize_name(name: &str) -> String {
    name.to_lowercase().replace(['/', '\\', ' '], "_")
}

/// Fail if two builds share a name
///
/// The error names the first item of each conflicting build.
pub fn ensure_unique_names<'a, I>(builds: I) -> Result<()>
where
    I: IntoIterator<Item = &'a BundleBuild>,
{
    let mut seen: HashMap<&str, &BundleBuild> = HashMap::new();

    for build in builds {
        if let Some(first) = seen.insert(build.name.as_str(), build) {
            return Err(duplicate_bundle_name(
                &build.name,
                first_item(first),
                first_item(build),
            ));
        }
    }

    Ok(())
}

fn first_item(build: &BundleBuild) -> &str {
    build.items.first().map_or("", |item| item.path.as_str())
}
