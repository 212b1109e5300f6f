use super::{BundleBuild, sanitize_name};
use crate::collector::SourceItem;
use crate::config::PackageRule;

/// Greedy descending bin-packing bounded by `rule.max_bundle_size`
///
/// Items are sorted by size, largest first (stable, so equal sizes keep
/// walk order). A bin is closed when the next item would push it over the
/// cap. An item larger than the cap on its own gets a bin to itself.
/// Bins are named `{rule}_{index}` from 0.
pub fn partition_by_size(rule: &PackageRule, mut items: Vec<SourceItem>) -> Vec<BundleBuild> {
    items.sort_by(|a, b| b.size.cmp(&a.size));

    let prefix = sanitize_name(&rule.name);
    let cap = rule.max_bundle_size;

    let mut builds = Vec::new();
    let mut bin: Vec<SourceItem> = Vec::new();
    let mut bin_size = 0u64;

    for item in items {
        if !bin.is_empty() && bin_size.saturating_add(item.size) > cap {
            let name = format!("{prefix}_{}", builds.len());
            builds.push(BundleBuild::new(name, std::mem::take(&mut bin)));
            bin_size = 0;
        }
        bin_size = bin_size.saturating_add(item.size);
        bin.push(item);
    }

    if !bin.is_empty() {
        let name = format!("{prefix}_{}", builds.len());
        builds.push(BundleBuild::new(name, bin));
    }

    builds
}
