use std::collections::BTreeMap;

use super::{BundleBuild, sanitize_name};
use crate::collector::SourceItem;
use crate::common::path_normalizer::{file_name, parent};
use crate::config::PackageRule;

/// One bundle per directory below the rule root
///
/// The bundle is named `{rule}_{relative folder}`. Items directly inside
/// the root go to a group named after the root folder itself.
pub fn partition_by_folder(rule: &PackageRule, items: Vec<SourceItem>) -> Vec<BundleBuild> {
    let root = rule.logical_root();
    let root_group = file_name(&root).to_string();

    let mut groups: BTreeMap<String, Vec<SourceItem>> = BTreeMap::new();
    for item in items {
        let folder = parent(&item.path);
        let relative = folder
            .strip_prefix(root.as_str())
            .unwrap_or(folder)
            .trim_matches('/');

        let key = if relative.is_empty() {
            root_group.clone()
        } else {
            relative.to_string()
        };
        groups.entry(key).or_default().push(item);
    }

    groups
        .into_iter()
        .map(|(folder, items)| {
            let name = if folder.is_empty() {
                sanitize_name(&rule.name)
            } else {
                sanitize_name(&format!("{}_{folder}", rule.name))
            };
            BundleBuild::new(name, items)
        })
        .collect()
}
