use super::{BundleBuild, sanitize_name};
use crate::collector::SourceItem;
use crate::common::path_normalizer::file_stem;
use crate::config::PackageRule;

/// One bundle per item, named `{rule}_{file stem}`
///
/// Two items with the same stem produce the same name; the caller rejects
/// that with a duplicate-name error.
pub fn partition_by_file(rule: &PackageRule, items: Vec<SourceItem>) -> Vec<BundleBuild> {
    items
        .into_iter()
        .map(|item| {
            let name = sanitize_name(&format!("{}_{}", rule.name, file_stem(&item.path)));
            BundleBuild::new(name, vec![item])
        })
        .collect()
}
