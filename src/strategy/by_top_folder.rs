use super::{BundleBuild, sanitize_name};
use crate::collector::SourceItem;
use crate::common::path_normalizer::file_name;
use crate::config::PackageRule;

/// Everything the rule collected in one bundle, named `{rule}_{root folder}`
pub fn partition_by_top_folder(rule: &PackageRule, items: Vec<SourceItem>) -> Vec<BundleBuild> {
    let root = rule.logical_root();
    let name = sanitize_name(&format!("{}_{}", rule.name, file_name(&root)));
    vec![BundleBuild::new(name, items)]
}
