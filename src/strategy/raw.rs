use super::{BundleBuild, sanitize_name};
use crate::collector::SourceItem;
use crate::common::path_normalizer::file_stem;

/// Name prefix of pass-through entries
pub const RAW_PREFIX: &str = "raw_";

/// One pass-through entry per item, named `raw_{file stem}`
///
/// These are copied to the output as-is rather than archived.
pub fn partition_raw(items: Vec<SourceItem>) -> Vec<BundleBuild> {
    items
        .into_iter()
        .map(|item| {
            let name = sanitize_name(&format!("{RAW_PREFIX}{}", file_stem(&item.path)));
            BundleBuild::new(name, vec![item])
        })
        .collect()
}
