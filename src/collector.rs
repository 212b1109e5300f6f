//! Source item collection
//!
//! Walks each rule's source root, keeps files matching the rule pattern and
//! hands them out first-match-wins: an item taken by one rule is invisible
//! to every later rule. Rules claim their items only after they are fully
//! processed.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;
use wax::{CandidatePath, Glob, Pattern};

use crate::common::path_normalizer::{extension, file_name, relative_logical, resolve};
use crate::config::PackageRule;
use crate::error::{Result, config_invalid, file_read_failed};

/// Extension of metadata sidecar files, never collected as items
pub const META_EXTENSION: &str = "meta";

/// A content file found under a rule root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceItem {
    /// Logical path, relative to the project root
    pub path: String,
    /// Location on disk
    pub abs: PathBuf,
    /// Size in bytes at collection time
    pub size: u64,
}

/// Items collected for one rule, in walk order
#[derive(Debug, Clone)]
pub struct RuleItems<'r> {
    pub rule: &'r PackageRule,
    pub items: Vec<SourceItem>,
}

/// Collects items for an ordered rule list, tracking claimed paths
pub struct AssetCollector<'a> {
    project_root: &'a Path,
    excluded: Vec<PathBuf>,
    claimed: HashSet<String>,
}

impl<'a> AssetCollector<'a> {
    pub fn new(project_root: &'a Path) -> Self {
        Self {
            project_root,
            excluded: Vec::new(),
            claimed: HashSet::new(),
        }
    }

    /// Never walk into `dir` (the build output, for one)
    #[must_use]
    pub fn excluding(mut self, dir: impl Into<PathBuf>) -> Self {
        self.excluded.push(dir.into());
        self
    }

    fn is_excluded(&self, path: &Path) -> bool {
        self.excluded.iter().any(|dir| path.starts_with(dir))
    }

    /// Collect every rule in order
    pub fn collect_all<'r>(mut self, rules: &'r [PackageRule]) -> Result<Vec<RuleItems<'r>>> {
        rules
            .iter()
            .map(|rule| {
                let items = self.collect_rule(rule)?;
                Ok(RuleItems { rule, items })
            })
            .collect()
    }

    /// Collect one rule and claim what it found
    ///
    /// A rule whose root is empty, missing, not a directory, or inside an
    /// excluded directory yields no items.
    pub fn collect_rule(&mut self, rule: &PackageRule) -> Result<Vec<SourceItem>> {
        let logical_root = rule.logical_root();
        if logical_root.is_empty() {
            tracing::warn!(
                rule = %rule.name,
                source_root = %rule.source_root,
                "source root is empty, skipping rule"
            );
            return Ok(Vec::new());
        }

        let root = resolve(self.project_root, &logical_root);
        if self.is_excluded(&root) {
            tracing::warn!(
                rule = %rule.name,
                root = %logical_root,
                "source root lies inside the build output, skipping rule"
            );
            return Ok(Vec::new());
        }

        if !root.is_dir() {
            tracing::warn!(
                rule = %rule.name,
                root = %logical_root,
                "source root does not exist, skipping rule"
            );
            return Ok(Vec::new());
        }

        let glob = Glob::new(&rule.pattern).map_err(|e| {
            config_invalid(format!(
                "package rule '{}' has invalid pattern '{}': {e}",
                rule.name, rule.pattern
            ))
        })?;
        let match_full_path = rule.pattern.contains('/');

        let mut items = Vec::new();
        let walker = WalkDir::new(&root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_excluded(entry.path()));
        for entry in walker {
            let entry = entry.map_err(|e| file_read_failed(root.display().to_string(), e.to_string()))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let Some(relative) = relative_logical(&root, entry.path()) else {
                continue;
            };
            if is_meta_file(&relative) {
                continue;
            }

            let subject = if match_full_path {
                relative.as_str()
            } else {
                file_name(&relative)
            };
            if glob.matched(&CandidatePath::from(subject)).is_none() {
                continue;
            }

            let path = format!("{logical_root}/{relative}");
            if self.claimed.contains(&path) {
                continue;
            }

            let size = entry
                .metadata()
                .map_err(|e| file_read_failed(entry.path().display().to_string(), e.to_string()))?
                .len();
            items.push(SourceItem {
                path,
                abs: entry.into_path(),
                size,
            });
        }

        if items.is_empty() {
            tracing::warn!(rule = %rule.name, root = %logical_root, "rule matched no files");
        } else {
            tracing::debug!(rule = %rule.name, count = items.len(), "collected items");
        }

        self.claimed.extend(items.iter().map(|item| item.path.clone()));
        Ok(items)
    }

    #[cfg(test)]
    fn claimed_count(&self) -> usize {
        self.claimed.len()
    }
}

/// Whether `logical` names a metadata sidecar
pub fn is_meta_file(logical: &str) -> bool {
    extension(logical)
        .is_some_and(|ext| ext.eq_ignore_ascii_case(META_EXTENSION))
}
