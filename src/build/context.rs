//! Per-build state
//!
//! A `BuildContext` is created when a build starts and dropped when it ends
//! or fails. It records, for every bundle produced by partitioning, the
//! item paths handed to the archive builder and the rule that produced it.
//! Nothing here outlives a single build, so builds for different platforms
//! can run side by side.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::{BuildConfig, PackageRule, PackageStrategy};
use crate::error::Result;
use crate::strategy::{BundleBuild, ensure_unique_names};

/// State threaded through one build
#[derive(Debug)]
pub struct BuildContext<'c> {
    pub config: &'c BuildConfig,
    pub project_root: PathBuf,
    pub output_dir: PathBuf,
    pub platform: String,
    pub build_time: String,
    /// Version stamped into manifest.json and version.json
    pub version: String,

    archives: Vec<BundleBuild>,
    raws: Vec<BundleBuild>,
    /// bundle name -> index into `config.package_rules`
    origins: HashMap<String, usize>,
    /// bundle name -> item paths exactly as collected
    original_paths: HashMap<String, Vec<String>>,
}

impl<'c> BuildContext<'c> {
    pub fn new(
        config: &'c BuildConfig,
        project_root: &Path,
        platform: impl Into<String>,
        build_time: impl Into<String>,
    ) -> Self {
        let platform = platform.into();
        let output_dir = config.output_root(project_root).join(&platform);

        Self {
            config,
            project_root: project_root.to_path_buf(),
            output_dir,
            platform,
            build_time: build_time.into(),
            version: config.version.clone(),
            archives: Vec::new(),
            raws: Vec::new(),
            origins: HashMap::new(),
            original_paths: HashMap::new(),
        }
    }

    /// Record the builds one rule produced
    pub fn add_builds(&mut self, rule_index: usize, builds: Vec<BundleBuild>) {
        let raw = self
            .config
            .package_rules
            .get(rule_index)
            .is_some_and(|rule| rule.strategy == PackageStrategy::RawFile);

        for build in builds {
            self.origins.insert(build.name.clone(), rule_index);
            if raw {
                self.raws.push(build);
            } else {
                self.original_paths
                    .insert(build.name.clone(), build.item_paths());
                self.archives.push(build);
            }
        }
    }

    /// Fail if any bundle name was produced twice
    pub fn ensure_unique_names(&self) -> Result<()> {
        ensure_unique_names(self.archives.iter().chain(&self.raws))
    }

    /// Bundles to hand to the archive builder
    pub fn archives(&self) -> &[BundleBuild] {
        &self.archives
    }

    /// Pass-through entries
    pub fn raws(&self) -> &[BundleBuild] {
        &self.raws
    }

    /// Item paths recorded for archive `name` before building
    pub fn original_paths(&self, name: &str) -> Option<&[String]> {
        self.original_paths.get(name).map(Vec::as_slice)
    }

    /// Rule that produced bundle `name`
    ///
    /// Bundles the context did not record fall back to the first rule
    /// whose lower-cased name prefixes the bundle name.
    pub fn rule_for(&self, name: &str) -> Option<&'c PackageRule> {
        let config: &'c BuildConfig = self.config;
        let rules = &config.package_rules;
        if let Some(&index) = self.origins.get(name) {
            return rules.get(index);
        }
        rules
            .iter()
            .find(|rule| name.starts_with(rule.bundle_prefix().as_str()))
    }

    pub fn bundle_count(&self) -> usize {
        self.archives.len() + self.raws.len()
    }

    pub fn item_count(&self) -> usize {
        self.archives
            .iter()
            .chain(&self.raws)
            .map(|b| b.items.len())
            .sum()
    }
}
