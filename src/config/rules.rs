//! Package and tag rules declared in bundlekit.yaml

use serde::{Deserialize, Serialize};
use wax::Glob;

use crate::common::path_normalizer::to_logical;
use crate::error::{Result, config_invalid};

/// Default include pattern: every file under the rule root
pub const DEFAULT_PATTERN: &str = "*";

/// Default cap for the size strategy (10 MiB)
pub const DEFAULT_MAX_BUNDLE_SIZE: u64 = 10 * 1024 * 1024;

/// Highest accepted rule priority
pub const MAX_PRIORITY: u8 = 10;

/// How a rule partitions its collected items into bundles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageStrategy {
    /// One bundle per directory below the rule root
    ByFolder,
    /// One bundle per file
    ByFile,
    /// Greedy bin-packing bounded by `max_bundle_size`
    BySize,
    /// The whole rule root in a single bundle
    ByTopFolder,
    /// Copied through without archiving
    RawFile,
}

/// A packaging rule
///
/// Rules are evaluated in declaration order. An item claimed by an earlier
/// rule is never seen by a later one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRule {
    /// Logical name, used as bundle-name prefix
    pub name: String,

    /// Partitioning strategy
    pub strategy: PackageStrategy,

    /// Directory to collect from, relative to the project root
    pub source_root: String,

    /// Include pattern (matched against the file name, or against the
    /// root-relative path when it contains `/`)
    #[serde(default = "default_pattern")]
    pub pattern: String,

    /// Size cap in bytes, only used by `by_size`
    #[serde(default = "default_max_bundle_size")]
    pub max_bundle_size: u64,

    /// Priority, 0-10 (higher loads earlier)
    #[serde(default)]
    pub priority: u8,

    /// Tags attached to every bundle this rule produces
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

fn default_pattern() -> String {
    DEFAULT_PATTERN.to_string()
}

fn default_max_bundle_size() -> u64 {
    DEFAULT_MAX_BUNDLE_SIZE
}

impl PackageRule {
    /// Create a rule with default pattern, size cap, priority and no tags
    pub fn new(
        name: impl Into<String>,
        strategy: PackageStrategy,
        source_root: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            strategy,
            source_root: source_root.into(),
            pattern: default_pattern(),
            max_bundle_size: default_max_bundle_size(),
            priority: 0,
            tags: Vec::new(),
        }
    }

    /// Builder-style setter for the include pattern
    #[must_use]
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Builder-style setter for the size cap
    #[must_use]
    pub fn with_max_bundle_size(mut self, max_bundle_size: u64) -> Self {
        self.max_bundle_size = max_bundle_size;
        self
    }

    /// Builder-style setter for priority
    #[must_use]
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    /// Builder-style setter for tags
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Source root in logical form: forward slashes, no trailing slash
    pub fn logical_root(&self) -> String {
        to_logical(&self.source_root)
    }

    /// Prefix every bundle name of this rule starts with
    pub fn bundle_prefix(&self) -> String {
        self.name.to_lowercase()
    }

    /// Validate the rule in isolation
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(config_invalid("package rule name cannot be empty"));
        }
        if self.priority > MAX_PRIORITY {
            return Err(config_invalid(format!(
                "package rule '{}' has priority {}, must be between 0 and {MAX_PRIORITY}",
                self.name, self.priority
            )));
        }
        if self.strategy == PackageStrategy::BySize && self.max_bundle_size == 0 {
            return Err(config_invalid(format!(
                "package rule '{}' uses by_size with max_bundle_size 0",
                self.name
            )));
        }
        if let Err(e) = Glob::new(&self.pattern) {
            return Err(config_invalid(format!(
                "package rule '{}' has invalid pattern '{}': {e}",
                self.name, self.pattern
            )));
        }
        Ok(())
    }
}

/// Adds tags to every bundle holding at least one item under `source_root`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRule {
    /// Logical path prefix
    pub source_root: String,

    /// Tags to add
    #[serde(default)]
    pub tags: Vec<String>,
}

impl TagRule {
    pub fn new<I, S>(source_root: impl Into<String>, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            source_root: source_root.into(),
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `asset` lies under this rule's prefix
    pub fn matches(&self, asset: &str) -> bool {
        let prefix = self.source_root.replace('\\', "/");
        !prefix.is_empty() && asset.starts_with(prefix.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_defaults_from_yaml() {
        let yaml = "name: UI\nstrategy: by_folder\nsource_root: assets/ui\n";
        let rule: PackageRule = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(rule.pattern, "*");
        assert_eq!(rule.max_bundle_size, DEFAULT_MAX_BUNDLE_SIZE);
        assert_eq!(rule.priority, 0);
        assert!(rule.tags.is_empty());
        assert_eq!(rule.bundle_prefix(), "ui");
    }

    #[test]
    fn test_strategy_names() {
        for (text, strategy) in [
            ("by_folder", PackageStrategy::ByFolder),
            ("by_file", PackageStrategy::ByFile),
            ("by_size", PackageStrategy::BySize),
            ("by_top_folder", PackageStrategy::ByTopFolder),
            ("raw_file", PackageStrategy::RawFile),
        ] {
            let parsed: PackageStrategy = serde_yaml::from_str(text).unwrap();
            assert_eq!(parsed, strategy);
        }
    }

    #[test]
    fn test_validate_priority_range() {
        let rule = PackageRule::new("ui", PackageStrategy::ByFile, "ui").with_priority(11);
        assert!(rule.validate().is_err());

        let rule = PackageRule::new("ui", PackageStrategy::ByFile, "ui").with_priority(10);
        assert!(rule.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_name() {
        let rule = PackageRule::new("  ", PackageStrategy::ByFile, "ui");
        assert!(rule.validate().is_err());
    }

    #[test]
    fn test_validate_zero_size_cap() {
        let rule = PackageRule::new("big", PackageStrategy::BySize, "big").with_max_bundle_size(0);
        assert!(rule.validate().is_err());

        // The cap is ignored by other strategies
        let rule = PackageRule::new("big", PackageStrategy::ByFile, "big").with_max_bundle_size(0);
        assert!(rule.validate().is_ok());
    }

    #[test]
    fn test_validate_pattern() {
        let rule = PackageRule::new("ui", PackageStrategy::ByFile, "ui").with_pattern("*.{png,jpg}");
        assert!(rule.validate().is_ok());

        let rule = PackageRule::new("ui", PackageStrategy::ByFile, "ui").with_pattern("[unclosed");
        assert!(rule.validate().is_err());
    }

    #[test]
    fn test_logical_root_strips_trailing_slash() {
        let rule = PackageRule::new("ui", PackageStrategy::ByFolder, "assets\\ui/");
        assert_eq!(rule.logical_root(), "assets/ui");
    }

    #[test]
    fn test_tag_rule_matches_prefix() {
        let rule = TagRule::new("assets/ui/", ["ui"]);
        assert!(rule.matches("assets/ui/icons/a.png"));
        assert!(!rule.matches("assets/audio/a.ogg"));

        let empty = TagRule::new("", ["all"]);
        assert!(!empty.matches("assets/ui/icons/a.png"));
    }
}
