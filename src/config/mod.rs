//! Build configuration (bundlekit.yaml)
//!
//! The configuration file lives at the project root. Every logical item
//! path recorded in a manifest is relative to that root.

pub mod rules;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, config_invalid, config_not_found, config_parse_failed};

pub use rules::{PackageRule, PackageStrategy, TagRule};

/// Default configuration file name
pub const CONFIG_FILE: &str = "bundlekit.yaml";

/// Default output directory, relative to the project root
pub const DEFAULT_OUTPUT_PATH: &str = "bundles";

/// Archive compression level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Compression {
    None,
    Fast,
    #[default]
    Default,
    Best,
}

/// How the content version of a build is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionMode {
    /// Always `version`
    #[default]
    Fixed,
    /// A build number, one higher than the last build of the same
    /// output path and platform
    AutoIncrement,
}

/// Build configuration from bundlekit.yaml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Output root; bundles land in `{output_path}/{platform}`
    pub output_path: String,

    /// Platform identifier; host platform when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,

    /// Content version written to manifest.json and version.json
    pub version: String,

    /// Fixed `version`, or an auto-incremented build number
    pub version_mode: VersionMode,

    /// Minimum application version; defaults to `version`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_app_version: Option<String>,

    /// Whether clients must update before running
    pub force_update: bool,

    /// Archive compression
    pub compression: Compression,

    /// Write build_report.txt after each build
    pub generate_report: bool,

    /// Ordered packaging rules (first match wins)
    pub package_rules: Vec<PackageRule>,

    /// Tag rules applied after bundles are formed
    pub tag_rules: Vec<TagRule>,

    /// Tags selected by `bundlekit export`
    pub builtin_tags: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            platform: None,
            version: "1.0.0".to_string(),
            version_mode: VersionMode::default(),
            min_app_version: None,
            force_update: false,
            compression: Compression::default(),
            generate_report: true,
            package_rules: Vec::new(),
            tag_rules: Vec::new(),
            builtin_tags: Vec::new(),
        }
    }
}

impl BuildConfig {
    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(config_not_found(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| config_parse_failed(path.display().to_string(), e.to_string()))?;

        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| config_parse_failed(path.display().to_string(), e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Validate every rule and the rule set as a whole
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for rule in &self.package_rules {
            rule.validate()?;
            if !seen.insert(rule.bundle_prefix()) {
                return Err(config_invalid(format!(
                    "package rule name '{}' is used more than once",
                    rule.name
                )));
            }
        }

        if self.version.trim().is_empty() {
            return Err(config_invalid("version cannot be empty"));
        }

        Ok(())
    }

    /// Platform identifier for this build
    pub fn platform_name(&self) -> String {
        self.platform
            .clone()
            .unwrap_or_else(|| host_platform().to_string())
    }

    /// Minimum application version for version.json; defaults to the
    /// version of the build itself
    pub fn min_app_version<'a>(&'a self, build_version: &'a str) -> &'a str {
        self.min_app_version.as_deref().unwrap_or(build_version)
    }

    /// Output root holding one directory per platform
    pub fn output_root(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.output_path)
    }

    /// Platform output directory under `project_root`
    pub fn output_dir(&self, project_root: &Path) -> PathBuf {
        self.output_root(project_root).join(self.platform_name())
    }
}

/// Name of the platform this binary runs on
pub fn host_platform() -> &'static str {
    if cfg!(target_os = "windows") {
        "Windows"
    } else if cfg!(target_os = "macos") {
        "MacOS"
    } else if cfg!(target_os = "linux") {
        "Linux"
    } else {
        "Unknown"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r"
output_path: out
platform: Android
version: 2.1.0
package_rules:
  - name: ui
    strategy: by_folder
    source_root: assets/ui
    priority: 5
    tags: [ui, startup]
  - name: audio
    strategy: by_size
    source_root: assets/audio
    pattern: '*.ogg'
    max_bundle_size: 1048576
  - name: config
    strategy: raw_file
    source_root: assets/config
tag_rules:
  - source_root: assets/ui/popup
    tags: [popup]
builtin_tags: [startup]
";

    #[test]
    fn test_parse_sample_config() {
        let config = BuildConfig::from_yaml(SAMPLE).unwrap();
        assert_eq!(config.output_path, "out");
        assert_eq!(config.platform_name(), "Android");
        assert_eq!(config.version, "2.1.0");
        assert_eq!(config.min_app_version(&config.version), "2.1.0");
        assert_eq!(config.version_mode, VersionMode::Fixed);
        assert_eq!(config.package_rules.len(), 3);
        assert_eq!(config.package_rules[1].pattern, "*.ogg");
        assert_eq!(config.package_rules[1].max_bundle_size, 1_048_576);
        assert_eq!(config.tag_rules[0].tags, vec!["popup".to_string()]);
        assert_eq!(config.builtin_tags, vec!["startup".to_string()]);
        assert!(config.generate_report);
        assert_eq!(config.compression, Compression::Default);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = BuildConfig::from_yaml("{}").unwrap();
        assert_eq!(config, BuildConfig::default());
        assert_eq!(config.platform_name(), host_platform());
    }

    #[test]
    fn test_duplicate_rule_names_rejected() {
        let yaml = r"
package_rules:
  - { name: UI, strategy: by_file, source_root: a }
  - { name: ui, strategy: by_file, source_root: b }
";
        let err = BuildConfig::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_output_dir_includes_platform() {
        let config = BuildConfig::from_yaml(SAMPLE).unwrap();
        let dir = config.output_dir(Path::new("/project"));
        assert_eq!(dir, PathBuf::from("/project/out/Android"));
    }

    #[test]
    fn test_auto_increment_mode() {
        let config = BuildConfig::from_yaml("version_mode: auto_increment\n").unwrap();
        assert_eq!(config.version_mode, VersionMode::AutoIncrement);
        assert_eq!(config.min_app_version("7"), "7");

        let config =
            BuildConfig::from_yaml("version_mode: auto_increment\nmin_app_version: 3\n").unwrap();
        assert_eq!(config.min_app_version("7"), "3");
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = BuildConfig::load(&temp.path().join(CONFIG_FILE)).unwrap_err();
        assert!(matches!(
            err,
            crate::error::BundleKitError::ConfigNotFound { .. }
        ));
    }

    #[test]
    fn test_load_invalid_yaml_names_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        std::fs::write(&path, "package_rules: [unclosed").unwrap();

        let err = BuildConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains(CONFIG_FILE));
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = BuildConfig::from_yaml(SAMPLE).unwrap();
        let yaml = config.to_yaml().unwrap();
        let reparsed = BuildConfig::from_yaml(&yaml).unwrap();
        assert_eq!(config, reparsed);
    }
}
