//! Command helper utilities

use std::path::PathBuf;

use crate::common::path_normalizer::normalize_root;
use crate::config::{BuildConfig, CONFIG_FILE};
use crate::error::{Result, io_error};

/// A project root with its loaded configuration
#[derive(Debug)]
pub struct Project {
    pub root: PathBuf,
    pub config: BuildConfig,
}

impl Project {
    /// Resolve the project root and load its configuration
    ///
    /// The root defaults to the current directory, the configuration to
    /// `bundlekit.yaml` inside the root.
    pub fn open(project: Option<PathBuf>, config: Option<PathBuf>) -> Result<Self> {
        let root = normalize_root(&resolve_project_path(project)?);
        let config_path = config.unwrap_or_else(|| root.join(CONFIG_FILE));
        let config = BuildConfig::load(&config_path)?;
        tracing::debug!(root = %root.display(), config = %config_path.display(), "opened project");
        Ok(Self { root, config })
    }

    /// Output directory for `platform`, or the configured platform
    pub fn output_dir(&self, platform: Option<&str>) -> PathBuf {
        match platform {
            Some(platform) => self.root.join(&self.config.output_path).join(platform),
            None => self.config.output_dir(&self.root),
        }
    }
}

/// Resolve project path from optional argument
///
/// If a project path is provided, use it. Otherwise,
/// resolve to the current directory.
pub fn resolve_project_path(project: Option<PathBuf>) -> Result<PathBuf> {
    match project {
        Some(path) => Ok(path),
        None => std::env::current_dir()
            .map_err(|e| io_error(format!("Failed to get current directory: {e}"))),
    }
}
