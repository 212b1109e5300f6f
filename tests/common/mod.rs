//! Common test utilities for bundlekit integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use bundlekit::archive::TarArchiveBuilder;
use bundlekit::build::{BuildOutcome, BuildPipeline};
use bundlekit::config::BuildConfig;
use bundlekit::manifest::ManifestIndex;
use tempfile::TempDir;

/// Platform name used by every test build
pub const PLATFORM: &str = "Test";

/// A project directory with content files and a bundlekit.yaml
pub struct TestProject {
    /// Temporary directory
    pub temp: TempDir,
    /// Path to project root
    pub path: PathBuf,
}

impl TestProject {
    /// Create an empty project
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a file in the project
    pub fn write_file(&self, path: &str, content: &str) {
        self.write_bytes(path, content.as_bytes());
    }

    /// Write a file of `size` bytes filled with `fill`
    pub fn write_sized(&self, path: &str, size: usize, fill: u8) {
        self.write_bytes(path, &vec![fill; size]);
    }

    pub fn write_bytes(&self, path: &str, content: &[u8]) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Write bundlekit.yaml; `platform` is forced to [`PLATFORM`]
    pub fn write_config(&self, yaml: &str) {
        self.write_file(
            "bundlekit.yaml",
            &format!("platform: {PLATFORM}\ngenerate_report: false\n{yaml}"),
        );
    }

    /// Load bundlekit.yaml
    pub fn config(&self) -> BuildConfig {
        BuildConfig::load(&self.path.join("bundlekit.yaml")).expect("Failed to load config")
    }

    /// Run a build with the tar archive builder
    pub fn build(&self) -> bundlekit::Result<BuildOutcome> {
        let config = self.config();
        BuildPipeline::new(&config, &self.path, TarArchiveBuilder::new()).run()
    }

    /// Platform output directory
    pub fn output_dir(&self) -> PathBuf {
        self.path.join("bundles").join(PLATFORM)
    }

    /// Sorted file names in the output directory
    pub fn output_files(&self) -> Vec<String> {
        list_names(&self.output_dir())
    }

    /// Load the manifest from the output directory
    pub fn manifest(&self) -> ManifestIndex {
        ManifestIndex::load(&self.output_dir()).expect("Failed to load manifest")
    }

    /// Read raw bytes from a file in the output directory
    pub fn read_output(&self, name: &str) -> Vec<u8> {
        std::fs::read(self.output_dir().join(name)).expect("Failed to read output file")
    }

    /// Check if a file exists in the project
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }
}

/// Sorted names of the files directly inside `dir`
pub fn list_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("Failed to read directory")
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}
