//! Archive building
//!
//! The packager talks to archive builders only through [`ArchiveBuilder`].
//! A builder receives every bundle of a build at once, writes one archive
//! per bundle into the output directory under the bundle's plain name, and
//! reports a hash and the direct dependencies of each archive.
//!
//! A report is metadata only. Item paths recorded in the manifest always
//! come from the packager's own bookkeeping, never from the builder.

mod meta;
mod tar_builder;

use std::path::Path;

use crate::config::Compression;
use crate::error::Result;
use crate::strategy::BundleBuild;

pub use meta::{ItemMeta, meta_path};
pub use tar_builder::TarArchiveBuilder;

/// Everything a builder needs for one build
#[derive(Debug, Clone, Copy)]
pub struct ArchiveRequest<'a> {
    pub platform: &'a str,
    pub output_dir: &'a Path,
    pub bundles: &'a [BundleBuild],
    pub compression: Compression,
}

/// What a builder reports for one archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltArchive {
    /// Bundle name; the archive file is `{output_dir}/{name}`
    pub name: String,
    /// Content hash used in the final file name
    pub hash: String,
    /// Names of bundles this archive directly depends on
    pub dependencies: Vec<String>,
}

/// Result of one builder invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveReport {
    pub archives: Vec<BuiltArchive>,
}

impl ArchiveReport {
    pub fn is_empty(&self) -> bool {
        self.archives.is_empty()
    }

    /// Names of every reported archive
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.archives.iter().map(|a| a.name.as_str())
    }
}

/// Turns bundle builds into archive files
pub trait ArchiveBuilder {
    /// Build every bundle in `request`
    ///
    /// Either all archives are written and reported, or an error is
    /// returned.
    fn build_archives(&self, request: &ArchiveRequest<'_>) -> Result<ArchiveReport>;

    /// Item paths stored in the built archive `bundle_name`, as the
    /// builder itself records them (case may differ from the source)
    fn list_items(&self, output_dir: &Path, bundle_name: &str) -> Result<Vec<String>>;
}
