//! The packaging pipeline
//!
//! ```text
//! collect -> partition -> archive -> manifest -> version -> reconcile -> report
//! ```
//!
//! With `version_mode: auto_increment` the build number is allocated after the
//! archive step.
//!
//! Every stage runs once, in order, on one thread (file hashing inside the
//! manifest stage fans out and joins). An error in any stage up to and
//! including the archive step leaves manifest.json and version.json from the
//! previous build untouched.

mod context;
pub mod export;
pub mod manifest_builder;
pub mod reconcile;
pub mod report;
pub mod version_ledger;

use std::path::{Path, PathBuf};

use crate::archive::{ArchiveBuilder, ArchiveReport, ArchiveRequest};
use crate::collector::AssetCollector;
use crate::common::fs::{ensure_dir, remove_file};
use crate::config::{BuildConfig, VersionMode};
use crate::error::{BuildStage, BundleKitError, Result, build_failed};
use crate::manifest::{ManifestIndex, VersionInfo, build_timestamp};
use crate::progress::BuildProgress;
use crate::strategy::partition;

pub use context::BuildContext;

/// Result of a successful build
#[derive(Debug)]
pub struct BuildOutcome {
    pub output_dir: PathBuf,
    pub manifest: ManifestIndex,
    pub version: VersionInfo,
    /// Stale files deleted by reconciliation
    pub removed: Vec<PathBuf>,
    /// Report path, when a report was written
    pub report: Option<PathBuf>,
}

/// One packaging run over a project
pub struct BuildPipeline<'a, B: ArchiveBuilder> {
    config: &'a BuildConfig,
    project_root: PathBuf,
    builder: B,
    platform: String,
    generate_report: bool,
    show_progress: bool,
}

impl<'a, B: ArchiveBuilder> BuildPipeline<'a, B> {
    pub fn new(config: &'a BuildConfig, project_root: &Path, builder: B) -> Self {
        Self {
            config,
            project_root: project_root.to_path_buf(),
            builder,
            platform: config.platform_name(),
            generate_report: config.generate_report,
            show_progress: false,
        }
    }

    /// Build for `platform` instead of the configured one
    #[must_use]
    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    #[must_use]
    pub fn with_report(mut self, generate_report: bool) -> Self {
        self.generate_report = generate_report;
        self
    }

    #[must_use]
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Run every stage
    pub fn run(&self) -> Result<BuildOutcome> {
        let mut ctx = BuildContext::new(
            self.config,
            &self.project_root,
            &self.platform,
            build_timestamp(),
        );
        tracing::info!(
            platform = %ctx.platform,
            output = %ctx.output_dir.display(),
            "starting build"
        );

        self.collect_and_partition(&mut ctx)?;
        if ctx.bundle_count() == 0 {
            tracing::warn!("package rules produced no bundles");
        }

        ensure_dir(&ctx.output_dir).map_err(at_stage(BuildStage::Archive))?;
        let report = self.build_archives(&ctx)?;

        if self.config.version_mode == VersionMode::AutoIncrement {
            let build_number = version_ledger::allocate_build_number(
                &self.project_root,
                &self.config.output_path,
                &ctx.platform,
            )
            .map_err(at_stage(BuildStage::Manifest))?;
            ctx.version = build_number.to_string();
        }

        let progress = if self.show_progress {
            BuildProgress::new(ctx.bundle_count() as u64)
        } else {
            BuildProgress::hidden()
        };
        let data = match manifest_builder::assemble(&ctx, &report, &self.builder, &progress) {
            Ok(data) => data,
            Err(e) => {
                progress.abandon();
                return Err(at_stage(BuildStage::Manifest)(e));
            }
        };
        progress.finish();

        data.write(&ctx.output_dir)
            .map_err(at_stage(BuildStage::Manifest))?;
        let manifest = ManifestIndex::new(data);

        let version = VersionInfo::for_manifest(
            &ctx.output_dir.join(crate::manifest::MANIFEST_FILE),
            &ctx.version,
            &ctx.build_time,
            self.config.min_app_version(&ctx.version),
            self.config.force_update,
        )
        .and_then(|version| version.write(&ctx.output_dir).map(|()| version))
        .map_err(at_stage(BuildStage::Version))?;

        let removed = reconcile::reconcile(&ctx.output_dir, &manifest)
            .map_err(at_stage(BuildStage::Reconcile))?;

        let report_path = if self.generate_report {
            Some(report::write(&ctx.output_dir, &manifest).map_err(at_stage(BuildStage::Report))?)
        } else {
            None
        };

        tracing::info!(
            bundles = manifest.bundles().len(),
            items = ctx.item_count(),
            "build finished"
        );

        Ok(BuildOutcome {
            output_dir: ctx.output_dir,
            manifest,
            version,
            removed,
            report: report_path,
        })
    }

    fn collect_and_partition(&self, ctx: &mut BuildContext<'_>) -> Result<()> {
        let collected = AssetCollector::new(&self.project_root)
            .excluding(self.config.output_root(&self.project_root))
            .collect_all(&self.config.package_rules)
            .map_err(at_stage(BuildStage::Collect))?;

        for (index, rule_items) in collected.into_iter().enumerate() {
            let builds = partition(rule_items.rule, rule_items.items);
            tracing::debug!(rule = %rule_items.rule.name, bundles = builds.len(), "partitioned");
            ctx.add_builds(index, builds);
        }

        ctx.ensure_unique_names()
    }

    fn build_archives(&self, ctx: &BuildContext<'_>) -> Result<ArchiveReport> {
        if ctx.archives().is_empty() {
            return Ok(ArchiveReport::default());
        }

        let request = ArchiveRequest {
            platform: &ctx.platform,
            output_dir: &ctx.output_dir,
            bundles: ctx.archives(),
            compression: self.config.compression,
        };

        let report = self
            .builder
            .build_archives(&request)
            .and_then(|report| check_report(ctx, report));
        if report.is_err() {
            discard_staged(ctx);
        }
        report.map_err(at_stage(BuildStage::Archive))
    }
}

/// An archive step that requested bundles but got none back failed
fn check_report(ctx: &BuildContext<'_>, report: ArchiveReport) -> Result<ArchiveReport> {
    if report.is_empty() {
        return Err(build_failed(
            BuildStage::Archive,
            "archive builder returned no archives",
        ));
    }

    for build in ctx.archives() {
        if !report.names().any(|name| name == build.name) {
            tracing::warn!(bundle = %build.name, "archive builder did not report bundle");
        }
    }

    Ok(report)
}

/// Remove archives written under their plain build-time names
fn discard_staged(ctx: &BuildContext<'_>) {
    for build in ctx.archives() {
        let staged = ctx.output_dir.join(&build.name);
        if staged.is_file() {
            if let Err(e) = remove_file(&staged) {
                tracing::warn!(path = %staged.display(), error = %e, "could not remove partial archive");
            }
        }
    }
}

/// Attach the failing stage to an error
///
/// Errors that already describe a build failure pass through unchanged.
fn at_stage(stage: BuildStage) -> impl FnOnce(BundleKitError) -> BundleKitError {
    move |err| match err {
        BundleKitError::BuildFailed { .. } | BundleKitError::DuplicateBundleName { .. } => err,
        other => build_failed(stage, other.to_string()),
    }
}

/// Build with the bundled tar archive builder
pub fn run(config: &BuildConfig, project_root: &Path) -> Result<BuildOutcome> {
    BuildPipeline::new(config, project_root, crate::archive::TarArchiveBuilder::new()).run()
}
