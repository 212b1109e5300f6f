//! Turns an archive report into manifest entries
//!
//! For each reported archive the item list is taken from the build
//! context, rule and tag-rule metadata is attached, and the archive is
//! renamed to its content-addressed file name. Pass-through entries are
//! hashed and copied next to the archives.

use std::path::PathBuf;

use crate::archive::{ArchiveBuilder, ArchiveReport};
use crate::build::BuildContext;
use crate::common::fs::{copy_file, replace_file};
use crate::config::TagRule;
use crate::error::Result;
use crate::hash::digest_files;
use crate::manifest::{BundleInfo, ManifestData};
use crate::progress::BuildProgress;

/// Build the manifest for a finished archive step
pub fn assemble<B>(
    ctx: &BuildContext<'_>,
    report: &ArchiveReport,
    builder: &B,
    progress: &BuildProgress,
) -> Result<ManifestData>
where
    B: ArchiveBuilder + ?Sized,
{
    let mut data = ManifestData::new(&ctx.version, &ctx.build_time, &ctx.platform);
    data.bundles.reserve(report.archives.len() + ctx.raws().len());

    let archive_files: Vec<PathBuf> = report
        .archives
        .iter()
        .map(|a| ctx.output_dir.join(&a.name))
        .collect();
    let digests = digest_files(&archive_files)?;

    for ((archive, digest), staged) in report.archives.iter().zip(digests).zip(&archive_files) {
        let assets = if let Some(paths) = ctx.original_paths(&archive.name) {
            paths.to_vec()
        } else {
            tracing::warn!(
                bundle = %archive.name,
                "no recorded item paths for bundle, using the paths stored in the archive"
            );
            builder.list_items(&ctx.output_dir, &archive.name)?
        };

        let mut info = BundleInfo {
            bundle_name: archive.name.clone(),
            hash: archive.hash.clone(),
            crc: digest.crc,
            size: digest.size,
            dependencies: archive.dependencies.clone(),
            assets,
            ..BundleInfo::default()
        };
        apply_rule(ctx, &mut info);
        apply_tag_rules(&ctx.config.tag_rules, &mut info);

        replace_file(staged, &ctx.output_dir.join(info.file_name()))?;
        progress.step(&info.bundle_name);
        data.bundles.push(info);
    }

    let raw_files: Vec<PathBuf> = ctx
        .raws()
        .iter()
        .filter_map(|b| b.items.first().map(|item| item.abs.clone()))
        .collect();
    let digests = digest_files(&raw_files)?;

    for ((build, digest), source) in ctx.raws().iter().zip(digests).zip(&raw_files) {
        let mut info = BundleInfo {
            bundle_name: build.name.clone(),
            hash: digest.hash,
            crc: digest.crc,
            size: digest.size,
            is_raw_file: true,
            assets: build.item_paths(),
            ..BundleInfo::default()
        };
        apply_rule(ctx, &mut info);
        apply_tag_rules(&ctx.config.tag_rules, &mut info);

        copy_file(source, &ctx.output_dir.join(info.file_name()))?;
        progress.step(&info.bundle_name);
        data.bundles.push(info);
    }

    Ok(data)
}

/// Priority and tags of the rule that produced the bundle
fn apply_rule(ctx: &BuildContext<'_>, info: &mut BundleInfo) {
    if let Some(rule) = ctx.rule_for(&info.bundle_name) {
        info.priority = rule.priority;
        info.add_tags(&rule.tags);
    }
}

/// Add the tags of every tag rule covering at least one item
pub fn apply_tag_rules(tag_rules: &[TagRule], info: &mut BundleInfo) {
    for rule in tag_rules {
        if info.assets.iter().any(|asset| rule.matches(asset)) {
            info.add_tags(&rule.tags);
        }
    }
}
