//! Deterministic tar.gz archives
//!
//! Headers carry fixed mode, owner and timestamps and the gzip header has
//! no mtime, so the same items always produce the same bytes and the same
//! hash.

use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::GzBuilder;
use tar::{Archive, Builder, Header, HeaderMode};

use super::{ArchiveBuilder, ArchiveReport, ArchiveRequest, BuiltArchive, ItemMeta};
use crate::config::Compression;
use crate::error::fs::{read_error, write_error};
use crate::error::Result;
use crate::hash::hash_file;
use crate::strategy::BundleBuild;

/// Writes each bundle as a gzip-compressed tar of its items
#[derive(Debug, Clone, Copy, Default)]
pub struct TarArchiveBuilder;

impl TarArchiveBuilder {
    pub fn new() -> Self {
        Self
    }

    fn write_archive(path: &Path, build: &BundleBuild, level: flate2::Compression) -> Result<()> {
        let file = File::create(path).map_err(write_error(path))?;
        let encoder = GzBuilder::new()
            .mtime(0)
            .operating_system(255)
            .write(BufWriter::new(file), level);

        let mut tar = Builder::new(encoder);
        tar.mode(HeaderMode::Deterministic);

        for item in &build.items {
            let source = File::open(&item.abs).map_err(read_error(&item.abs))?;
            let size = source.metadata().map_err(read_error(&item.abs))?.len();

            let mut header = Header::new_gnu();
            header.set_size(size);
            header.set_mode(0o644);
            header.set_uid(0);
            header.set_gid(0);
            header.set_mtime(0);
            tar.append_data(&mut header, &item.path, BufReader::new(source))
                .map_err(write_error(path))?;
        }

        let encoder: GzEncoder<BufWriter<File>> = tar.into_inner().map_err(write_error(path))?;
        let mut writer = encoder.finish().map_err(write_error(path))?;
        writer.flush().map_err(write_error(path))?;
        Ok(())
    }
}

fn compression_level(compression: Compression) -> flate2::Compression {
    match compression {
        Compression::None => flate2::Compression::none(),
        Compression::Fast => flate2::Compression::fast(),
        Compression::Default => flate2::Compression::default(),
        Compression::Best => flate2::Compression::best(),
    }
}

/// Direct bundle dependencies derived from item sidecars
///
/// A referenced path held by another bundle of the same request becomes an
/// edge. References to the bundle itself or to unknown paths are dropped.
fn resolve_dependencies(bundles: &[BundleBuild]) -> Result<HashMap<&str, Vec<String>>> {
    let owners: HashMap<&str, &str> = bundles
        .iter()
        .flat_map(|b| b.items.iter().map(move |i| (i.path.as_str(), b.name.as_str())))
        .collect();

    let mut edges = HashMap::with_capacity(bundles.len());
    for build in bundles {
        let mut deps = BTreeSet::new();
        for item in &build.items {
            let Some(meta) = ItemMeta::load_for(&item.abs)? else {
                continue;
            };
            for reference in &meta.dependencies {
                match owners.get(reference.as_str()) {
                    Some(&owner) if owner != build.name => {
                        deps.insert(owner.to_string());
                    }
                    Some(_) => {}
                    None => {
                        tracing::debug!(item = %item.path, reference = %reference, "reference outside this build");
                    }
                }
            }
        }
        edges.insert(build.name.as_str(), deps.into_iter().collect());
    }

    Ok(edges)
}

impl ArchiveBuilder for TarArchiveBuilder {
    fn build_archives(&self, request: &ArchiveRequest<'_>) -> Result<ArchiveReport> {
        let level = compression_level(request.compression);
        let mut dependencies = resolve_dependencies(request.bundles)?;

        let mut archives = Vec::with_capacity(request.bundles.len());
        for build in request.bundles {
            let path = request.output_dir.join(&build.name);
            Self::write_archive(&path, build, level)?;

            tracing::debug!(bundle = %build.name, items = build.items.len(), "wrote archive");
            archives.push(BuiltArchive {
                name: build.name.clone(),
                hash: hash_file(&path)?,
                dependencies: dependencies.remove(build.name.as_str()).unwrap_or_default(),
            });
        }

        Ok(ArchiveReport { archives })
    }

    fn list_items(&self, output_dir: &Path, bundle_name: &str) -> Result<Vec<String>> {
        let path = output_dir.join(bundle_name);
        let file = File::open(&path).map_err(read_error(&path))?;
        let mut archive = Archive::new(GzDecoder::new(BufReader::new(file)));

        let mut items = Vec::new();
        for entry in archive.entries().map_err(read_error(&path))? {
            let entry = entry.map_err(read_error(&path))?;
            let entry_path = entry.path().map_err(read_error(&path))?;
            items.push(entry_path.to_string_lossy().replace('\\', "/"));
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::meta_path;
    use crate::collector::SourceItem;
    use std::fs;
    use tempfile::TempDir;

    fn write_item(root: &Path, logical: &str, content: &str) -> SourceItem {
        let abs = root.join(logical);
        fs::create_dir_all(abs.parent().unwrap()).unwrap();
        fs::write(&abs, content).unwrap();
        SourceItem {
            path: logical.to_string(),
            abs,
            size: content.len() as u64,
        }
    }

    fn request<'a>(output_dir: &'a Path, bundles: &'a [BundleBuild]) -> ArchiveRequest<'a> {
        ArchiveRequest {
            platform: "Linux",
            output_dir,
            bundles,
            compression: Compression::Default,
        }
    }

    #[test]
    fn test_archives_are_deterministic() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out");
        fs::create_dir_all(&out).unwrap();
        let builds = vec![BundleBuild::new(
            "ui_icons",
            vec![
                write_item(temp.path(), "ui/icons/A.png", "aaa"),
                write_item(temp.path(), "ui/icons/b.png", "bbb"),
            ],
        )];

        let builder = TarArchiveBuilder::new();
        let first = builder.build_archives(&request(&out, &builds)).unwrap();
        let first_bytes = fs::read(out.join("ui_icons")).unwrap();
        let second = builder.build_archives(&request(&out, &builds)).unwrap();

        assert_eq!(first, second);
        assert_eq!(first_bytes, fs::read(out.join("ui_icons")).unwrap());
        assert_eq!(first.archives[0].hash.len(), 64);
    }

    #[test]
    fn test_hash_changes_with_content() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out");
        fs::create_dir_all(&out).unwrap();
        let builder = TarArchiveBuilder::new();

        let builds = vec![BundleBuild::new("b", vec![write_item(temp.path(), "x/a.txt", "one")])];
        let before = builder.build_archives(&request(&out, &builds)).unwrap();

        let builds = vec![BundleBuild::new("b", vec![write_item(temp.path(), "x/a.txt", "two")])];
        let after = builder.build_archives(&request(&out, &builds)).unwrap();

        assert_ne!(before.archives[0].hash, after.archives[0].hash);
    }

    #[test]
    fn test_list_items_returns_stored_paths() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out");
        fs::create_dir_all(&out).unwrap();
        let builds = vec![BundleBuild::new(
            "ui_icons",
            vec![
                write_item(temp.path(), "ui/icons/A.png", "aaa"),
                write_item(temp.path(), "ui/icons/b.png", "bbb"),
            ],
        )];

        let builder = TarArchiveBuilder::new();
        builder.build_archives(&request(&out, &builds)).unwrap();

        assert_eq!(
            builder.list_items(&out, "ui_icons").unwrap(),
            vec!["ui/icons/A.png".to_string(), "ui/icons/b.png".to_string()]
        );
    }

    #[test]
    fn test_dependencies_from_sidecars() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out");
        fs::create_dir_all(&out).unwrap();

        let popup = write_item(temp.path(), "ui/popup/c.prefab", "c");
        fs::write(
            meta_path(&popup.abs),
            "dependencies:\n  - shared/atlas.png\n  - ui/popup/d.png\n  - missing/thing.png\n  - shared/atlas.png\n",
        )
        .unwrap();
        let builds = vec![
            BundleBuild::new(
                "ui_popup",
                vec![popup, write_item(temp.path(), "ui/popup/d.png", "d")],
            ),
            BundleBuild::new("shared", vec![write_item(temp.path(), "shared/atlas.png", "s")]),
        ];

        let report = TarArchiveBuilder::new()
            .build_archives(&request(&out, &builds))
            .unwrap();

        assert_eq!(report.archives[0].dependencies, vec!["shared".to_string()]);
        assert!(report.archives[1].dependencies.is_empty());
    }

    #[test]
    fn test_missing_item_fails() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out");
        fs::create_dir_all(&out).unwrap();
        let builds = vec![BundleBuild::new(
            "ghost",
            vec![SourceItem {
                path: "ghost/a.png".to_string(),
                abs: temp.path().join("ghost/a.png"),
                size: 0,
            }],
        )];

        assert!(
            TarArchiveBuilder::new()
                .build_archives(&request(&out, &builds))
                .is_err()
        );
    }
}
