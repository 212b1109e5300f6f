//! Manifest loading, index queries and export over real builds

mod common;

use std::collections::HashSet;

use bundlekit::build::export::export;
use bundlekit::manifest::{ManifestData, ManifestIndex, VersionInfo};
use common::{TestProject, list_names};

/// ui_icons and ui_popup depend on shared_shared, config is raw
fn tagged_project() -> TestProject {
    let project = TestProject::new();
    project.write_file("shared/atlas.png", "atlas");
    project.write_file("ui/icons/a.png", "a");
    project.write_file("ui/icons/a.png.meta", "dependencies: [shared/atlas.png]\n");
    project.write_file("ui/popup/c.png", "c");
    project.write_file("ui/popup/c.png.meta", "dependencies: [shared/atlas.png]\n");
    project.write_file("levels/one.map", "one");
    project.write_file("config/boot.json", "{}");
    project.write_config(
        r"
version: 1.4.0
min_app_version: 1.2.0
force_update: true
package_rules:
  - { name: ui, strategy: by_folder, source_root: ui, priority: 8 }
  - { name: shared, strategy: by_folder, source_root: shared, priority: 9 }
  - { name: level, strategy: by_file, source_root: levels, tags: [levels] }
  - { name: config, strategy: raw_file, source_root: config, tags: [startup] }
tag_rules:
  - { source_root: ui/icons, tags: [startup] }
  - { source_root: ui/popup, tags: [popup] }
",
    );
    project.build().unwrap();
    project
}

#[test]
fn test_reloaded_manifest_answers_the_same() {
    let project = tagged_project();
    let built = project.build().unwrap().manifest;
    let loaded = project.manifest();

    assert_eq!(built.data(), loaded.data());
    for asset in built.assets() {
        assert_eq!(
            built.bundle_name_by_asset(asset),
            loaded.bundle_name_by_asset(asset)
        );
        let required = |m: &ManifestIndex| -> Vec<String> {
            m.required_bundles(asset)
                .iter()
                .map(|b| b.bundle_name.clone())
                .collect()
        };
        assert_eq!(required(&built), required(&loaded));
    }
    assert_eq!(built.tags(), loaded.tags());
    assert_eq!(built.total_size(), loaded.total_size());
}

#[test]
fn test_manifest_json_layout() {
    let project = tagged_project();
    let json: serde_json::Value =
        serde_json::from_slice(&project.read_output("manifest.json")).unwrap();

    assert_eq!(json["Version"], "1.4.0");
    assert_eq!(json["Platform"], "Test");
    let bundles = json["Bundles"].as_array().unwrap();
    let popup = bundles
        .iter()
        .find(|b| b["BundleName"] == "ui_popup")
        .unwrap();
    assert_eq!(popup["Priority"], 8);
    assert_eq!(popup["Dependencies"][0], "shared_shared");
    assert_eq!(popup["IsRawFile"], false);
    assert!(popup["CRC"].is_u64());
    assert!(popup["Hash"].as_str().unwrap().len() == 64);
}

#[test]
fn test_tag_queries() {
    let project = tagged_project();
    let manifest = project.manifest();

    let startup: HashSet<&str> = manifest
        .bundles_by_tag("startup")
        .iter()
        .map(|b| b.bundle_name.as_str())
        .collect();
    assert_eq!(startup, HashSet::from(["ui_icons", "raw_boot"]));

    let either = manifest.bundles_by_tags(&["startup", "popup", "startup"]);
    assert_eq!(either.len(), 3);
    assert!(manifest.bundles_by_tag("nothing").is_empty());
    assert_eq!(manifest.tags(), vec!["levels", "popup", "startup"]);
}

#[test]
fn test_dependency_cycle_terminates() {
    let project = tagged_project();
    let mut data: ManifestData = project.manifest().into_data();
    for bundle in &mut data.bundles {
        if bundle.bundle_name == "shared_shared" {
            bundle.dependencies = vec!["ui_popup".to_string()];
        }
    }
    let manifest = ManifestIndex::new(data);

    let names: Vec<&str> = manifest
        .all_dependencies("ui_popup")
        .iter()
        .map(|b| b.bundle_name.as_str())
        .collect();
    assert_eq!(names, vec!["shared_shared"]);

    let required: Vec<&str> = manifest
        .required_bundles("shared/atlas.png")
        .iter()
        .map(|b| b.bundle_name.as_str())
        .collect();
    assert_eq!(required, vec!["ui_popup", "shared_shared"]);
}

#[test]
fn test_export_tagged_bundles_with_dependencies() {
    let project = tagged_project();
    let dest = project.path.join("export");
    std::fs::create_dir_all(&dest).unwrap();
    std::fs::write(dest.join("leftover.bundle"), "old").unwrap();

    let summary = export(&project.output_dir(), &dest, &["startup"]).unwrap();
    assert!(!summary.full_copy);
    assert!(summary.missing.is_empty());

    let exported = ManifestIndex::load(&dest).unwrap();
    let names: HashSet<&str> = exported
        .bundles()
        .iter()
        .map(|b| b.bundle_name.as_str())
        .collect();
    assert_eq!(names, HashSet::from(["ui_icons", "shared_shared", "raw_boot"]));
    assert_eq!(summary.copied.len(), 3);

    let mut expected: Vec<String> = exported.bundles().iter().map(|b| b.file_name()).collect();
    expected.push("manifest.json".to_string());
    expected.push("version.json".to_string());
    expected.sort();
    assert_eq!(list_names(&dest), expected);

    for bundle in exported.bundles() {
        for dep in &bundle.dependencies {
            assert!(names.contains(dep.as_str()));
        }
    }

    let version = VersionInfo::load(&dest).unwrap();
    let manifest_bytes = std::fs::read(dest.join("manifest.json")).unwrap();
    assert_eq!(version.manifest_hash, bundlekit::hash::hash_bytes(&manifest_bytes));
    assert_eq!(version.min_app_version, "1.2.0");
    assert!(version.force_update);
}

#[test]
fn test_export_prunes_dependencies_outside_selection() {
    let project = tagged_project();
    // drop the shared archive so the popup export cannot carry it
    let shared = project.manifest().bundle("shared_shared").unwrap().file_name();
    std::fs::remove_file(project.output_dir().join(shared)).unwrap();

    let dest = project.path.join("export");
    let summary = export(&project.output_dir(), &dest, &["popup"]).unwrap();

    assert_eq!(summary.copied, vec!["ui_popup"]);
    assert_eq!(summary.missing, vec!["shared_shared"]);
    let exported = ManifestIndex::load(&dest).unwrap();
    assert!(exported.bundle("ui_popup").unwrap().dependencies.is_empty());
}

#[test]
fn test_export_without_tags_copies_everything() {
    let project = tagged_project();
    let dest = project.path.join("export");

    let summary = export::<&str>(&project.output_dir(), &dest, &[]).unwrap();

    assert!(summary.full_copy);
    assert_eq!(list_names(&dest), project.output_files());
    assert_eq!(
        std::fs::read(dest.join("manifest.json")).unwrap(),
        project.read_output("manifest.json")
    );
}

#[test]
fn test_export_into_output_dir_refused() {
    let project = tagged_project();
    let output = project.output_dir();

    let err = export(&output, &output.join("nested"), &["startup"]).unwrap_err();
    assert!(err.to_string().contains("overlaps"));
    assert!(output.join("manifest.json").is_file());
}
