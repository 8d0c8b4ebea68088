//! Integration tests for the full dataset-preparation flow.
//!
//! These drive the public API end to end: consolidate raw parts, organize
//! into class folders, count the result, and build a split over it.

use lesionprep::{
    count_images, split_dataset, DatasetOrganizer, MetadataColumns, PrepError, SplitConfig,
};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Lay out a raw dataset: two part directories plus a metadata CSV.
fn create_raw_dataset(root: &Path, images: &[(&str, &str)], metadata: &str) -> Vec<PathBuf> {
    let part_1 = root.join("raw").join("part_1");
    let part_2 = root.join("raw").join("part_2");
    std::fs::create_dir_all(&part_1).unwrap();
    std::fs::create_dir_all(&part_2).unwrap();

    for (i, (name, contents)) in images.iter().enumerate() {
        let part = if i % 2 == 0 { &part_1 } else { &part_2 };
        std::fs::write(part.join(name), contents.as_bytes()).unwrap();
    }

    std::fs::write(root.join("raw").join("metadata.csv"), metadata.as_bytes()).unwrap();
    vec![part_1, part_2]
}

fn organizer(root: &Path) -> DatasetOrganizer {
    DatasetOrganizer::new(
        root.join("raw").join("staging"),
        root.join("processed"),
    )
}

#[test]
fn full_run_produces_class_folders() {
    let tmp = TempDir::new().unwrap();
    let sources = create_raw_dataset(
        tmp.path(),
        &[("a.jpg", "a"), ("b.jpg", "b"), ("c.jpg", "c")],
        "image_id,dx\na,mel\nb,nv\nc,mel\n",
    );
    let metadata = tmp.path().join("raw").join("metadata.csv");

    let org = organizer(tmp.path());
    let summary = org
        .run(&sources, &metadata, &MetadataColumns::default())
        .unwrap();

    assert_eq!(summary.consolidate.moved, 3);
    assert_eq!(summary.organize.moved, 3);
    assert_eq!(summary.organize.missing, 0);

    // Every organized file belongs to exactly the record that named it.
    assert!(org.processed_dir().join("mel").join("a.jpg").exists());
    assert!(org.processed_dir().join("nv").join("b.jpg").exists());
    assert!(org.processed_dir().join("mel").join("c.jpg").exists());

    // Staging emptied out, so it is gone.
    assert!(!org.staging_dir().exists());
}

#[test]
fn run_tolerates_metadata_drift() {
    let tmp = TempDir::new().unwrap();
    let sources = create_raw_dataset(
        tmp.path(),
        &[("a.jpg", "a"), ("b.jpg", "b")],
        "image_id,dx\na,cat\nb,dog\nc,cat\n",
    );
    let metadata = tmp.path().join("raw").join("metadata.csv");

    let org = organizer(tmp.path());
    let summary = org
        .run(&sources, &metadata, &MetadataColumns::default())
        .unwrap();

    assert_eq!(summary.organize.moved, 2);
    assert_eq!(summary.organize.missing, 1);
    assert!(org.processed_dir().join("cat").join("a.jpg").exists());
    assert!(org.processed_dir().join("dog").join("b.jpg").exists());
    // No file is fabricated for the absent record.
    let cat_files = std::fs::read_dir(org.processed_dir().join("cat")).unwrap().count();
    assert_eq!(cat_files, 1);
}

#[test]
fn census_matches_organized_layout() {
    let tmp = TempDir::new().unwrap();
    let sources = create_raw_dataset(
        tmp.path(),
        &[("a.jpg", "a"), ("b.jpg", "b"), ("c.jpg", "c"), ("d.jpg", "d")],
        "image_id,dx\na,mel\nb,mel\nc,mel\nd,nv\n",
    );
    let metadata = tmp.path().join("raw").join("metadata.csv");

    let org = organizer(tmp.path());
    org.run(&sources, &metadata, &MetadataColumns::default())
        .unwrap();

    let census = count_images(org.processed_dir()).unwrap();
    assert_eq!(census.get("mel"), 3);
    assert_eq!(census.get("nv"), 1);
    assert_eq!(census.total(), 4);
}

#[test]
fn split_over_organized_layout() {
    let tmp = TempDir::new().unwrap();
    let images: Vec<(String, String)> = (0..10)
        .map(|i| (format!("img{i}.jpg"), format!("{i}")))
        .collect();
    let image_refs: Vec<(&str, &str)> = images
        .iter()
        .map(|(n, c)| (n.as_str(), c.as_str()))
        .collect();
    let metadata: String = std::iter::once("image_id,dx".to_string())
        .chain((0..10).map(|i| format!("img{i},{}", if i < 6 { "mel" } else { "nv" })))
        .collect::<Vec<_>>()
        .join("\n");

    let sources = create_raw_dataset(tmp.path(), &image_refs, &metadata);
    let csv_path = tmp.path().join("raw").join("metadata.csv");

    let org = organizer(tmp.path());
    org.run(&sources, &csv_path, &MetadataColumns::default())
        .unwrap();

    let split = split_dataset(org.processed_dir(), &SplitConfig::default()).unwrap();
    assert_eq!(split.len(), 10);
    assert_eq!(split.train().len(), 7);
    assert_eq!(split.test().len(), 3);
    assert_eq!(split.class_names(), &["mel", "nv"]);
}

#[test]
fn schema_error_leaves_raw_files_staged() {
    let tmp = TempDir::new().unwrap();
    let sources = create_raw_dataset(
        tmp.path(),
        &[("a.jpg", "a")],
        "identifier,diagnosis\na,mel\n",
    );
    let metadata = tmp.path().join("raw").join("metadata.csv");

    let org = organizer(tmp.path());
    let err = org
        .run(&sources, &metadata, &MetadataColumns::default())
        .unwrap_err();

    assert!(matches!(err, PrepError::MissingColumn { .. }));
    // Consolidation already happened and stands; no class folder was made.
    assert!(org.staging_dir().join("a.jpg").exists());
    assert!(!org.processed_dir().exists());
}

#[test]
fn duplicate_identifier_aborts_before_moves() {
    let tmp = TempDir::new().unwrap();
    let sources = create_raw_dataset(
        tmp.path(),
        &[("a.jpg", "a")],
        "image_id,dx\na,mel\na,nv\n",
    );
    let metadata = tmp.path().join("raw").join("metadata.csv");

    let org = organizer(tmp.path());
    let err = org
        .run(&sources, &metadata, &MetadataColumns::default())
        .unwrap_err();

    assert!(matches!(err, PrepError::DuplicateIdentifier { .. }));
    assert!(org.staging_dir().join("a.jpg").exists());
}
