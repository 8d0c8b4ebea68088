//! Per-class image counts for a processed dataset.

use crate::error::{PrepError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;
use walkdir::WalkDir;

/// Image counts per class directory.
///
/// Classes are kept in sorted name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassCensus {
    counts: BTreeMap<String, usize>,
}

impl ClassCensus {
    /// Count for one class, zero if the class is unknown.
    pub fn get(&self, class: &str) -> usize {
        self.counts.get(class).copied().unwrap_or(0)
    }

    pub fn counts(&self) -> &BTreeMap<String, usize> {
        &self.counts
    }

    pub fn num_classes(&self) -> usize {
        self.counts.len()
    }

    /// Total images across all classes.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

/// Count the image files in each class directory under `processed_dir`.
///
/// Only immediate subdirectories are treated as classes and only their direct
/// child files are counted; files sitting at the root level are ignored.
pub fn count_images(processed_dir: &Path) -> Result<ClassCensus> {
    if !processed_dir.exists() {
        return Err(PrepError::DatasetNotFound(processed_dir.to_path_buf()));
    }

    info!("Scanning directory: {}", processed_dir.display());

    let mut counts = BTreeMap::new();

    for entry in WalkDir::new(processed_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_dir() {
            continue;
        }

        let count = WalkDir::new(entry.path())
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .count();

        let class = entry.file_name().to_string_lossy().to_string();
        counts.insert(class, count);
    }

    let census = ClassCensus { counts };

    info!("Image counts per class:");
    for (class, count) in census.counts() {
        info!("  - {}: {} images", class, count);
    }
    info!(
        "Total images across {} classes: {}",
        census.num_classes(),
        census.total()
    );

    Ok(census)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_file(dir: &Path, name: &str) {
        std::fs::create_dir_all(dir).unwrap();
        std::fs::write(dir.join(name), b"img").unwrap();
    }

    #[test]
    fn test_counts_per_class() {
        let tmp = TempDir::new().unwrap();
        create_file(&tmp.path().join("mel"), "a.jpg");
        create_file(&tmp.path().join("mel"), "b.jpg");
        create_file(&tmp.path().join("nv"), "c.jpg");

        let census = count_images(tmp.path()).unwrap();

        assert_eq!(census.num_classes(), 2);
        assert_eq!(census.get("mel"), 2);
        assert_eq!(census.get("nv"), 1);
        assert_eq!(census.total(), 3);
    }

    #[test]
    fn test_root_level_files_ignored() {
        let tmp = TempDir::new().unwrap();
        create_file(&tmp.path().join("mel"), "a.jpg");
        std::fs::write(tmp.path().join("stray.jpg"), b"img").unwrap();

        let census = count_images(tmp.path()).unwrap();

        assert_eq!(census.num_classes(), 1);
        assert_eq!(census.total(), 1);
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let err = count_images(&tmp.path().join("absent")).unwrap_err();
        assert!(matches!(err, PrepError::DatasetNotFound(_)));
    }

    #[test]
    fn test_unknown_class_counts_zero() {
        let tmp = TempDir::new().unwrap();
        create_file(&tmp.path().join("mel"), "a.jpg");

        let census = count_images(tmp.path()).unwrap();
        assert_eq!(census.get("bcc"), 0);
    }
}
