//! Consolidation and class-wise organization of raw image files.
//!
//! Raw datasets arrive split across several part directories. The organizer
//! first consolidates matching files into a single staging directory, then
//! redistributes them into one directory per class label, driven by the
//! metadata table. Moves are destructive: a relocated file no longer exists
//! at its prior location.

use crate::config::DatasetConfig;
use crate::error::{PrepError, Result};
use crate::metadata::{MetadataColumns, MetadataTable};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Counts from one consolidation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsolidateSummary {
    /// Files moved into the staging directory.
    pub moved: usize,
    /// Source directories that did not exist and were skipped.
    pub missing_dirs: usize,
}

/// Counts from one organization pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizeSummary {
    /// Files moved into class directories.
    pub moved: usize,
    /// Metadata records whose file was absent from staging.
    pub missing: usize,
}

/// Combined counts from a full consolidate-and-organize run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub consolidate: ConsolidateSummary,
    pub organize: OrganizeSummary,
}

/// Organizer for bringing raw image files into the class-folder layout.
///
/// Owns the staging and processed directory paths plus the image extension
/// used to recognize and derive file names. All operations are sequential
/// and assume uncontended access to the directory trees involved.
pub struct DatasetOrganizer {
    /// Directory holding consolidated files awaiting redistribution.
    staging_dir: PathBuf,
    /// Root under which one directory per class label is created.
    processed_dir: PathBuf,
    /// Extension (without dot) of the image files.
    extension: String,
}

impl DatasetOrganizer {
    /// Create a new organizer.
    ///
    /// # Arguments
    ///
    /// * `staging_dir` - Staging directory for consolidated files
    /// * `processed_dir` - Output root for class directories
    pub fn new(staging_dir: impl Into<PathBuf>, processed_dir: impl Into<PathBuf>) -> Self {
        Self {
            staging_dir: staging_dir.into(),
            processed_dir: processed_dir.into(),
            extension: DatasetConfig::IMAGE_EXTENSION.to_string(),
        }
    }

    /// Override the image file extension (without dot).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    pub fn processed_dir(&self) -> &Path {
        &self.processed_dir
    }

    /// Move matching files from each source directory into the staging area.
    ///
    /// A source directory that does not exist is skipped with a warning and
    /// counted in the summary; partial raw layouts are expected during
    /// iterative dataset assembly. Files that do not carry the configured
    /// extension are left untouched. When the same file name occurs in more
    /// than one source directory, the one moved last wins.
    pub fn consolidate(&self, sources: &[PathBuf]) -> Result<ConsolidateSummary> {
        fs::create_dir_all(&self.staging_dir)
            .map_err(|e| PrepError::io_with_path(e, &self.staging_dir))?;
        debug!("Staging directory ready at {}", self.staging_dir.display());

        let mut summary = ConsolidateSummary::default();

        for source in sources {
            if !source.exists() {
                warn!("Directory {} not found, skipping", source.display());
                summary.missing_dirs += 1;
                continue;
            }

            info!(
                "Moving images from {} to {}",
                source.display(),
                self.staging_dir.display()
            );

            for entry in WalkDir::new(source)
                .min_depth(1)
                .max_depth(1)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                if !entry.file_type().is_file() || !self.matches_extension(entry.path()) {
                    continue;
                }

                let dest = self.staging_dir.join(entry.file_name());
                move_file(entry.path(), &dest)?;
                summary.moved += 1;
            }
        }

        info!(
            "Consolidated {} files into {}",
            summary.moved,
            self.staging_dir.display()
        );
        Ok(summary)
    }

    /// Redistribute staged files into one directory per class label.
    ///
    /// The metadata table is loaded and validated before any file is moved.
    /// For each record in table order, the file named after the identifier is
    /// moved from staging into the record's label directory; records whose
    /// file is absent are counted as missing and skipped. Afterwards the
    /// staging directory is removed if it ended up empty.
    pub fn organize(
        &self,
        metadata_csv: &Path,
        columns: &MetadataColumns,
    ) -> Result<OrganizeSummary> {
        let table = MetadataTable::load(metadata_csv, columns)?;

        fs::create_dir_all(&self.processed_dir)
            .map_err(|e| PrepError::io_with_path(e, &self.processed_dir))?;
        info!(
            "Organizing images into class folders at {}",
            self.processed_dir.display()
        );

        let mut summary = OrganizeSummary::default();

        for record in table.records() {
            let file_name = format!("{}.{}", record.image_id, self.extension);
            let source = self.staging_dir.join(&file_name);

            if !source.exists() {
                summary.missing += 1;
                continue;
            }

            let class_dir = self.processed_dir.join(&record.label);
            fs::create_dir_all(&class_dir).map_err(|e| PrepError::io_with_path(e, &class_dir))?;

            let dest = class_dir.join(&file_name);
            move_file(&source, &dest)?;
            summary.moved += 1;
        }

        info!("Moved {} images into class folders", summary.moved);
        if summary.missing > 0 {
            warn!(
                "{} images referenced by metadata were not found in staging",
                summary.missing
            );
        }

        self.remove_staging_if_empty()?;

        Ok(summary)
    }

    /// Full consolidate-then-organize sequence.
    ///
    /// Consolidation happens first, so its moves stand even when the
    /// organization step fails on a bad metadata input.
    pub fn run(
        &self,
        sources: &[PathBuf],
        metadata_csv: &Path,
        columns: &MetadataColumns,
    ) -> Result<RunSummary> {
        let consolidate = self.consolidate(sources)?;
        let organize = self.organize(metadata_csv, columns)?;
        Ok(RunSummary {
            consolidate,
            organize,
        })
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e == self.extension)
            .unwrap_or(false)
    }

    /// Remove the staging directory when it holds nothing, leave it otherwise;
    /// it may legitimately contain unrelated files.
    fn remove_staging_if_empty(&self) -> Result<()> {
        if !self.staging_dir.exists() {
            return Ok(());
        }

        let mut entries = fs::read_dir(&self.staging_dir)
            .map_err(|e| PrepError::io_with_path(e, &self.staging_dir))?;
        if entries.next().is_none() {
            fs::remove_dir(&self.staging_dir)
                .map_err(|e| PrepError::io_with_path(e, &self.staging_dir))?;
            info!("Removed empty staging directory");
        }

        Ok(())
    }
}

/// Move a file, falling back to copy-then-delete when a direct rename is not
/// possible (e.g. staging and destination on different filesystems).
fn move_file(source: &Path, dest: &Path) -> Result<()> {
    if fs::rename(source, dest).is_ok() {
        return Ok(());
    }
    fs::copy(source, dest).map_err(|e| PrepError::io_with_path(e, source))?;
    fs::remove_file(source).map_err(|e| PrepError::io_with_path(e, source))?;
    Ok(())
}
