//! Lesionprep - headless library for skin-lesion dataset preparation.
//!
//! This crate prepares raw image-classification datasets (HAM10000-shaped
//! data) for training:
//!
//! - [`DatasetOrganizer`] consolidates raw image files scattered across part
//!   directories and redistributes them into one directory per class label,
//!   driven by a CSV metadata table.
//! - [`count_images`] reports per-class image counts for a processed dataset.
//! - [`split_dataset`] builds a deterministic seeded train/test partition
//!   over the class-folder layout.
//!
//! All operations are synchronous, single-pass, and return structured
//! summaries; logging via `tracing` is advisory only.
//!
//! # Example
//!
//! ```rust,ignore
//! use lesionprep::{DatasetOrganizer, MetadataColumns};
//!
//! fn main() -> lesionprep::Result<()> {
//!     let organizer = DatasetOrganizer::new("dataset/staging", "dataset/processed");
//!     let summary = organizer.run(
//!         &["dataset/raw/part_1".into(), "dataset/raw/part_2".into()],
//!         "dataset/raw/metadata.csv".as_ref(),
//!         &MetadataColumns::default(),
//!     )?;
//!     println!("moved {} images", summary.organize.moved);
//!     Ok(())
//! }
//! ```

pub mod census;
pub mod config;
pub mod error;
pub mod metadata;
pub mod organize;
pub mod split;

// Re-export commonly used types
pub use census::{count_images, ClassCensus};
pub use error::{PrepError, Result};
pub use metadata::{MetadataColumns, MetadataRecord, MetadataTable};
pub use organize::{ConsolidateSummary, DatasetOrganizer, OrganizeSummary, RunSummary};
pub use split::{split_dataset, DatasetSplit, Sample, SplitConfig};
