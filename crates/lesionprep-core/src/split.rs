//! Deterministic train/test partitioning of a class-folder dataset.
//!
//! Operates on the manifest level only: samples are paths plus labels, and
//! image decoding stays with whatever training stack consumes the split.
//! Given the same directory contents and the same configuration, the split
//! is identical across runs.

use crate::config::SplitDefaults;
use crate::error::{PrepError, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;
use walkdir::WalkDir;

/// Parameters for one train/test partition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitConfig {
    /// Fraction of samples assigned to the training set, strictly in (0, 1).
    pub train_fraction: f64,
    /// Seed for the shuffle so the partition is reproducible.
    pub seed: u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            train_fraction: SplitDefaults::TRAIN_FRACTION,
            seed: SplitDefaults::SEED,
        }
    }
}

/// One dataset item: a file path with its class label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub path: PathBuf,
    pub label: String,
    /// Index of `label` in the split's sorted class name list.
    pub class_index: usize,
}

/// A train/test partition of a class-folder dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSplit {
    train: Vec<Sample>,
    test: Vec<Sample>,
    class_names: Vec<String>,
}

impl DatasetSplit {
    pub fn train(&self) -> &[Sample] {
        &self.train
    }

    pub fn test(&self) -> &[Sample] {
        &self.test
    }

    /// Class names in sorted order; `Sample::class_index` indexes into this.
    pub fn class_names(&self) -> &[String] {
        &self.class_names
    }

    pub fn len(&self) -> usize {
        self.train.len() + self.test.len()
    }

    pub fn is_empty(&self) -> bool {
        self.train.is_empty() && self.test.is_empty()
    }

    /// Training samples in fixed-size batches; the last batch may be short.
    pub fn train_batches(&self, batch_size: usize) -> impl Iterator<Item = &[Sample]> {
        // chunks panics on zero
        self.train.chunks(batch_size.max(1))
    }

    /// Test samples in fixed-size batches; the last batch may be short.
    pub fn test_batches(&self, batch_size: usize) -> impl Iterator<Item = &[Sample]> {
        self.test.chunks(batch_size.max(1))
    }
}

/// Partition the dataset under `data_dir` into train and test sets.
///
/// Class directories are discovered in sorted name order, their direct child
/// files are gathered, and the combined sample list is shuffled with an RNG
/// seeded from the configuration before being cut at
/// `floor(train_fraction * total)`.
///
/// # Arguments
///
/// * `data_dir` - Root directory containing one subdirectory per class
/// * `config` - Train fraction and shuffle seed
pub fn split_dataset(data_dir: &Path, config: &SplitConfig) -> Result<DatasetSplit> {
    if !data_dir.exists() {
        return Err(PrepError::DatasetNotFound(data_dir.to_path_buf()));
    }
    if config.train_fraction <= 0.0 || config.train_fraction >= 1.0 {
        return Err(PrepError::InvalidFraction(config.train_fraction));
    }

    let mut class_names = Vec::new();
    for entry in WalkDir::new(data_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if entry.file_type().is_dir() {
            class_names.push(entry.file_name().to_string_lossy().to_string());
        }
    }
    class_names.sort();

    let mut samples = Vec::new();
    for (class_index, name) in class_names.iter().enumerate() {
        for entry in WalkDir::new(data_dir.join(name))
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }
            samples.push(Sample {
                path: entry.path().to_path_buf(),
                label: name.clone(),
                class_index,
            });
        }
    }

    if samples.is_empty() {
        return Err(PrepError::EmptyDataset(data_dir.to_path_buf()));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    samples.shuffle(&mut rng);

    let train_len = (config.train_fraction * samples.len() as f64).floor() as usize;
    let test = samples.split_off(train_len);
    let train = samples;

    info!(
        "Split {} samples into {} train / {} test across {} classes",
        train.len() + test.len(),
        train.len(),
        test.len(),
        class_names.len()
    );

    Ok(DatasetSplit {
        train,
        test,
        class_names,
    })
}
