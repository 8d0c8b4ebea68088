//! Default parameters for dataset preparation.
//!
//! These are defaults only; every operation takes its paths and column names
//! as explicit caller input.

/// Defaults describing the raw dataset shape.
pub struct DatasetConfig;

impl DatasetConfig {
    /// File extension of the image files named by metadata identifiers.
    pub const IMAGE_EXTENSION: &'static str = "jpg";
    /// Default name of the identifier column in the metadata CSV.
    pub const ID_COLUMN: &'static str = "image_id";
    /// Default name of the class label column in the metadata CSV.
    pub const LABEL_COLUMN: &'static str = "dx";
}

/// Defaults for train/test partitioning.
pub struct SplitDefaults;

impl SplitDefaults {
    pub const TRAIN_FRACTION: f64 = 0.7;
    pub const SEED: u64 = 42;
    pub const BATCH_SIZE: usize = 32;
}
