//! Lesionprep CLI - dataset preparation for skin-lesion image classification.
//!
//! Thin front end over the `lesionprep` library: organize raw images into
//! class folders, count a processed dataset, or build a train/test split
//! manifest.

use anyhow::Result;
use clap::{Parser, Subcommand};
use lesionprep::config::{DatasetConfig, SplitDefaults};
use lesionprep::{
    count_images, split_dataset, DatasetOrganizer, MetadataColumns, SplitConfig,
};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "lesionprep")]
#[command(about = "Dataset preparation for skin-lesion image classification")]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Consolidate raw images and organize them into class folders
    Organize {
        /// Raw source directory, repeatable
        #[arg(long = "source", required = true)]
        sources: Vec<PathBuf>,

        /// Staging directory for consolidated images
        #[arg(long)]
        staging: PathBuf,

        /// Output root for class folders
        #[arg(long)]
        processed: PathBuf,

        /// Path to the metadata CSV
        #[arg(long)]
        metadata: PathBuf,

        /// Name of the identifier column
        #[arg(long, default_value = DatasetConfig::ID_COLUMN)]
        id_column: String,

        /// Name of the class label column
        #[arg(long, default_value = DatasetConfig::LABEL_COLUMN)]
        label_column: String,

        /// Image file extension (without dot)
        #[arg(long, default_value = DatasetConfig::IMAGE_EXTENSION)]
        extension: String,

        /// Print the run summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Count images per class folder
    Count {
        /// Processed dataset root
        #[arg(long)]
        processed: PathBuf,

        /// Print the counts as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build a deterministic train/test split manifest
    Split {
        /// Processed dataset root
        #[arg(long)]
        processed: PathBuf,

        /// Fraction of samples assigned to the training set
        #[arg(long, default_value_t = SplitDefaults::TRAIN_FRACTION)]
        train_fraction: f64,

        /// Shuffle seed
        #[arg(long, default_value_t = SplitDefaults::SEED)]
        seed: u64,

        /// Batch size used when reporting batch counts
        #[arg(long, default_value_t = SplitDefaults::BATCH_SIZE)]
        batch_size: usize,

        /// Print the full split manifest as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    match args.command {
        Command::Organize {
            sources,
            staging,
            processed,
            metadata,
            id_column,
            label_column,
            extension,
            json,
        } => {
            let organizer = DatasetOrganizer::new(staging, processed).with_extension(extension);
            let columns = MetadataColumns {
                image_id: id_column,
                label: label_column,
            };
            let summary = organizer.run(&sources, &metadata, &columns)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
        }

        Command::Count { processed, json } => {
            let census = count_images(&processed)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&census)?);
            }
        }

        Command::Split {
            processed,
            train_fraction,
            seed,
            batch_size,
            json,
        } => {
            let config = SplitConfig {
                train_fraction,
                seed,
            };
            let split = split_dataset(&processed, &config)?;
            info!(
                "Split manifest ready: {} train / {} test ({} train batches of up to {})",
                split.train().len(),
                split.test().len(),
                split.train_batches(batch_size).count(),
                batch_size
            );
            if json {
                println!("{}", serde_json::to_string_pretty(&split)?);
            }
        }
    }

    Ok(())
}
