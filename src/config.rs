use clap::Parser;
use std::path::PathBuf;

use crate::types::{DEFAULT_LOG_FILE, SUBSET_NAMES};

/// Command-line arguments for merging several YOLO datasets into one train split.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct Args {
    /// Root directory containing one sub-directory per dataset
    #[arg(long = "root_dir")]
    pub root_dir: PathBuf,

    /// Directory where the merged dataset is written
    #[arg(long = "output")]
    pub output: PathBuf,

    /// Non-negative class id written into every label line (collapses all classes into one)
    #[arg(long = "target_class")]
    pub target_class: Option<u32>,

    /// Subset directories looked up inside every dataset, in order
    #[arg(
        long = "subsets",
        value_delimiter = ',',
        default_values_t = default_subsets(),
        value_parser = validate_subset
    )]
    pub subsets: Vec<String>,

    /// File receiving a copy of every log record
    #[arg(long = "log_file", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Write the statistics of the merged dataset to this JSON file
    #[arg(long = "stats_json")]
    pub stats_json: Option<PathBuf>,

    /// Disable the per-subset progress bars
    #[arg(long = "no_progress")]
    pub no_progress: bool,
}

fn default_subsets() -> Vec<String> {
    SUBSET_NAMES.iter().map(|name| name.to_string()).collect()
}

// A subset name is a single path component
fn validate_subset(s: &str) -> Result<String, String> {
    let name = s.trim();
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        Err(format!("'{}' is not a valid subset directory name", s))
    } else {
        Ok(name.to_string())
    }
}
