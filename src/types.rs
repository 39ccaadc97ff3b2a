use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

// Subset directories recognized inside every dataset, in processing order
pub const SUBSET_NAMES: &[&str] = &["train", "valid", "val", "test"];

// Accepted image extensions (case-sensitive, `.JPG` is not an image here)
pub const IMG_FORMATS: &[&str] = &["jpg", "jpeg", "png"];

pub const IMAGES_DIR: &str = "images";
pub const LABELS_DIR: &str = "labels";
pub const LABEL_EXTENSION: &str = "txt";

// Everything is merged into this split of the output directory
pub const MERGED_SPLIT: &str = "train";

pub const DEFAULT_LOG_FILE: &str = "concat_yolo_datasets.log";

// Struct to hold the paths to the merged train split
#[derive(Debug, Clone)]
pub struct OutputDirs {
    pub images_dir: PathBuf,
    pub labels_dir: PathBuf,
}

// Options driving a single merge run
#[derive(Debug, Clone)]
pub struct MergeOptions {
    pub root_dir: PathBuf,
    pub output_dir: PathBuf,
    pub target_class: Option<u32>,
    pub subsets: Vec<String>,
    pub show_progress: bool,
}

impl MergeOptions {
    /// Options with the default subset list and progress bars disabled
    pub fn new(root_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            output_dir: output_dir.into(),
            target_class: None,
            subsets: SUBSET_NAMES.iter().map(|s| s.to_string()).collect(),
            show_progress: false,
        }
    }

    pub fn with_target_class(mut self, target_class: Option<u32>) -> Self {
        self.target_class = target_class;
        self
    }

    pub fn with_subsets<I, S>(mut self, subsets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subsets = subsets.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }
}

impl From<&crate::config::Args> for MergeOptions {
    fn from(args: &crate::config::Args) -> Self {
        Self {
            root_dir: args.root_dir.clone(),
            output_dir: args.output.clone(),
            target_class: args.target_class,
            subsets: args.subsets.clone(),
            show_progress: !args.no_progress,
        }
    }
}

// Struct to hold what happened during a merge run
#[derive(Debug, Default, Clone)]
pub struct MergeSummary {
    pub datasets_processed: usize,
    pub subsets_merged: usize,
    pub skipped_subsets: Vec<PathBuf>,
    pub images_copied: usize,
    pub labels_written: usize,
    pub label_lines_written: usize,
    pub missing_labels: Vec<PathBuf>,
}

impl MergeSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn print_summary(&self) {
        log::info!("=== Merge Summary ===");
        log::info!("Dataset directories processed: {}", self.datasets_processed);
        log::info!("Subsets merged: {}", self.subsets_merged);
        log::info!("Images copied: {}", self.images_copied);
        log::info!(
            "Label files written: {} ({} lines)",
            self.labels_written,
            self.label_lines_written
        );

        if !self.skipped_subsets.is_empty() {
            log::warn!(
                "Skipped subsets without 'images' or 'labels': {}",
                self.skipped_subsets.len()
            );
        }
        if !self.missing_labels.is_empty() {
            log::warn!(
                "Images copied without a label file: {}",
                self.missing_labels.len()
            );
        }
    }
}

// Statistics of a merged output directory
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetStatistics {
    pub images: usize,
    pub label_files: usize,
    pub images_without_labels: usize,
    pub labels_without_images: usize,
    pub empty_label_files: usize,
    pub objects: usize,
    pub objects_per_class: BTreeMap<String, usize>,
}
