//! Merge several YOLO datasets into a single training split
//!
//! Every dataset directory under a root is scanned for its `train`/`valid`/`val`/`test`
//! subsets; images and labels are copied into `<output>/train/{images,labels}` with a
//! `dataset<N>_` prefix so that files of different datasets never collide.

pub mod config;
pub mod labels;
pub mod logging;
pub mod merge;
pub mod statistics;
pub mod types;
pub mod utils;

// Re-export commonly used types and functions
pub use config::Args;
pub use labels::{relabel_line, rewrite_label_file, LabelRewrite};
pub use logging::init_logging;
pub use merge::merge_datasets;
pub use statistics::collect_statistics;
pub use types::{DatasetStatistics, MergeOptions, MergeSummary, OutputDirs, SUBSET_NAMES};
pub use utils::setup_output_directories;
