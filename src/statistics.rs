//! Statistics of a merged dataset
//!
//! Scans `<output>/train/images` and `<output>/train/labels` and counts images,
//! label files, orphaned files on either side and objects per class id.

use std::collections::HashSet;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::labels::class_ids;
use crate::types::{
    DatasetStatistics, IMAGES_DIR, LABELS_DIR, LABEL_EXTENSION, MERGED_SPLIT,
};
use crate::utils::list_image_files;

/// Collect statistics of the train split under `output_dir`
pub fn collect_statistics(output_dir: &Path) -> std::io::Result<DatasetStatistics> {
    let split_dir = output_dir.join(MERGED_SPLIT);
    let images_dir = split_dir.join(IMAGES_DIR);
    let labels_dir = split_dir.join(LABELS_DIR);

    let mut stats = DatasetStatistics::default();

    let images = if images_dir.is_dir() {
        list_image_files(&images_dir)?
    } else {
        Vec::new()
    };
    stats.images = images.len();
    let image_stems: HashSet<OsString> = images
        .iter()
        .filter_map(|path| path.file_stem().map(|stem| stem.to_os_string()))
        .collect();

    let mut label_stems = HashSet::new();
    if labels_dir.is_dir() {
        for entry in fs::read_dir(&labels_dir)? {
            let path = entry?.path();
            let is_label = path.extension().is_some_and(|ext| ext == LABEL_EXTENSION);
            if !path.is_file() || !is_label {
                continue;
            }

            stats.label_files += 1;
            if let Some(stem) = path.file_stem() {
                if !image_stems.contains(stem) {
                    stats.labels_without_images += 1;
                }
                label_stems.insert(stem.to_os_string());
            }

            let content = fs::read_to_string(&path)?;
            let mut objects = 0;
            for class_id in class_ids(&content) {
                *stats
                    .objects_per_class
                    .entry(class_id.to_string())
                    .or_insert(0) += 1;
                objects += 1;
            }
            if objects == 0 {
                stats.empty_label_files += 1;
            }
            stats.objects += objects;
        }
    }

    stats.images_without_labels = images
        .iter()
        .filter_map(|path| path.file_stem())
        .filter(|stem| !label_stems.contains(*stem))
        .count();

    Ok(stats)
}

impl DatasetStatistics {
    pub fn print_summary(&self) {
        log::info!("=== Dataset Statistics ===");
        log::info!("Images: {}", self.images);
        log::info!("Label files: {}", self.label_files);
        log::info!("Objects: {}", self.objects);
        for (class_id, count) in &self.objects_per_class {
            log::info!("    class {}: {}", class_id, count);
        }
        if self.empty_label_files > 0 {
            log::info!("Empty label files: {}", self.empty_label_files);
        }

        if self.images_without_labels > 0 {
            log::warn!("Images without a label file: {}", self.images_without_labels);
        }
        if self.labels_without_images > 0 {
            log::warn!("Label files without an image: {}", self.labels_without_images);
        }
    }

    /// Write the statistics as pretty-printed JSON
    pub fn write_json(&self, path: &Path) -> std::io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()
    }
}
