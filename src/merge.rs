use indicatif::ProgressBar;
use log::{info, warn};
use std::ffi::OsString;
use std::path::Path;

use crate::labels::rewrite_label_file;
use crate::types::{
    MergeOptions, MergeSummary, OutputDirs, IMAGES_DIR, LABELS_DIR, LABEL_EXTENSION,
};
use crate::utils::{
    copy_preserving_times, create_progress_bar, list_dataset_dirs, list_image_files,
    prefixed_name, setup_output_directories,
};

/// Merge every dataset found under `options.root_dir` into the train split of
/// `options.output_dir`.
///
/// Dataset directories are numbered in name order and every copied file is
/// prefixed with `dataset<N>_`. The output directory is never cleared.
pub fn merge_datasets(options: &MergeOptions) -> Result<MergeSummary, Box<dyn std::error::Error>> {
    if !options.root_dir.is_dir() {
        return Err(format!(
            "The specified root_dir does not exist or is not a directory: {}",
            options.root_dir.display()
        )
        .into());
    }

    let output_dirs = setup_output_directories(&options.output_dir)?;
    let mut summary = MergeSummary::new();

    for (dataset_index, dataset_path) in list_dataset_dirs(&options.root_dir)?
        .into_iter()
        .enumerate()
    {
        info!(
            "Merging dataset {} as dataset{}",
            dataset_path.display(),
            dataset_index
        );

        for subset in &options.subsets {
            let subset_path = dataset_path.join(subset);
            if !subset_path.exists() {
                continue;
            }

            let images_path = subset_path.join(IMAGES_DIR);
            let labels_path = subset_path.join(LABELS_DIR);
            if !images_path.is_dir() || !labels_path.is_dir() {
                warn!(
                    "Skipping {} (no '{}' or '{}' directory)",
                    subset_path.display(),
                    IMAGES_DIR,
                    LABELS_DIR
                );
                summary.skipped_subsets.push(subset_path);
                continue;
            }

            merge_subset(
                &images_path,
                &labels_path,
                dataset_index,
                &output_dirs,
                options,
                &mut summary,
            )?;
            summary.subsets_merged += 1;
        }

        summary.datasets_processed += 1;
    }

    info!(
        "Merge complete! All data saved to {} and {}",
        output_dirs.images_dir.display(),
        output_dirs.labels_dir.display()
    );
    Ok(summary)
}

/// Copy the images and labels of one subset into the output directories
fn merge_subset(
    images_path: &Path,
    labels_path: &Path,
    dataset_index: usize,
    output_dirs: &OutputDirs,
    options: &MergeOptions,
    summary: &mut MergeSummary,
) -> std::io::Result<()> {
    let images = list_image_files(images_path)?;

    let pb = if options.show_progress {
        let label = format!(
            "dataset{} {}",
            dataset_index,
            images_path
                .parent()
                .and_then(Path::file_name)
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default()
        );
        create_progress_bar(images.len() as u64, &label)
    } else {
        ProgressBar::hidden()
    };

    for image_path in &images {
        // list_image_files only yields paths with a file name and an extension
        let (Some(stem), Some(file_name)) = (image_path.file_stem(), image_path.file_name())
        else {
            pb.inc(1);
            continue;
        };

        let new_image_path = output_dirs
            .images_dir
            .join(prefixed_name(dataset_index, file_name));
        copy_preserving_times(image_path, &new_image_path)?;
        summary.images_copied += 1;

        let label_name = with_label_extension(stem);
        let old_label_path = labels_path.join(&label_name);
        if old_label_path.is_file() {
            let new_label_path = output_dirs
                .labels_dir
                .join(prefixed_name(dataset_index, &label_name));
            let rewrite =
                rewrite_label_file(&old_label_path, &new_label_path, options.target_class)?;
            summary.labels_written += 1;
            summary.label_lines_written += rewrite.lines;
        } else {
            pb.suspend(|| {
                info!(
                    "Skipping annotation for {} (no .{} file)",
                    image_path.display(),
                    LABEL_EXTENSION
                )
            });
            summary.missing_labels.push(image_path.clone());
        }

        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(())
}

fn with_label_extension(stem: &std::ffi::OsStr) -> OsString {
    let mut name = stem.to_os_string();
    name.push(".");
    name.push(LABEL_EXTENSION);
    name
}
