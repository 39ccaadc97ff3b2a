use indicatif::{ProgressBar, ProgressStyle};
use std::ffi::OsString;
use std::fs::{self, File, FileTimes};
use std::path::{Path, PathBuf};

use crate::types::{OutputDirs, IMAGES_DIR, IMG_FORMATS, LABELS_DIR, MERGED_SPLIT};

/// Create a progress bar with the given length and label
pub fn create_progress_bar(len: u64, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(&format!(
                "{{spinner:.green}} [{}] [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} ({{eta}})",
                label
            ))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb
}

/// Create a directory (and its parents) unless it already exists.
/// Existing content is left in place.
pub fn create_output_directory(path: &Path) -> std::io::Result<PathBuf> {
    if path.is_dir() {
        log::debug!("Directory {:?} already exists, appending to it.", path);
    }
    fs::create_dir_all(path)?;
    Ok(path.to_path_buf())
}

/// Set up `<output>/train/images` and `<output>/train/labels`
pub fn setup_output_directories(output_dir: &Path) -> std::io::Result<OutputDirs> {
    let split_dir = output_dir.join(MERGED_SPLIT);
    Ok(OutputDirs {
        images_dir: create_output_directory(&split_dir.join(IMAGES_DIR))?,
        labels_dir: create_output_directory(&split_dir.join(LABELS_DIR))?,
    })
}

/// Directories directly under `root`, sorted by name
pub fn list_dataset_dirs(root: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(root)? {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// Whether `path` is a regular file with one of the accepted image extensions
pub fn is_image_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| IMG_FORMATS.contains(&ext))
}

/// Image files directly under `images_dir`, sorted by name
pub fn list_image_files(images_dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut images = Vec::new();
    for entry in fs::read_dir(images_dir)? {
        let path = entry?.path();
        if is_image_file(&path) {
            images.push(path);
        }
    }
    images.sort();
    Ok(images)
}

/// `dataset<index>_<name>`, keeping non UTF-8 names intact
pub fn prefixed_name(dataset_index: usize, name: &std::ffi::OsStr) -> OsString {
    let mut prefixed = OsString::from(format!("dataset{}_", dataset_index));
    prefixed.push(name);
    prefixed
}

/// Copy a file together with its permissions and access/modification times
pub fn copy_preserving_times(src: &Path, dst: &Path) -> std::io::Result<u64> {
    let bytes = fs::copy(src, dst)?;
    let metadata = fs::metadata(src)?;

    let mut times = FileTimes::new();
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }
    if let Ok(modified) = metadata.modified() {
        times = times.set_modified(modified);
    }
    // Read-only copies cannot be reopened for writing; owners may still set times
    let file = match File::options().write(true).open(dst) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => File::open(dst)?,
        Err(e) => return Err(e),
    };
    file.set_times(times)?;

    Ok(bytes)
}
