//! Image file discovery

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::core::extension::{claimed_extension, is_image_extension};

/// Collect the image files directly inside `dir`
///
/// Only top-level regular files whose claimed extension is one of
/// [`IMAGE_EXTENSIONS`](crate::core::IMAGE_EXTENSIONS) are kept. Entries are
/// returned sorted by file name.
///
/// # Arguments
/// * `dir` - Directory to scan
///
/// # Returns
/// Vector of image file paths
pub fn collect_image_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("Not a directory: {}", dir.display());
    }

    let mut image_files = Vec::new();

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                if e.depth() == 0 {
                    return Err(e).with_context(|| format!("Failed to read {}", dir.display()));
                }
                log::warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };

        if entry.file_type().is_file() && is_image_extension(&claimed_extension(entry.path())) {
            image_files.push(entry.into_path());
        }
    }

    Ok(image_files)
}
