//! Run configuration checks

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::validator::Strictness;
use crate::disposition::Disposition;
use crate::error::ConfigError;
use crate::scanner::{default_worker_count, ScanConfig};

/// Raw options as they come from the command line
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub folder: PathBuf,
    pub delete: bool,
    pub invalid_folder: Option<PathBuf>,
    pub shallow: bool,
    pub workers: Option<usize>,
}

impl RunOptions {
    /// Check the options and turn them into a scan configuration
    ///
    /// A missing folder for invalid images is created here, before any
    /// worker starts.
    pub fn into_scan_config(self) -> Result<ScanConfig, ConfigError> {
        check_source_folder(&self.folder)?;

        let disposition = match (self.delete, self.invalid_folder) {
            (true, Some(_)) => return Err(ConfigError::ConflictingDisposition),
            (true, None) => Disposition::Delete,
            (false, Some(destination)) => {
                prepare_destination(&destination)?;
                check_distinct_folders(&self.folder, &destination)?;
                Disposition::Move { destination }
            }
            (false, None) => Disposition::Report,
        };

        let workers = match self.workers {
            Some(0) => return Err(ConfigError::NoWorkers),
            Some(workers) => workers,
            None => default_worker_count(),
        };

        let strictness = if self.shallow {
            Strictness::Shallow
        } else {
            Strictness::Deep
        };

        Ok(ScanConfig::new(self.folder)
            .with_disposition(disposition)
            .with_strictness(strictness)
            .with_workers(workers))
    }
}

/// The folder to scan must be an absolute path to an existing directory
pub fn check_source_folder(path: &Path) -> Result<(), ConfigError> {
    if !path.is_absolute() {
        return Err(ConfigError::SourceNotAbsolute(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(ConfigError::SourceNotDirectory(path.to_path_buf()));
    }
    Ok(())
}

/// Make sure the folder for invalid images exists
pub fn prepare_destination(path: &Path) -> Result<(), ConfigError> {
    if !path.is_absolute() {
        return Err(ConfigError::DestinationNotAbsolute(path.to_path_buf()));
    }
    if path.is_dir() {
        return Ok(());
    }
    if path.exists() {
        return Err(ConfigError::DestinationNotDirectory(path.to_path_buf()));
    }

    log::info!("Creating folder for invalid images: {}", path.display());
    fs::create_dir_all(path).map_err(|source| ConfigError::DestinationCreate {
        path: path.to_path_buf(),
        source,
    })
}

/// Invalid images can't be moved into the folder being scanned
pub fn check_distinct_folders(folder: &Path, destination: &Path) -> Result<(), ConfigError> {
    let same = match (fs::canonicalize(folder), fs::canonicalize(destination)) {
        (Ok(folder), Ok(destination)) => folder == destination,
        _ => folder == destination,
    };
    if same {
        return Err(ConfigError::DestinationIsSource(destination.to_path_buf()));
    }
    Ok(())
}
