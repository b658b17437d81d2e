//! Error types shared by the configuration and disposition layers

use std::path::PathBuf;
use thiserror::Error;

/// Invalid run configuration, detected before any file is scanned
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid path to folder {0:?}: path must be absolute")]
    SourceNotAbsolute(PathBuf),

    #[error("Invalid path to folder {0:?}: no such directory")]
    SourceNotDirectory(PathBuf),

    #[error("Conflicting options: invalid images can't be deleted and moved to a folder at the same time")]
    ConflictingDisposition,

    #[error("Invalid path to folder for invalid images {0:?}: path must be absolute")]
    DestinationNotAbsolute(PathBuf),

    #[error("Invalid path to folder for invalid images {0:?}: not a directory")]
    DestinationNotDirectory(PathBuf),

    #[error("Folder for invalid images {0:?} is the folder being checked")]
    DestinationIsSource(PathBuf),

    #[error("Failed to create folder for invalid images {path:?}")]
    DestinationCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Worker count must be at least 1")]
    NoWorkers,
}

/// Failure while applying a disposition to one invalid file
#[derive(Error, Debug)]
pub enum DispositionError {
    #[error("this is not a path to the file - {0:?}")]
    NotAFile(PathBuf),

    #[error("invalid arguments - {source_path:?}; {destination:?}")]
    InvalidArgs {
        source_path: PathBuf,
        destination: PathBuf,
    },

    #[error("failed to remove file {path:?}: {source}")]
    RemovalFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to move file {path:?}: {source}")]
    MoveFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DispositionError {
    /// Path of the file the disposition was applied to
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::NotAFile(path) => path,
            Self::InvalidArgs { source_path, .. } => source_path,
            Self::RemovalFailed { path, .. } | Self::MoveFailed { path, .. } => path,
        }
    }
}
