//! What happens to an image once it is judged invalid

use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::DispositionError;

/// Policy applied to every invalid image of a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "mode")]
pub enum Disposition {
    /// Print the path, leave the file alone
    #[default]
    Report,
    /// Remove the file
    Delete,
    /// Copy the file into `destination`, then remove the original
    Move { destination: PathBuf },
}

/// Action that was carried out on an invalid image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Reported,
    Deleted,
    Moved,
}

/// Result of one disposition, as surfaced to the reporting layer
#[derive(Debug, Clone, Serialize)]
pub struct DispositionOutcome {
    pub path: PathBuf,
    pub action: Option<Action>,
    pub success: bool,
    pub message: String,
}

impl DispositionOutcome {
    /// Build the outcome for `path` from a disposition result
    pub fn from_result(path: &Path, result: Result<Action, DispositionError>) -> Self {
        match result {
            Ok(action) => {
                let label = match action {
                    Action::Reported => "Invalid image",
                    Action::Deleted => "Deleted",
                    Action::Moved => "Moved",
                };
                Self {
                    path: path.to_path_buf(),
                    action: Some(action),
                    success: true,
                    message: format!("{}: {}", label, path.display()),
                }
            }
            Err(e) => Self {
                path: path.to_path_buf(),
                action: None,
                success: false,
                message: format!("Error: {}", e),
            },
        }
    }
}

impl Disposition {
    /// Apply the policy to one invalid image
    ///
    /// Preconditions are checked at call time, since another process may have
    /// touched the file after it was discovered.
    pub fn apply(&self, path: &Path) -> Result<Action, DispositionError> {
        match self {
            Self::Report => Ok(Action::Reported),
            Self::Delete => delete_invalid_image(path).map(|_| Action::Deleted),
            Self::Move { destination } => {
                move_invalid_image(path, destination).map(|_| Action::Moved)
            }
        }
    }

    /// Apply the policy and wrap the result for reporting
    pub fn dispose(&self, path: &Path) -> DispositionOutcome {
        DispositionOutcome::from_result(path, self.apply(path))
    }
}

/// Delete an invalid image
pub fn delete_invalid_image(path: &Path) -> Result<(), DispositionError> {
    if !path.is_file() {
        return Err(DispositionError::NotAFile(path.to_path_buf()));
    }

    fs::remove_file(path).map_err(|source| DispositionError::RemovalFailed {
        path: path.to_path_buf(),
        source,
    })
}

/// Move an invalid image into `destination`, keeping its file name
///
/// The file is copied first and the original removed afterwards, so a
/// failure in between leaves the image in both places. Moving a file onto
/// itself fails before anything is touched.
pub fn move_invalid_image(path: &Path, destination: &Path) -> Result<PathBuf, DispositionError> {
    let file_name = match path.file_name() {
        Some(name) if path.is_file() && destination.is_dir() => name,
        _ => {
            return Err(DispositionError::InvalidArgs {
                source_path: path.to_path_buf(),
                destination: destination.to_path_buf(),
            })
        }
    };

    let target = destination.join(file_name);
    let move_failed = |source| DispositionError::MoveFailed {
        path: path.to_path_buf(),
        source,
    };

    if target.exists() && is_same_file(path, &target).map_err(move_failed)? {
        return Err(move_failed(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} is the same file as {}", target.display(), path.display()),
        )));
    }

    fs::copy(path, &target).map_err(move_failed)?;
    fs::remove_file(path).map_err(move_failed)?;

    Ok(target)
}

fn is_same_file(first: &Path, second: &Path) -> io::Result<bool> {
    Ok(fs::canonicalize(first)? == fs::canonicalize(second)?)
}
