//! Image validation logic

use serde::Serialize;
use std::path::Path;
use thiserror::Error;

#[cfg(feature = "decode")]
use std::panic::{self, AssertUnwindSafe};

use super::extension::{claimed_extension, extensions_match};
use super::format::{detect_format, ImageFormat};

/// How thoroughly each image is checked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    /// Claimed extension must agree with the signature bytes
    Shallow,
    /// Shallow check, then a full decode of the pixel data
    #[default]
    Deep,
}

/// Reason an image was judged invalid
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("content does not match any known image signature")]
    DetectionIndeterminate,

    #[error("extension '{claimed}' does not match detected format '{detected}'")]
    ExtensionMismatch {
        claimed: String,
        detected: ImageFormat,
    },

    #[error("decode failed: {0}")]
    DecodeFailure(String),
}

/// Whether the crate was built with a full image decoder
pub fn decode_available() -> bool {
    cfg!(feature = "decode")
}

impl Strictness {
    /// The level actually applied, given the compiled-in features
    ///
    /// Deep falls back to Shallow when the decoder is not available.
    pub fn effective(self) -> Self {
        match self {
            Self::Deep if !decode_available() => Self::Shallow,
            other => other,
        }
    }

    /// Validate an image, returning the reason when it is rejected
    pub fn validate(&self, path: &Path) -> Result<(), Rejection> {
        match self.effective() {
            Self::Shallow => validate_shallow(path),
            Self::Deep => validate_deep(path),
        }
    }

    /// Validate an image
    ///
    /// # Returns
    /// `true` if the image is valid, `false` otherwise
    pub fn is_valid(&self, path: &Path) -> bool {
        match self.validate(path) {
            Ok(()) => true,
            Err(rejection) => {
                log::debug!("Rejected {:?}: {}", path, rejection);
                false
            }
        }
    }
}

/// Check that the claimed extension agrees with the file's signature
pub fn validate_shallow(path: &Path) -> Result<(), Rejection> {
    let claimed = claimed_extension(path);
    let detected = detect_format(path).ok_or(Rejection::DetectionIndeterminate)?;

    if !extensions_match(Some(claimed.as_str()), Some(detected.as_str())) {
        return Err(Rejection::ExtensionMismatch { claimed, detected });
    }

    Ok(())
}

/// Shallow check followed by a full decode
///
/// Decoder errors and decoder panics are both turned into a rejection.
#[cfg(feature = "decode")]
pub fn validate_deep(path: &Path) -> Result<(), Rejection> {
    validate_shallow(path)?;
    decode_image(path).map_err(Rejection::DecodeFailure)
}

#[cfg(not(feature = "decode"))]
pub fn validate_deep(path: &Path) -> Result<(), Rejection> {
    validate_shallow(path)
}

#[cfg(feature = "decode")]
fn decode_image(path: &Path) -> Result<(), String> {
    let path_clone = path.to_path_buf();
    let result = panic::catch_unwind(AssertUnwindSafe(|| -> image::ImageResult<()> {
        let reader = image::ImageReader::open(&path_clone)?.with_guessed_format()?;
        reader.decode()?;
        Ok(())
    }));

    match result {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(e.to_string()),
        Err(_panic) => Err("panic inside image decoder".to_string()),
    }
}
