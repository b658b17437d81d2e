//! Content-based image format detection

use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Number of leading bytes inspected for a signature
const HEADER_LEN: u64 = 32;

/// Image formats recognized by their signature bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Tiff,
    Bmp,
    Webp,
    Pbm,
    Pgm,
    Ppm,
    Rast,
    Exr,
}

impl ImageFormat {
    /// Lowercase identifier compared against claimed extensions
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Tiff => "tiff",
            Self::Bmp => "bmp",
            Self::Webp => "webp",
            Self::Pbm => "pbm",
            Self::Pgm => "pgm",
            Self::Ppm => "ppm",
            Self::Rast => "rast",
            Self::Exr => "exr",
        }
    }

    /// Classify a header buffer
    pub fn from_header(header: &[u8]) -> Option<Self> {
        if header.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(Self::Jpeg);
        }
        if header.starts_with(b"\x89PNG\r\n\x1a\n") {
            return Some(Self::Png);
        }
        if header.starts_with(b"GIF87a") || header.starts_with(b"GIF89a") {
            return Some(Self::Gif);
        }
        if header.starts_with(b"II*\0") || header.starts_with(b"MM\0*") {
            return Some(Self::Tiff);
        }
        if header.starts_with(b"BM") {
            return Some(Self::Bmp);
        }
        if header.len() >= 12 && header.starts_with(b"RIFF") && &header[8..12] == b"WEBP" {
            return Some(Self::Webp);
        }
        if header.starts_with(&[0x59, 0xA6, 0x6A, 0x95]) {
            return Some(Self::Rast);
        }
        if header.starts_with(&[0x76, 0x2F, 0x31, 0x01]) {
            return Some(Self::Exr);
        }
        Self::netpbm(header)
    }

    fn netpbm(header: &[u8]) -> Option<Self> {
        if header.len() < 3 || header[0] != b'P' || !header[2].is_ascii_whitespace() {
            return None;
        }
        match header[1] {
            b'1' | b'4' => Some(Self::Pbm),
            b'2' | b'5' => Some(Self::Pgm),
            b'3' | b'6' => Some(Self::Ppm),
            _ => None,
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn read_header(path: &Path) -> io::Result<Vec<u8>> {
    let file = File::open(path)?;
    let mut header = Vec::with_capacity(HEADER_LEN as usize);
    file.take(HEADER_LEN).read_to_end(&mut header)?;
    Ok(header)
}

/// Detect the image format of a file from its leading bytes
///
/// The file name plays no part. Unreadable files and unknown content both
/// come back as `None`.
pub fn detect_format(path: &Path) -> Option<ImageFormat> {
    match read_header(path) {
        Ok(header) => ImageFormat::from_header(&header),
        Err(e) => {
            log::debug!("Cannot read header of {:?}: {}", path, e);
            None
        }
    }
}
