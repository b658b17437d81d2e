//! Image Validator Library
//!
//! Scans a folder for images, checks that each one's extension agrees with
//! its content (and, with the `decode` feature, that it decodes cleanly),
//! then reports, deletes or moves the broken ones using a pool of workers.

pub mod config;
pub mod core;
pub mod disposition;
pub mod error;
pub mod reporting;
pub mod scanner;

pub use crate::core::validator;
pub use reporting::report_writer;
pub use scanner::file_scanner;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{
        check_distinct_folders, check_source_folder, prepare_destination, RunOptions,
    };
    pub use crate::core::{
        claimed_extension, decode_available, detect_format, extensions_match,
        is_image_extension, validate_deep, validate_shallow, ImageFormat, Rejection, Strictness,
        IMAGE_EXTENSIONS,
    };
    pub use crate::disposition::{
        delete_invalid_image, move_invalid_image, Action, Disposition, DispositionOutcome,
    };
    pub use crate::error::{ConfigError, DispositionError};
    pub use crate::reporting::{write_any_report, write_json_report, write_report};
    pub use crate::scanner::{
        collect_image_files, partition, scan, scan_directory, ScanConfig, ScanReport, Scanner,
    };
}
