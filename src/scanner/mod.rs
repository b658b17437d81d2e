//! Image discovery and the parallel scan pipeline

pub mod coordinator;
pub mod file_scanner;
pub mod partition;

pub use coordinator::{
    default_worker_count, scan, scan_directory, ScanConfig, ScanReport, Scanner, WorkerSummary,
};
pub use file_scanner::collect_image_files;
pub use partition::partition;
