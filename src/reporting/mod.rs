//! Report output

pub mod report_writer;

pub use report_writer::{write_any_report, write_json_report, write_report};
