//! Report writing functionality

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::disposition::Disposition;
use crate::scanner::ScanReport;

/// Write a scan report to a file
///
/// A path ending in `.json` gets the JSON form, anything else plain text.
pub fn write_any_report(output_path: &Path, report: &ScanReport) -> Result<()> {
    let is_json = output_path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        write_json_report(output_path, report)
    } else {
        write_report(output_path, report)
    }
}

/// Write a plain-text scan report
///
/// # Arguments
/// * `output_path` - Path to output file
/// * `report` - Totals and outcomes of the run
pub fn write_report(output_path: &Path, report: &ScanReport) -> Result<()> {
    let file = File::create(output_path)
        .with_context(|| format!("Failed to create report {}", output_path.display()))?;
    let mut file = BufWriter::new(file);

    let mode = match &report.disposition {
        Disposition::Report => "report".to_string(),
        Disposition::Delete => "delete".to_string(),
        Disposition::Move { destination } => format!("move to {}", destination.display()),
    };

    writeln!(file, "Image Validation Report")?;
    writeln!(file, "=======================")?;
    writeln!(file, "Generated: {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(file, "Folder: {}", report.source_dir.display())?;
    writeln!(file)?;

    writeln!(file, "Summary Statistics:")?;
    writeln!(file, "-------------------")?;
    writeln!(file, "  Images found: {}", report.candidates)?;
    writeln!(file, "  Images checked: {}", report.checked)?;
    writeln!(file, "  Invalid images: {}", report.invalid)?;
    writeln!(file, "  Validation: {:?}", report.strictness)?;
    writeln!(file, "  Disposition: {}", mode)?;
    writeln!(file, "  Workers: {}", report.workers)?;
    writeln!(file, "  Disposition failures: {}", report.failures())?;
    if report.interrupted {
        writeln!(file, "  Interrupted: yes")?;
    }
    writeln!(file)?;

    if !report.outcomes.is_empty() {
        writeln!(file, "Invalid Images:")?;
        writeln!(file, "---------------")?;
        for outcome in &report.outcomes {
            writeln!(file, "  {}", outcome.message)?;
        }
    }

    file.flush()?;
    Ok(())
}

/// Write the scan report as pretty-printed JSON
pub fn write_json_report(output_path: &Path, report: &ScanReport) -> Result<()> {
    let file = File::create(output_path)
        .with_context(|| format!("Failed to create report {}", output_path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), report)
        .context("Failed to write JSON report")?;
    Ok(())
}
