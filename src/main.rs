use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use image_validator_rs::prelude::*;

#[derive(Parser)]
#[command(name = "image_validator_rs")]
#[command(about = "Multi-threaded validator for folders of images", long_about = None)]
struct Cli {
    /// Absolute path to the folder with images to check
    folder: PathBuf,

    /// Delete invalid images
    #[arg(short, long, conflicts_with = "invalid_folder")]
    delete: bool,

    /// Absolute path to the folder for invalid images (created if missing)
    #[arg(short, long)]
    invalid_folder: Option<PathBuf>,

    /// Only compare extensions with file signatures, skip the full decode
    #[arg(long, visible_alias = "no-decode")]
    shallow: bool,

    /// Number of parallel workers (default: number of CPUs)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Write a report when done (a .json extension selects JSON output)
    #[arg(short = 'o', long)]
    report: Option<PathBuf>,

    /// Run in batch mode (no progress bar)
    #[arg(long)]
    batch: bool,

    /// Log why each image was rejected
    #[arg(short, long)]
    verbose: bool,
}

fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    // Set up graceful shutdown handler
    let shutdown_requested = Arc::new(AtomicBool::new(false));
    let shutdown_flag = shutdown_requested.clone();

    ctrlc::set_handler(move || {
        eprintln!("\nShutdown requested. Finishing current files...");
        shutdown_flag.store(true, Ordering::SeqCst);
    })
    .context("Error setting Ctrl-C handler")?;

    let options = RunOptions {
        folder: cli.folder,
        delete: cli.delete,
        invalid_folder: cli.invalid_folder,
        shallow: cli.shallow,
        workers: cli.workers,
    };

    let config = match options.into_scan_config() {
        Ok(config) => config,
        Err(e) => {
            println!("{} Invalid arguments. Try again!", timestamp());
            return Err(e.into());
        }
    };

    if config.strictness == Strictness::Deep && !decode_available() {
        log::warn!("Built without the `decode` feature, falling back to shallow validation");
    }

    let progress = if cli.batch {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .context("Invalid progress bar template")?
                .progress_chars("#>-"),
        );
        pb
    };

    println!("{} Start", timestamp());
    println!("Using {} worker(s)", config.workers);

    let report = Scanner::new(config)
        .with_progress(progress.clone())
        .with_shutdown_flag(shutdown_requested.clone())
        .run()?;

    progress.finish_and_clear();
    if report.interrupted {
        eprintln!("Graceful shutdown complete");
        eprintln!("Checked {}/{} images", report.checked, report.candidates);
    }

    println!("{} Done", timestamp());
    println!(
        "Checked {} image(s): {} invalid, {} disposition failure(s)",
        report.checked,
        report.invalid,
        report.failures()
    );

    if let Some(ref output) = cli.report {
        write_any_report(output, &report)?;
        println!("Report saved to: {}", output.display());
    }

    Ok(())
}
