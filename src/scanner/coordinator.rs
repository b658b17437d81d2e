//! Parallel scan: discover, partition, validate and dispose

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use super::file_scanner::collect_image_files;
use super::partition::partition;
use crate::core::validator::Strictness;
use crate::disposition::{Disposition, DispositionOutcome};

/// Parameters of a single scan run
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub source_dir: PathBuf,
    pub disposition: Disposition,
    pub strictness: Strictness,
    pub workers: usize,
}

impl ScanConfig {
    /// Report-only deep scan of `source_dir` on one worker per CPU
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            disposition: Disposition::default(),
            strictness: Strictness::default(),
            workers: default_worker_count(),
        }
    }

    pub fn with_disposition(mut self, disposition: Disposition) -> Self {
        self.disposition = disposition;
        self
    }

    pub fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }
}

/// Number of logical CPUs, as seen by rayon
pub fn default_worker_count() -> usize {
    rayon::current_num_threads().max(1)
}

/// What one worker did with its chunk
#[derive(Debug, Clone, Default, Serialize)]
pub struct WorkerSummary {
    pub checked: usize,
    pub invalid: usize,
    pub outcomes: Vec<DispositionOutcome>,
}

/// Totals of a finished run
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub source_dir: PathBuf,
    pub disposition: Disposition,
    pub strictness: Strictness,
    pub workers: usize,
    pub candidates: usize,
    pub checked: usize,
    pub invalid: usize,
    pub outcomes: Vec<DispositionOutcome>,
    pub interrupted: bool,
}

impl ScanReport {
    /// Number of dispositions that failed
    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.success).count()
    }
}

/// Runs the scan pipeline on a dedicated worker pool
pub struct Scanner {
    config: ScanConfig,
    progress: ProgressBar,
    shutdown: Arc<AtomicBool>,
}

impl Scanner {
    pub fn new(config: ScanConfig) -> Self {
        Self {
            config,
            progress: ProgressBar::hidden(),
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Advance `progress` once per checked file
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Stop taking new files once `flag` is set
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown = flag;
        self
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scan the source directory and block until every worker is done
    pub fn run(&self) -> Result<ScanReport> {
        let files = collect_image_files(&self.config.source_dir)?;
        let workers = self.config.workers.max(1);
        let strictness = self.config.strictness.effective();

        log::info!(
            "Checking {} image(s) in {} with {} worker(s), {:?} validation",
            files.len(),
            self.config.source_dir.display(),
            workers,
            strictness
        );
        self.progress.set_length(files.len() as u64);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|index| format!("image-worker-{}", index))
            .build()
            .context("Failed to build worker pool")?;

        let summaries: Mutex<Vec<(usize, WorkerSummary)>> =
            Mutex::new(Vec::with_capacity(workers));
        pool.scope(|scope| {
            for (index, chunk) in partition(&files, workers).into_iter().enumerate() {
                let summaries = &summaries;
                scope.spawn(move |_| {
                    let summary = self.check_chunk(chunk, strictness);
                    record_summary(summaries, index, summary);
                });
            }
        });

        let mut summaries = summaries
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        summaries.sort_by_key(|(index, _)| *index);

        let mut report = ScanReport {
            source_dir: self.config.source_dir.clone(),
            disposition: self.config.disposition.clone(),
            strictness,
            workers,
            candidates: files.len(),
            checked: 0,
            invalid: 0,
            outcomes: Vec::new(),
            interrupted: self.shutdown.load(Ordering::SeqCst),
        };
        for (_, summary) in summaries {
            report.checked += summary.checked;
            report.invalid += summary.invalid;
            report.outcomes.extend(summary.outcomes);
        }

        Ok(report)
    }

    /// Validate and dispose one chunk, in order
    fn check_chunk(&self, chunk: &[PathBuf], strictness: Strictness) -> WorkerSummary {
        let mut summary = WorkerSummary::default();

        for path in chunk {
            if self.shutdown.load(Ordering::SeqCst) {
                log::debug!(
                    "Shutdown requested, leaving {} file(s) unchecked",
                    chunk.len() - summary.checked
                );
                break;
            }

            summary.checked += 1;
            if !strictness.is_valid(path) {
                summary.invalid += 1;
                let outcome = self.config.disposition.dispose(path);
                self.emit(&outcome);
                summary.outcomes.push(outcome);
            }
            self.progress.inc(1);
        }

        summary
    }

    fn emit(&self, outcome: &DispositionOutcome) {
        if outcome.success {
            self.progress.suspend(|| println!("{}", outcome.message));
        } else {
            log::warn!("Disposition failed for {:?}", outcome.path);
            self.progress.suspend(|| eprintln!("{}", outcome.message));
        }
    }
}

/// Store a worker's summary, even if another worker poisoned the lock
fn record_summary(
    summaries: &Mutex<Vec<(usize, WorkerSummary)>>,
    index: usize,
    summary: WorkerSummary,
) {
    summaries
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push((index, summary));
}

/// Scan `config.source_dir` without progress display or shutdown handling
pub fn scan(config: &ScanConfig) -> Result<ScanReport> {
    Scanner::new(config.clone()).run()
}

/// Shorthand for a report-only scan of `dir`
pub fn scan_directory(dir: &Path, strictness: Strictness) -> Result<ScanReport> {
    scan(&ScanConfig::new(dir).with_strictness(strictness))
}
