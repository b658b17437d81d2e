//! End-to-end tests for the scan pipeline
//!
//! Builds a small folder with one good image, one mis-named image and one
//! non-image, then runs each disposition mode over it.

use image_validator_rs::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// 1x1 RGBA PNG
const PNG_1X1: &[u8] = b"\x89PNG\r\n\x1a\n\
\x00\x00\x00\x0dIHDR\x00\x00\x00\x01\x00\x00\x00\x01\x08\x06\x00\x00\x00\x1f\x15\xc4\x89\
\x00\x00\x00\x0aIDAT\x78\x9c\x63\x00\x01\x00\x00\x05\x00\x01\x0d\x0a\x2d\xb4\
\x00\x00\x00\x00IEND\xae\x42\x60\x82";

/// JFIF header of a JPEG file
const JPEG_HEADER: &[u8] = b"\xFF\xD8\xFF\xE0\x00\x10JFIF\x00\x01\x01\x00\x00\x01\x00\x01\x00\x00";

/// Create `a.png` (real PNG), `b.png` (JPEG bytes) and `c.txt`
fn sample_folder() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.png"), PNG_1X1).unwrap();
    fs::write(dir.path().join("b.png"), JPEG_HEADER).unwrap();
    fs::write(dir.path().join("c.txt"), b"not an image").unwrap();
    dir
}

fn shallow_config(dir: &Path, workers: usize) -> ScanConfig {
    ScanConfig::new(dir)
        .with_strictness(Strictness::Shallow)
        .with_workers(workers)
}

#[test]
fn test_discovery_ignores_non_images() {
    let dir = sample_folder();
    let files = collect_image_files(dir.path()).unwrap();
    assert_eq!(files, vec![dir.path().join("a.png"), dir.path().join("b.png")]);
}

#[test]
fn test_report_mode_flags_only_misnamed_image() {
    let dir = sample_folder();

    let report = scan(&shallow_config(dir.path(), 4)).unwrap();

    assert_eq!(report.candidates, 2);
    assert_eq!(report.checked, 2);
    assert_eq!(report.invalid, 1);
    assert_eq!(report.outcomes.len(), 1);

    let outcome = &report.outcomes[0];
    assert_eq!(outcome.path, dir.path().join("b.png"));
    assert_eq!(outcome.action, Some(Action::Reported));
    assert_eq!(
        outcome.message,
        format!("Invalid image: {}", dir.path().join("b.png").display())
    );

    for name in ["a.png", "b.png", "c.txt"] {
        assert!(dir.path().join(name).exists(), "{} should be untouched", name);
    }
}

#[test]
fn test_delete_mode_removes_misnamed_image() {
    let dir = sample_folder();
    let config = shallow_config(dir.path(), 2).with_disposition(Disposition::Delete);

    let report = scan(&config).unwrap();

    assert_eq!(report.failures(), 0);
    assert_eq!(report.outcomes[0].action, Some(Action::Deleted));
    assert!(!dir.path().join("b.png").exists());
    assert!(dir.path().join("a.png").exists());
    assert_eq!(fs::read(dir.path().join("c.txt")).unwrap(), b"not an image");
}

#[test]
fn test_move_mode_relocates_misnamed_image() {
    let dir = sample_folder();
    let out = dir.path().join("out");

    let config = RunOptions {
        folder: dir.path().to_path_buf(),
        invalid_folder: Some(out.clone()),
        shallow: true,
        workers: Some(3),
        ..RunOptions::default()
    }
    .into_scan_config()
    .unwrap();

    let report = scan(&config).unwrap();

    assert_eq!(report.outcomes.len(), 1);
    assert_eq!(report.outcomes[0].action, Some(Action::Moved));
    assert_eq!(fs::read(out.join("b.png")).unwrap(), JPEG_HEADER);
    assert!(!dir.path().join("b.png").exists());
    assert!(dir.path().join("a.png").exists());
    assert!(dir.path().join("c.txt").exists());
}

#[test]
fn test_result_independent_of_worker_count() {
    for workers in [1, 2, 3, 8, 16] {
        let dir = sample_folder();
        let report = scan(&shallow_config(dir.path(), workers)).unwrap();
        assert_eq!(report.workers, workers);
        assert_eq!(report.checked, 2, "workers = {}", workers);
        assert_eq!(report.invalid, 1, "workers = {}", workers);
    }
}

#[test]
fn test_folder_without_images_is_noop() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("readme.md"), b"# nothing here").unwrap();
    fs::create_dir(dir.path().join("nested.png")).unwrap();

    let report = scan(&ScanConfig::new(dir.path()).with_disposition(Disposition::Delete)).unwrap();

    assert_eq!(report.candidates, 0);
    assert!(report.outcomes.is_empty());
    assert!(dir.path().join("readme.md").exists());
}

#[test]
fn test_report_file_written_after_scan() {
    let dir = sample_folder();
    let report = scan(&shallow_config(dir.path(), 2)).unwrap();

    let report_dir = TempDir::new().unwrap();
    let text_path = report_dir.path().join("report.txt");
    write_any_report(&text_path, &report).unwrap();

    let content = fs::read_to_string(&text_path).unwrap();
    assert!(content.contains("Images found: 2"));
    assert!(content.contains("Invalid images: 1"));
    assert!(content.contains("b.png"));
}

#[cfg(feature = "decode")]
#[test]
fn test_deep_report_mode_on_sample_folder() {
    let dir = sample_folder();
    let config = ScanConfig::new(dir.path()).with_workers(2);

    let report = scan(&config).unwrap();

    assert_eq!(report.strictness, Strictness::Deep);
    let flagged: Vec<_> = report.outcomes.iter().map(|o| o.path.clone()).collect();
    assert_eq!(flagged, vec![dir.path().join("b.png")]);
}

#[test]
fn test_move_into_source_folder_keeps_image() {
    let dir = sample_folder();

    let options = RunOptions {
        folder: dir.path().to_path_buf(),
        invalid_folder: Some(dir.path().to_path_buf()),
        shallow: true,
        workers: Some(1),
        ..RunOptions::default()
    };
    assert!(matches!(
        options.into_scan_config(),
        Err(ConfigError::DestinationIsSource(_))
    ));

    // Without the configuration check, the move itself refuses
    let config = shallow_config(dir.path(), 1).with_disposition(Disposition::Move {
        destination: dir.path().to_path_buf(),
    });
    let report = scan(&config).unwrap();

    assert_eq!(report.outcomes.len(), 1);
    assert!(!report.outcomes[0].success);
    assert_eq!(report.outcomes[0].action, None);
    assert!(report.outcomes[0].message.starts_with("Error: failed to move file"));
    assert_eq!(fs::read(dir.path().join("b.png")).unwrap(), JPEG_HEADER);
}
