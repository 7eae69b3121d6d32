//! Integration tests for the birdval command line.

use assert_cmd::cargo::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;

const HEADER: &str = "Selection,Begin Time (s),End Time (s),Scientific Name,Common Name,Confidence";
const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Command running in `dir` with default configuration.
fn birdval(dir: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("birdval"));
    cmd.current_dir(dir)
        .env("BIRDVAL_CONFIG", dir.join("absent.toml"))
        .env_remove("RUST_LOG")
        .arg("--no-progress");
    cmd
}

fn setup_workspace(dir: &Path) {
    let site = dir.join("detections").join("Site");
    fs::create_dir_all(&site).unwrap();
    fs::write(
        site.join("rec1.wav.csv"),
        format!("{HEADER}\n1,0,3,Cracticus tibicen,Magpie,0.8\n2,3,6,Corvus orru,Crow,0.3\n"),
    )
    .unwrap();
    fs::write(
        site.join("rec2.wav.csv"),
        format!("{HEADER}\n1,0,3,Cracticus tibicen,Magpie,0.9\n"),
    )
    .unwrap();
    fs::write(
        dir.join("BirdNet_validation.csv"),
        "File,Confidence,TP.FP,True.Species,Notes\n\
         rec1,0.8,T,Magpie,\n\
         rec2,0.9,F,Wind,gusty\n",
    )
    .unwrap();
}

#[test]
fn test_help_lists_commands() {
    Command::new(cargo_bin("birdval"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("collect"))
        .stdout(predicate::str::contains("reconcile"))
        .stdout(predicate::str::contains("score"));
}

#[test]
fn test_full_pipeline_writes_reports() {
    let dir = tempfile::tempdir().unwrap();
    setup_workspace(dir.path());

    birdval(dir.path())
        .args(["collect", "detections"])
        .assert()
        .success();
    let combined = fs::read(dir.path().join("combined_data.csv")).unwrap();
    assert!(combined.starts_with(BOM));
    let combined = String::from_utf8_lossy(&combined[BOM.len()..]).into_owned();
    let lines: Vec<&str> = combined.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("File Name,"));
    assert!(lines[1].contains("Crow"));

    birdval(dir.path()).arg("reconcile").assert().success();
    let merged = fs::read_to_string(dir.path().join("merged.csv")).unwrap();
    assert_eq!(merged.lines().count(), 4);

    birdval(dir.path())
        .args(["score", "--non-bird"])
        .assert()
        .success();

    let out = dir.path().join("confusion_matrices");
    for file in [
        "confusion_matrix.csv",
        "confusion_matrix.svg",
        "metrics.csv",
        "confusion_matrix_non_bird.csv",
        "metrics_non_bird.csv",
    ] {
        assert!(out.join(file).exists(), "missing {file}");
    }

    let matrix = fs::read_to_string(out.join("confusion_matrix_non_bird.csv")).unwrap();
    let matrix = matrix.trim_start_matches('\u{feff}');
    assert_eq!(
        matrix,
        "True Species,Crow,Magpie,Non-bird\n\
         Crow,0,0,0\n\
         Magpie,1,1,0\n\
         Non-bird,0,1,0\n"
    );
}

#[test]
fn test_no_csv_bom() {
    let dir = tempfile::tempdir().unwrap();
    setup_workspace(dir.path());

    birdval(dir.path())
        .args(["--no-csv-bom", "collect", "detections", "-o", "plain.csv"])
        .assert()
        .success();

    let contents = fs::read(dir.path().join("plain.csv")).unwrap();
    assert!(contents.starts_with(b"File Name,"));
}

#[test]
fn test_validated_tables_are_excluded() {
    let dir = tempfile::tempdir().unwrap();
    setup_workspace(dir.path());
    fs::write(
        dir.path().join("done.csv"),
        "File,Confidence,TP.FP,True.Species,Notes\nrec2.wav.csv,0.9,T,Magpie,\n",
    )
    .unwrap();

    birdval(dir.path())
        .args(["collect", "detections", "--validation", "done.csv"])
        .assert()
        .success();

    let combined = fs::read_to_string(dir.path().join("combined_data.csv")).unwrap();
    assert!(combined.contains("rec1.wav.csv"));
    assert!(!combined.contains("rec2.wav.csv"));
}

#[test]
fn test_missing_root_fails() {
    let dir = tempfile::tempdir().unwrap();

    birdval(dir.path())
        .args(["collect", "nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn test_score_without_decided_rows_fails() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("merged.csv"),
        "File Name,Species,Validation Confidence,Combined Confidence,TP.FP,True Species\n\
         rec1.csv,Magpie,0.8,0.8,?,Magpie\n",
    )
    .unwrap();

    birdval(dir.path())
        .arg("score")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn test_thresholds_falls_back_for_unfittable_species() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("merged.csv"),
        "File Name,Species,Validation Confidence,Combined Confidence,TP.FP,True Species\n\
         rec1.csv,Magpie,0.8,0.8,T,Magpie\n\
         rec2.csv,Magpie,0.9,0.9,T,Magpie\n",
    )
    .unwrap();

    birdval(dir.path())
        .args(["-q", "thresholds"])
        .assert()
        .success();

    let out = dir.path().join("confusion_matrices");
    let table = fs::read_to_string(out.join("validation_thresholds.csv")).unwrap();
    let table = table.trim_start_matches('\u{feff}');
    assert_eq!(table, "Species,Confidence,Fitted\nMagpie,0.1,false\n");
    assert!(out.join("validation_plot.svg").exists());
}

#[test]
fn test_config_init_and_path() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("conf").join("birdval.toml");

    Command::new(cargo_bin("birdval"))
        .arg("--config")
        .arg(&config)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("birdval.toml"));

    Command::new(cargo_bin("birdval"))
        .arg("--config")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));
    assert!(config.exists());

    Command::new(cargo_bin("birdval"))
        .arg("--config")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    Command::new(cargo_bin("birdval"))
        .arg("--config")
        .arg(&config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stem_rule"));
}
