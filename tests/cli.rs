use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn write_config(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("config.yaml");
    std::fs::write(
        &path,
        "output_root: out\nrun:\n  batch_size: 5\n  max_concurrency: 4\n",
    )
    .unwrap();
    path
}

fn channel_scribe() -> Command {
    Command::cargo_bin("channel-scribe").unwrap()
}

#[test]
fn help_lists_subcommands() {
    channel_scribe()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("process"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn run_rejects_zero_batch_size() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());

    channel_scribe()
        .args(["run", "https://www.youtube.com/@example/videos", "--batch-size", "0"])
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("batch size must be at least 1"));
}

#[test]
fn run_rejects_invalid_channel_url() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());

    channel_scribe()
        .args(["run", "not-a-channel"])
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid URL format"));
}

#[test]
fn config_show_reports_file_values() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());

    channel_scribe()
        .args(["config", "--show"])
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Batch Size: 5"))
        .stdout(predicate::str::contains("Short Cooldown: 300s every 2 batches"))
        .stdout(predicate::str::contains("Long Cooldown: 1800s every 6 batches"));
}

#[test]
fn config_init_writes_defaults_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fresh").join("config.yaml");

    channel_scribe()
        .args(["config", "--init"])
        .arg("--config")
        .arg(&path)
        .assert()
        .success();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("batch_size: 5"));
    assert!(written.contains("whisper_model: base"));

    channel_scribe()
        .args(["config", "--init"])
        .arg("--config")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn missing_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();

    channel_scribe()
        .args(["config", "--show"])
        .arg("--config")
        .arg(dir.path().join("absent.yaml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}

fn write_config_with_missing_tools(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("config.yaml");
    let output = dir.join("out");
    std::fs::write(
        &path,
        format!(
            "output_root: {}\ntools:\n  yt_dlp: /nonexistent/yt-dlp\n  ffmpeg: /nonexistent/ffmpeg\n  whisper: /nonexistent/whisper\n",
            output.display()
        ),
    )
    .unwrap();
    path
}

#[test]
fn check_fails_when_tools_are_missing() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config_with_missing_tools(dir.path());

    channel_scribe()
        .arg("check")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stdout(predicate::str::contains("/nonexistent/yt-dlp not found"))
        .stderr(predicate::str::contains("Some required tools are missing"));
}

#[test]
fn process_fails_when_the_item_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config_with_missing_tools(dir.path());

    channel_scribe()
        .args(["process", "https://www.youtube.com/watch?v=abc123"])
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed at download stage"));

    assert!(dir.path().join("out").join("downloads").is_dir());
    assert!(!dir.path().join("out").join("transcripts").join("abc123.txt").exists());
}
