//! Integration tests for wavegen-cli.
//!
//! Runs the `wavegen` binary with piped stdin and checks the status text the
//! operator would see.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Helper to get the path to the `wavegen` binary built by cargo.
fn wavegen_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_wavegen"));
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Write a config file into `dir` so the user's own config never leaks in.
fn write_config(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("wavegen.toml");
    std::fs::write(&path, body).expect("write config");
    path
}

fn run_console(config: &Path, extra: &[&str], input: &str) -> Output {
    let mut child = wavegen_bin()
        .arg("console")
        .arg("--config")
        .arg(config)
        .args(extra)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn wavegen console");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(input.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("wait for wavegen")
}

// ---------------------------------------------------------------------------
// `wavegen console`
// ---------------------------------------------------------------------------

#[test]
fn console_start_up_banner() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "");
    let output = run_console(&config, &[], "");

    assert!(output.status.success(), "console failed: {output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Commands are:"));
    assert!(stdout.contains("Waveform choices are:"));
    assert!(stdout.contains("Sample rate is 500 KHz, 250 Ksamples"));
    assert!(stdout.contains("Command: "));
}

#[test]
fn console_runs_a_session() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "");
    let output = run_console(
        &config,
        &[],
        "rate 10k\nbuffer 1000\nadd sine 100 0.5 0\nadd 2k\n",
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Sample rate is 10 KHz, 250 Ksamples"), "{stdout}");
    assert!(stdout.contains("Buffer Parameters:"));
    assert!(stdout.contains("  size         1000 samples"));
    assert!(stdout.contains("Sine waveform"));
    assert!(stdout.contains("  amplitude 0.500"));
    assert!(stdout.contains("Sine at 0 KHz ampl  500mv (phase 0 %)"), "{stdout}");
    assert!(stdout.contains("Sine at 2 KHz ampl  500mv (phase 0 %)"), "{stdout}");
}

#[test]
fn console_survives_bad_input() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "");
    let output = run_console(
        &config,
        &[],
        "frobnicate\r\nbuffer 0\r\nrate zero\r\nadd sawtoothsawtoothsawtooth\r\n",
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.matches("Commands are:").count() >= 2);
    assert!(stdout.contains("out of range (1 to 250000 samples)"), "{stdout}");
    assert!(stdout.contains("invalid frequency 'zero'"), "{stdout}");
    assert!(stdout.contains("argument too long"), "{stdout}");
}

#[test]
fn console_flags_override_config() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "[engine]\nsample_rate = 8000\n");
    let output = run_console(&config, &["--rate", "48k", "--capacity", "4000"], "buffer\n");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Sample rate is 48 KHz, 4 Ksamples"), "{stdout}");
    assert!(stdout.contains("  max size     4000 samples"));
}

#[test]
fn console_reads_prompt_from_config() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "[console]\nprompt = \"wg> \"\n");
    let output = run_console(&config, &[], "help\n");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("wg> "));
    assert!(!stdout.contains("Command: "));
}

#[test]
fn console_rejects_invalid_config() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "[engine]\ncapacity = 0\n");
    let output = run_console(&config, &[], "");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("engine.capacity"), "{stderr}");
}

#[test]
fn console_rejects_zero_rate_flag() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "");
    let output = run_console(&config, &["--rate", "0"], "");
    assert!(!output.status.success());
}

#[test]
fn console_rejects_oversized_capacity_flag() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "");
    let output = run_console(&config, &["--capacity", "100000000000"], "");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("engine.capacity"), "{stderr}");
}

#[test]
fn console_warns_when_rate_exceeds_master_clock() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "");
    let output = run_console(&config, &[], "rate 300000k\n");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("above master clock"), "{stderr}");
}

// ---------------------------------------------------------------------------
// `wavegen info`
// ---------------------------------------------------------------------------

#[test]
fn info_prints_timer_and_commands() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), "");
    let output = wavegen_bin()
        .arg("info")
        .arg("--config")
        .arg(&config)
        .output()
        .expect("failed to run wavegen info");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Timer:       period 399 (500000 Hz achieved)"), "{stdout}");
    assert!(stdout.contains("[engine]"));
    assert!(stdout.contains("master_clock_hz = 200000000"));
    for name in ["help", "clear", "add", "rate", "buffer"] {
        assert!(stdout.contains(name), "missing command '{name}'");
    }
    for name in ["Sine", "Sawtooth", "Square", "Triangle"] {
        assert!(stdout.contains(name), "missing waveform '{name}'");
    }
}

#[test]
fn info_missing_explicit_config_fails() {
    let output = wavegen_bin()
        .args(["info", "--config", "/definitely/not/here/wavegen.toml"])
        .output()
        .expect("failed to run wavegen info");
    assert!(!output.status.success());
}
