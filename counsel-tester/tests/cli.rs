use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "counsel-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_list_scenarios_writes_output() {
    let exe = env!("CARGO_BIN_EXE_counsel-tester");
    let output_path = temp_path("list");
    let status = Command::new(exe)
        .args(["--list-scenarios", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Available scenarios"));
    assert!(content.contains("decline-then-retry"));
}

#[test]
fn cli_runs_all_scenarios_with_markdown_report() {
    let exe = env!("CARGO_BIN_EXE_counsel-tester");
    let output_path = temp_path("run");
    let output = Command::new(exe)
        .args([
            "--report",
            "markdown",
            "--seeds",
            "1,0x2a",
            "--iterations",
            "2",
            "--output",
        ])
        .arg(&output_path)
        .output()
        .expect("run cli");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Counselling Booking Tester"));
    let report = std::fs::read_to_string(output_path).expect("read report");
    assert!(report.contains("# Booking Scenario Results"));
    assert!(report.contains("- **Failed**: 0"));
    assert!(report.contains("marriage-booking (seed 42)"));
}

#[test]
fn cli_fails_on_unknown_scenario_only_run() {
    let exe = env!("CARGO_BIN_EXE_counsel-tester");
    let output = Command::new(exe)
        .args(["--scenarios", "no-such-thing", "--report", "json"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown scenario"));
}

#[test]
fn cli_rejects_bad_seeds() {
    let exe = env!("CARGO_BIN_EXE_counsel-tester");
    let output = Command::new(exe)
        .args(["--seeds", "abc"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid seed"));
}
