//! End-to-end runs of the `load-sim` binary.

use std::path::Path;
use std::process::{Command, Output};

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_load-sim"))
        .args(args)
        .output()
        .expect("load-sim process should run")
}

fn run_ok(args: &[&str]) -> String {
    let output = run_cli(args);
    assert!(
        output.status.success(),
        "run failed for {args:?}: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout should be valid UTF-8")
}

fn parse_metric(stdout: &str, label: &str, unit: &str) -> f64 {
    let line = stdout
        .lines()
        .find(|line| line.trim_start().starts_with(label))
        .unwrap_or_else(|| panic!("missing summary line `{label}` in output: {stdout}"));

    let raw = line
        .split_once(':')
        .map(|(_, right)| right.trim())
        .unwrap_or_else(|| panic!("invalid summary format for line `{line}`"));

    let value = raw
        .split_once(unit)
        .map(|(v, _)| v.trim())
        .unwrap_or_else(|| panic!("missing unit `{unit}` in line `{line}`"));

    value
        .parse::<f64>()
        .unwrap_or_else(|_| panic!("invalid number `{value}` in line `{line}`"))
}

fn out_dir(dir: &Path) -> &str {
    dir.to_str().expect("tempdir path is UTF-8")
}

#[test]
fn quick_preset_writes_tables_and_summary() {
    let dir = tempfile::tempdir().expect("tempdir");
    let stdout = run_ok(&["--preset", "quick", "--outputs", out_dir(dir.path())]);

    let annual = parse_metric(&stdout, "Annual energy:", "kWh");
    assert!(annual > 0.0);
    let peak = parse_metric(&stdout, "Peak P90 load:", "kW");
    assert!(peak > 0.0);

    for name in [
        "mean_system_load_values.csv",
        "standard_deviation_system_load_values.csv",
        "percentage_variability_system_load_values.csv",
        "90_percentile_system_load_values.csv",
    ] {
        assert!(dir.path().join(name).is_file(), "missing output {name}");
    }
}

#[test]
fn same_seed_gives_same_summary_and_seed_override_changes_it() {
    let a = tempfile::tempdir().expect("tempdir");
    let b = tempfile::tempdir().expect("tempdir");
    let c = tempfile::tempdir().expect("tempdir");

    let first = run_ok(&["--preset", "quick", "--outputs", out_dir(a.path())]);
    let second = run_ok(&["--preset", "quick", "--outputs", out_dir(b.path())]);
    assert_eq!(first, second);

    let reseeded = run_ok(&[
        "--preset",
        "quick",
        "--seed",
        "1234",
        "--outputs",
        out_dir(c.path()),
    ]);
    assert_ne!(first, reseeded);
}

#[test]
fn optional_exports_are_written() {
    let dir = tempfile::tempdir().expect("tempdir");
    run_ok(&[
        "--preset",
        "quick",
        "--trials",
        "5",
        "--percentile",
        "95",
        "--daily",
        "--homer",
        "percentile",
        "--outputs",
        out_dir(dir.path()),
    ]);
    assert!(dir.path().join("95_percentile_system_load_values.csv").is_file());
    assert!(dir.path().join("daily_energy.csv").is_file());
    assert!(dir.path().join("homer_percentile_load.txt").is_file());
    assert!(!dir.path().join("detailed_load.csv").exists());
}

#[test]
fn shipped_scenario_runs() {
    let dir = tempfile::tempdir().expect("tempdir");
    let stdout = run_ok(&[
        "--scenario",
        "scenarios/household.toml",
        "--outputs",
        out_dir(dir.path()),
    ]);
    assert!(parse_metric(&stdout, "Annual energy:", "kWh") > 0.0);
}

#[test]
fn invalid_arguments_fail() {
    assert!(!run_cli(&["--preset", "nope"]).status.success());
    assert!(!run_cli(&["--trials", "0"]).status.success());
    assert!(!run_cli(&["--percentile", "150"]).status.success());
    assert!(!run_cli(&["--bogus"]).status.success());
    assert!(!run_cli(&["--homer", "variability"]).status.success());
}

#[test]
fn help_succeeds() {
    assert!(run_cli(&["--help"]).status.success());
}
