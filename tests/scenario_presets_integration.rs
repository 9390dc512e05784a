use std::process::Command;

#[derive(Debug)]
struct Report {
    revenue: f64,
    loss_mwh: f64,
}

#[test]
fn presets_run_via_cli_and_produce_distinct_dynamics() {
    let baseline = run_and_parse(&["--preset", "baseline"]);
    let high_solar = run_and_parse(&["--preset", "high_solar"]);
    let narrow_band = run_and_parse(&["--preset", "narrow_band"]);

    assert!(
        (baseline.revenue - high_solar.revenue).abs() > 1.0,
        "expected baseline and high_solar revenue to differ: baseline={:.3}, high_solar={:.3}",
        baseline.revenue,
        high_solar.revenue
    );
    assert!(
        (baseline.loss_mwh - narrow_band.loss_mwh).abs() > 0.01,
        "expected baseline and narrow_band loss to differ: baseline={:.3}, narrow_band={:.3}",
        baseline.loss_mwh,
        narrow_band.loss_mwh
    );
}

#[test]
fn seed_override_changes_results() {
    let a = run_and_parse(&["--preset", "baseline", "--seed", "1"]);
    let b = run_and_parse(&["--preset", "baseline", "--seed", "2"]);
    assert!((a.revenue - b.revenue).abs() > 1e-6);
}

#[test]
fn unknown_preset_fails() {
    let output = Command::new(env!("CARGO_BIN_EXE_bess-sim"))
        .args(["--preset", "nope"])
        .output()
        .expect("bess-sim process should run");
    assert!(!output.status.success());
}

#[test]
fn csv_export_writes_one_row_per_step() {
    let path = std::env::temp_dir().join(format!("bess-sim-{}.csv", std::process::id()));
    let path_str = path.to_str().expect("utf-8 temp path");
    run_and_parse(&["--preset", "baseline", "--csv-out", path_str]);

    let content = std::fs::read_to_string(&path).expect("csv should exist");
    // 1 header + 7 days * 24 hours
    assert_eq!(content.lines().count(), 1 + 7 * 24);
    let _ = std::fs::remove_file(&path);
}

fn run_and_parse(args: &[&str]) -> Report {
    let output = Command::new(env!("CARGO_BIN_EXE_bess-sim"))
        .args(args)
        .output()
        .expect("bess-sim process should run");

    assert!(
        output.status.success(),
        "run failed for {args:?}: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout).expect("stdout should be valid UTF-8");
    parse_report(&stdout)
}

fn parse_report(stdout: &str) -> Report {
    Report {
        revenue: parse_value(stdout, "Revenue:"),
        loss_mwh: parse_value(stdout, "Round-trip loss:"),
    }
}

fn parse_value(stdout: &str, label: &str) -> f64 {
    let line = stdout
        .lines()
        .find(|l| l.starts_with(label))
        .unwrap_or_else(|| panic!("missing \"{label}\" line in output:\n{stdout}"));
    line[label.len()..]
        .split_whitespace()
        .next()
        .and_then(|v| v.parse().ok())
        .unwrap_or_else(|| panic!("unparseable \"{label}\" line: {line}"))
}
