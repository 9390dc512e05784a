//! BESS dispatch simulator entry point: CLI wiring and scenario execution.

use std::path::Path;
use std::process;

use bess_sim::config::ScenarioConfig;
use bess_sim::io::export::export_csv;
use bess_sim::runner::run_scenario;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    seed_override: Option<u64>,
    csv_out: Option<String>,
}

fn print_help() {
    eprintln!("bess-sim — Battery storage dispatch simulator");
    eprintln!();
    eprintln!("Usage: bess-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>   Load scenario from TOML config file");
    eprintln!(
        "  --preset <name>     Use a built-in preset ({})",
        ScenarioConfig::PRESETS.join(", ")
    );
    eprintln!("  --seed <u64>        Override random seed");
    eprintln!("  --csv-out <path>    Export per-step results to CSV");
    eprintln!("  --help              Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the baseline preset is used.");
    eprintln!("Log verbosity follows RUST_LOG (default: bess_sim=info).");
}

fn next_value<'a>(args: &'a [String], i: usize, flag: &str, kind: &str) -> &'a str {
    match args.get(i) {
        Some(v) => v.as_str(),
        None => {
            eprintln!("error: {flag} requires a {kind} argument");
            process::exit(1);
        }
    }
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        seed_override: None,
        csv_out: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--scenario" => {
                i += 1;
                cli.scenario_path = Some(next_value(&args, i, "--scenario", "path").to_string());
            }
            "--preset" => {
                i += 1;
                cli.preset = Some(next_value(&args, i, "--preset", "name").to_string());
            }
            "--seed" => {
                i += 1;
                let raw = next_value(&args, i, "--seed", "u64");
                if let Ok(s) = raw.parse::<u64>() {
                    cli.seed_override = Some(s);
                } else {
                    eprintln!("error: --seed value \"{raw}\" is not a valid u64");
                    process::exit(1);
                }
            }
            "--csv-out" => {
                i += 1;
                cli.csv_out = Some(next_value(&args, i, "--csv-out", "path").to_string());
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    if cli.scenario_path.is_some() && cli.preset.is_some() {
        eprintln!("error: --scenario and --preset are mutually exclusive");
        process::exit(1);
    }

    cli
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bess_sim=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = parse_args();

    // --scenario takes priority, then --preset, then baseline default
    let loaded = if let Some(ref path) = cli.scenario_path {
        ScenarioConfig::from_toml_file(Path::new(path))
    } else if let Some(ref name) = cli.preset {
        ScenarioConfig::from_preset(name)
    } else {
        Ok(ScenarioConfig::baseline())
    };
    let mut scenario = match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    if let Some(seed) = cli.seed_override {
        scenario.simulation.seed = seed;
    }

    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let run = match run_scenario(&scenario) {
        Ok(run) => run,
        Err(e) => {
            error!(%e, "simulation failed");
            process::exit(1);
        }
    };

    println!("{}", run.summary);

    if let Some(ref path) = cli.csv_out {
        if let Err(e) = export_csv(&run.view, Path::new(path)) {
            error!(%e, path = %path, "failed to write CSV");
            process::exit(1);
        }
        info!(path = %path, "results written");
    }
}
