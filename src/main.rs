//! copper-pour-problem: copper pour problem extraction from circuit JSON
//!
//! Reads a circuit JSON board design and writes one solver-ready pour
//! problem per requested net.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use copper_pour_problem::circuit::{Circuit, Layer};
use copper_pour_problem::config::{self, Config};
use copper_pour_problem::connectivity::ConnectivityMap;
use copper_pour_problem::error::Error;
use copper_pour_problem::pour::{build_problems, PourRequest, Problem};

/// Extracts copper pour solver problems from circuit JSON.
///
/// Each `--net` (or each entry of `--pours`) yields one problem with the
/// pads on the pour layer and one pour region.
#[derive(Parser, Debug)]
#[command(name = "copper-pour-problem")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the circuit JSON file
    #[arg(value_name = "CIRCUIT_JSON")]
    circuit: PathBuf,

    /// Net to pour (repeatable)
    #[arg(short, long = "net", value_name = "NAME", required_unless_present = "pours")]
    nets: Vec<String>,

    /// JSON file with an array of pour requests
    #[arg(long, value_name = "FILE")]
    pours: Option<PathBuf>,

    /// Pour layer (top, bottom, inner1..inner6)
    #[arg(short, long, value_parser = parse_layer)]
    layer: Option<Layer>,

    /// Clearance around pads of other nets in mm
    #[arg(long)]
    pad_margin: Option<f64>,

    /// Clearance around traces of other nets in mm
    #[arg(long)]
    trace_margin: Option<f64>,

    /// Clearance from the board edge in mm
    #[arg(long)]
    board_edge_margin: Option<f64>,

    /// Clearance around cutouts in mm
    #[arg(long)]
    cutout_margin: Option<f64>,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long, value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long)]
    quiet: bool,
}

fn parse_layer(s: &str) -> Result<Layer, String> {
    Layer::parse(s).ok_or_else(|| format!("unknown layer '{s}'"))
}

/// Determines the log level from CLI arguments.
#[allow(clippy::match_same_arms)] // Explicit "warn" arm for clarity
fn get_log_level(verbose: u8, quiet: bool, config_level: &str) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => match config_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN, // Default to warn for unknown levels
        },
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialises the tracing subscriber for logging.
fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Collects pour requests from `--pours` and `--net`, filling unset values
/// from the configuration.
fn collect_requests(args: &Args, cfg: &Config) -> Result<Vec<PourRequest>, Error> {
    let mut requests = match &args.pours {
        Some(path) => read_requests(path)?,
        None => Vec::new(),
    };

    let defaults = &cfg.pour;
    requests.extend(args.nets.iter().map(|net| PourRequest {
        layer: args.layer.unwrap_or_else(|| defaults.layer()),
        net_name: net.clone(),
        pad_margin: args.pad_margin.unwrap_or(defaults.pad_margin),
        trace_margin: args.trace_margin.unwrap_or(defaults.trace_margin),
        board_edge_margin: Some(args.board_edge_margin.unwrap_or(defaults.board_edge_margin)),
        cutout_margin: args.cutout_margin.or(defaults.cutout_margin),
        outline: None,
    }));

    Ok(requests)
}

fn read_requests(path: &Path) -> Result<Vec<PourRequest>, Error> {
    let contents = std::fs::read_to_string(path).map_err(|e| Error::RequestsRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&contents).map_err(|e| Error::RequestsParse {
        path: path.to_path_buf(),
        source: e,
    })
}

fn write_problems(problems: &[Problem], output: Option<&Path>) -> Result<(), Error> {
    let display_path = output.map_or_else(|| PathBuf::from("-"), Path::to_path_buf);
    let to_output_error = |source: std::io::Error| Error::Output {
        path: display_path.clone(),
        source,
    };

    let json =
        serde_json::to_string_pretty(problems).map_err(|source| Error::Serialise { source })?;

    match output {
        Some(path) => std::fs::write(path, json + "\n").map_err(to_output_error),
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").map_err(to_output_error)
        }
    }
}

fn run(args: &Args, cfg: &Config) -> Result<(), Error> {
    let circuit = Circuit::read(&args.circuit)?;
    let requests = collect_requests(args, cfg)?;
    let resolver = ConnectivityMap::from_circuit(&circuit);

    info!(
        requests = requests.len(),
        nets = resolver.net_count(),
        "Building pour problems"
    );

    let problems = build_problems(&circuit, &requests, &resolver)?;
    write_problems(&problems, args.output.as_deref())
}

/// Returns the GPL notice shown on start-up.
fn license_notice() -> String {
    format!(
        "copper-pour-problem {}  Copyright (C) 2026  The Embedded Society\n\
         This program comes with ABSOLUTELY NO WARRANTY.\n\
         This is free software, licensed under GPL-3.0-or-later.\n\
         Source: {}\n",
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_REPOSITORY")
    )
}

/// Entry point for the copper-pour-problem tool.
fn main() -> ExitCode {
    let args = Args::parse();

    // Load configuration
    let cfg = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Initialise logging
    let log_level = get_log_level(args.verbose, args.quiet, &cfg.logging.level);
    init_tracing(log_level);

    // Display GPL license notice (required by GPLv3 Section 5d)
    eprintln!("{}", license_notice());

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting copper-pour-problem"
    );

    match run(&args, &cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Conversion failed");
            ExitCode::FAILURE
        }
    }
}
