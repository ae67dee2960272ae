//! `iosched` - run a disk scheduling simulation over a request trace
//!
//! ```text
//! iosched [-v] [--json] [--one-per-tick] [-s <N|S|L|C|F>] <inputfile>
//! ```
//!
//! Prints one line per request followed by the `SUM:` line. Diagnostics go to
//! stderr through `env_logger`; `RUST_LOG` is honoured unless `-v` is given.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use env_logger::Builder;
use iosched_core_rs::stats::render_report;
use iosched_core_rs::{
    load_trace, AdmissionMode, Orchestrator, OrchestratorConfig, PolicyError, PolicyKind,
    SimulationError, StateSnapshot, TraceError,
};
use log::LevelFilter;
use thiserror::Error;

const USAGE: &str = "usage: iosched [-v] [--json] [--one-per-tick] [-s <N|S|L|C|F>] <inputfile>";

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Policy(#[from] PolicyError),

    #[error(transparent)]
    Trace(#[from] TraceError),

    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

/// Parsed command line
#[derive(Debug, PartialEq)]
struct Args {
    policy: PolicyKind,
    admission: AdmissionMode,
    verbose: bool,
    json: bool,
    input: PathBuf,
}

fn parse_args<I>(args: I) -> Result<Args, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut policy = PolicyKind::default();
    let mut admission = AdmissionMode::default();
    let mut verbose = false;
    let mut json = false;
    let mut input: Option<PathBuf> = None;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-v" | "--verbose" => verbose = true,
            "--json" => json = true,
            "--one-per-tick" => admission = AdmissionMode::OnePerTick,
            "-s" => {
                let code = args
                    .next()
                    .ok_or_else(|| CliError::Usage("option -s requires a policy letter".into()))?;
                policy = code.parse()?;
            }
            _ if arg.starts_with("-s") => policy = arg["-s".len()..].parse()?,
            _ if arg.starts_with('-') && arg.len() > 1 => {
                return Err(CliError::Usage(format!("unknown option '{}'", arg)));
            }
            _ => {
                if input.replace(PathBuf::from(&arg)).is_some() {
                    return Err(CliError::Usage(format!("unexpected argument '{}'", arg)));
                }
            }
        }
    }

    let input = input.ok_or_else(|| CliError::Usage("missing input file".into()))?;
    Ok(Args {
        policy,
        admission,
        verbose,
        json,
        input,
    })
}

fn init_logger(verbose: bool) {
    let mut builder = Builder::from_default_env();
    builder.format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

fn run(args: &Args) -> Result<String, CliError> {
    let requests = load_trace(&args.input)?;
    let config = OrchestratorConfig {
        policy: args.policy,
        admission: args.admission,
        ..OrchestratorConfig::default()
    };

    let outcome = Orchestrator::new(config, requests)?.run()?;
    let summary = outcome.summary();
    let mut out = render_report(outcome.completed(), summary.as_ref());

    if args.json {
        let snapshot = StateSnapshot::capture(&outcome)?;
        out.push_str(&snapshot.to_json()?);
        out.push('\n');
    }
    Ok(out)
}

fn main() -> ExitCode {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("iosched: {}", e);
            eprintln!("{}", USAGE);
            return ExitCode::FAILURE;
        }
    };
    init_logger(args.verbose);

    match run(&args) {
        Ok(report) => {
            print!("{}", report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::debug!("run failed: {:?}", e);
            eprintln!("iosched: {}", e);
            ExitCode::FAILURE
        }
    }
}
