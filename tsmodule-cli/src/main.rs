//! tsmodule CLI - Command line interface
//!
//! Drives the resolve and load hooks the way a host loader would, printing
//! what each hook decides.

use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::process;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tsmodule_api::{
    Environment, FormatOutcome, HookError, LoadOutcome, ModuleHooks, Phase, Resolution,
    ResolutionContext, Url,
};

mod config;
mod logging;
mod platform;

use crate::config::{parse_level, parse_phase_level, LogConfig};
use crate::logging::{LogFormat, CLI_TARGET};
use crate::platform::print_error;

#[derive(Parser)]
#[command(
    name = "tsmodule",
    about = "Resolve and load TypeScript modules the way the loader hooks do",
    version
)]
struct Cli {
    /// Configuration file (default: $TSMODULE_CONFIG, then ./tsmodule.config.json)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level: silent, error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "warn", value_parser = parse_level)]
    log_level: LevelFilter,

    /// Per-phase log level, e.g. `resolve=trace` (repeatable)
    #[arg(long = "log-phase", global = true, value_name = "PHASE=LEVEL", value_parser = parse_phase_level)]
    log_phases: Vec<(Phase, LevelFilter)>,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value = "compact")]
    log_format: LogFormat,

    /// Also append logs to this file
    #[arg(long, global = true, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Machine-readable output
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve a specifier, relative to an importing file or the working directory
    Resolve {
        specifier: String,
        /// Importing file
        #[arg(long, value_name = "IMPORTER")]
        from: Option<PathBuf>,
    },
    /// Load a file and print the transformed code
    Load { path: PathBuf },
    /// Print the output kind of a file (legacy format hook)
    Format { path: PathBuf },
    /// Print the finalized configuration
    Config,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Hook(#[from] HookError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("'{0}' cannot be expressed as a file URL")]
    InvalidPath(PathBuf),

    #[error("Cannot serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() {
    let cli = Cli::parse();

    let mut log_config = LogConfig::with_global(cli.log_level);
    for (phase, level) in &cli.log_phases {
        log_config.set(*phase, *level);
    }
    if let Err(e) = logging::init(&log_config, cli.log_format, cli.log_file.as_deref()) {
        eprintln!("Error: cannot initialize logging: {e}");
        process::exit(1);
    }

    match run(&cli) {
        Ok(output) => println!("{output}"),
        Err(CliError::Hook(e)) => {
            print_error(&e, cli.json);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<String, CliError> {
    let cwd = std::env::current_dir()?;
    let environment = match &cli.config {
        Some(path) => Environment::new(&cwd).with_config_path(cwd.join(path)),
        None => Environment::discover(&cwd),
    };
    info!(target: CLI_TARGET, cwd = %cwd.display(), config = ?environment.config_path, "starting");
    let hooks = ModuleHooks::new(environment);

    match &cli.command {
        Command::Resolve { specifier, from } => {
            let context = match from {
                Some(importer) => ResolutionContext::from_importer(file_url(&cwd, importer)?),
                None => ResolutionContext::entry(),
            };
            let resolution = hooks.resolve(specifier, &context)?;
            Ok(render_resolution(&resolution, cli.json))
        }
        Command::Load { path } => {
            let outcome = hooks.load(&file_url(&cwd, path)?)?;
            render_load(&outcome, cli.json)
        }
        Command::Format { path } => {
            let outcome = hooks.inspect_format(&file_url(&cwd, path)?)?;
            Ok(render_format(outcome, cli.json))
        }
        Command::Config => Ok(serde_json::to_string_pretty(hooks.get_config()?)?),
    }
}

fn file_url(cwd: &Path, path: &Path) -> Result<Url, CliError> {
    let absolute = cwd.join(path);
    Url::from_file_path(&absolute).map_err(|()| CliError::InvalidPath(absolute))
}

fn render_resolution(resolution: &Resolution, json: bool) -> String {
    match (resolution, json) {
        (Resolution::Resolved(url), false) => url.to_string(),
        (Resolution::Delegate(_), false) => "delegate".to_string(),
        (Resolution::Resolved(url), true) => json!({ "resolved": url.as_str() }).to_string(),
        (Resolution::Delegate(reason), true) => {
            json!({ "delegate": reason.to_string() }).to_string()
        }
    }
}

fn render_load(outcome: &LoadOutcome, json: bool) -> Result<String, CliError> {
    Ok(match (outcome, json) {
        (LoadOutcome::Loaded(result), false) => result.code.clone(),
        (LoadOutcome::Delegate, false) => "delegate".to_string(),
        (LoadOutcome::Loaded(result), true) => serde_json::to_string(&json!({
            "outputKind": result.output_kind,
            "code": result.code,
        }))?,
        (LoadOutcome::Delegate, true) => json!({ "delegate": true }).to_string(),
    })
}

fn render_format(outcome: FormatOutcome, json: bool) -> String {
    match (outcome, json) {
        (FormatOutcome::Format(kind), false) => kind.to_string(),
        (FormatOutcome::Delegate, false) => "delegate".to_string(),
        (FormatOutcome::Format(kind), true) => json!({ "format": kind }).to_string(),
        (FormatOutcome::Delegate, true) => json!({ "delegate": true }).to_string(),
    }
}
