use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use exn::ResultExt;
use rustic_hal::HalResource;
use rustic_hal_cli::commands;
use rustic_hal_cli::error::{ErrorKind, Result};
use rustic_hal_cli::input::{describe, read_resource};
use rustic_hal_config::{Config, OutputStyle};
use tracing_subscriber::EnvFilter;

/// Inspect and normalise HAL (Hypertext Application Language) documents.
#[derive(Debug, Parser)]
#[command(name = "hal", version, about)]
struct Cli {
    /// Configuration file (defaults to the platform configuration directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every link as `rel<TAB>href`
    Links {
        /// Input document, `-` or omitted for stdin
        input: Option<PathBuf>,
    },
    /// List embedded rels with their resource count and self links
    Embedded {
        /// Input document, `-` or omitted for stdin
        input: Option<PathBuf>,
    },
    /// Parse and re-emit the document, forcing configured rels into arrays
    Normalize {
        /// Input document, `-` or omitted for stdin
        input: Option<PathBuf>,
        /// Write a single line regardless of the configured output style
        #[arg(long)]
        compact: bool,
    },
    /// Print the resource payload, or one property of it
    Data {
        /// Input document, `-` or omitted for stdin
        input: Option<PathBuf>,
        /// Payload property to print
        #[arg(short, long)]
        key: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let stdout = std::io::stdout();
    report(run(cli, &mut stdout.lock()))
}

/// Map the outcome to the process exit code, printing the error tree on failure.
fn report(result: Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        },
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).with_target(false).init();
}

fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let config = Config::load(cli.config.as_deref()).or_raise(|| ErrorKind::Config)?;
    match cli.command {
        Command::Links { input } => {
            let resource = load(input)?;
            commands::links(&resource, &config, out)?;
        },
        Command::Embedded { input } => {
            let resource = load(input)?;
            commands::embedded(&resource, out)?;
        },
        Command::Normalize { input, compact } => {
            let style = if compact { OutputStyle::Compact } else { config.output };
            commands::normalize(load(input)?, &config, style, out)?;
        },
        Command::Data { input, key } => {
            let resource = load(input)?;
            commands::data(&resource, key.as_deref(), config.output, out)?;
        },
    }
    out.flush().or_raise(|| ErrorKind::Output)
}

fn load(input: Option<PathBuf>) -> Result<HalResource> {
    let resource = read_resource(input.as_deref())?;
    tracing::debug!(input = %describe(input.as_deref()).display(), "HAL document parsed");
    Ok(resource)
}
