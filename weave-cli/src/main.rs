use std::{
    env,
    io::{self, IsTerminal},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use tracing::{error, info};
use weave::{Configs, Error, HttpFetcher, Parser as _, Report, Weaver};
use weave_cli::{LogConfig, find_config, init_logging};

/// Turns translation spreadsheets into Android, iOS, and Web resources.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file. Defaults to weave-config.json in the current or
    /// parent directory.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(
        &LogConfig::from_verbosity(args.verbose, args.quiet).with_ansi(io::stderr().is_terminal()),
    );

    match run(&args) {
        Ok(report) => {
            info!(
                "{} warnings, {} files written",
                report.warnings.len(),
                report.written.len()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<Report, Error> {
    let path = find_config(args.config.as_deref(), &env::current_dir()?)?;
    info!("Using config {}", path.display());

    let configs = Configs::read_from(&path)?;
    Weaver::new(configs, HttpFetcher::new()?)?.weave()
}
