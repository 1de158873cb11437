//! `jsmin`: minify scripts from files or stdin.

mod cli;

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(cli.verbose))),
        )
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    match cli::run(&cli) {
        Ok(summary) if summary.failed == 0 => ExitCode::SUCCESS,
        Ok(summary) => {
            tracing::error!(
                failed = summary.failed,
                processed = summary.processed,
                "{} of {} input(s) failed",
                summary.failed,
                summary.processed
            );
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn directive_for_verbosity(v: u8) -> &'static str {
    // The binary's module path is `jsmin`; diagnostics are logged from `jm_core`.
    match v {
        0 => "jsmin=warn,jm_core=error,jm_minifier=warn",
        1 => "jsmin=debug,jm_core=debug,jm_minifier=debug",
        _ => "jsmin=trace,jm_core=trace,jm_minifier=trace",
    }
}
