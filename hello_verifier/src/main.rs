//! `hello-verifier` entry-point: load config, run the subcommand, report.

use std::io;
use std::process::ExitCode;

use clap::Parser;

use hello_verifier::cli::{CommandLine, execute, resolve_config, write_verdict};
use hello_verifier::error::Result;
use hello_verifier::logging;

fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;
    run().map_err(color_eyre::eyre::Report::from)
}

fn run() -> Result<ExitCode> {
    let cli = CommandLine::parse();
    let config = resolve_config(&cli)?;
    logging::init(&config.log_level)?;
    tracing::debug!(?config, "resolved configuration");
    let (verdict, success) = execute(&cli.command, &config)?;
    write_verdict(&mut io::stdout().lock(), &verdict)?;
    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
