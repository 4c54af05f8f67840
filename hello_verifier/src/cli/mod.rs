//! Command-line surface for `hello-verifier`.
//!
//! `run` executes the Hello World verification case; `directive` inspects
//! the harness directives of a source file. Both produce a [`Verdict`] whose
//! lines go to standard output and whose [`FileResult`] can be written as JSON
//! for the harness.
use std::io::{self, Write};
use std::time::Instant;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{ArgAction, Args, Parser, Subcommand};

use crate::config::{VerifierConfig, load_config};
use crate::directive::{UNITTEST, read_attributes, resolve_unit_test_from_env};
use crate::error::Result;
use crate::report::{FileResult, ResultStatus, VerificationResult, write_result};
use crate::verification::VerificationCase;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "hello-verifier",
    bin_name = "hello-verifier",
    about = "Self-checking Hello World verification unit",
    version
)]
pub struct CommandLine {
    /// Overrides configuration discovery with an explicit file path.
    #[arg(
        long = "config",
        short = 'c',
        value_name = "PATH",
        global = true,
        help = "Path to the configuration file"
    )]
    pub config_path: Option<Utf8PathBuf>,
    /// Overrides the configured log filter.
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,
    /// Selected workflow to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Runs the Hello World verification case.
    #[command(name = "run")]
    Run(RunCommand),
    /// Lists the harness directives of a file and resolves `UNITTEST`.
    #[command(name = "directive")]
    Directive(DirectiveCommand),
}

/// Options shared by every subcommand that produces a result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct ResultArgs {
    /// Writes the JSON result to this path.
    #[arg(long = "write-result", value_name = "PATH")]
    pub write_result: Option<Utf8PathBuf>,
    /// Treats skipped verifications as acceptable.
    #[arg(long = "allow-skip", action = ArgAction::SetTrue)]
    pub allow_skip: bool,
}

/// Arguments for `run`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct RunCommand {
    /// Name reported for the case.
    #[arg(long = "name", value_name = "NAME")]
    pub name: Option<String>,
    /// Result handling.
    #[command(flatten)]
    pub result: ResultArgs,
}

/// Arguments for `directive`.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct DirectiveCommand {
    /// Source file to inspect.
    #[arg(value_name = "FILE")]
    pub file: Utf8PathBuf,
    /// Result handling.
    #[command(flatten)]
    pub result: ResultArgs,
}

impl Commands {
    const fn result_args(&self) -> &ResultArgs {
        match self {
            Self::Run(cmd) => &cmd.result,
            Self::Directive(cmd) => &cmd.result,
        }
    }
}

/// Outcome of a subcommand.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    lines: Vec<String>,
    file: FileResult,
}

impl Verdict {
    /// Human-readable report lines.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Result record for the harness.
    #[must_use]
    pub const fn file(&self) -> &FileResult {
        &self.file
    }
}

/// Resolves configuration and applies command-line overrides on top.
///
/// # Errors
///
/// Returns an error when configuration cannot be loaded.
pub fn resolve_config(cli: &CommandLine) -> Result<VerifierConfig> {
    let mut config = load_config(cli.config_path.as_deref())?;
    apply_overrides(&mut config, cli);
    Ok(config)
}

fn apply_overrides(config: &mut VerifierConfig, cli: &CommandLine) {
    if let Some(level) = &cli.log_level {
        config.log_level.clone_from(level);
    }
    if let Commands::Run(RunCommand {
        name: Some(name), ..
    }) = &cli.command
    {
        config.case_name.clone_from(name);
    }
    let result = cli.command.result_args();
    if let Some(path) = &result.write_result {
        config.result_path = Some(path.clone());
    }
    if result.allow_skip {
        config.allow_skip = true;
    }
}

/// Runs the Hello World case under the configured name.
#[must_use]
pub fn run_case(config: &VerifierConfig) -> Verdict {
    let mut case = VerificationCase::hello_world().with_name(config.case_name.clone());
    let started = Instant::now();
    let outcome = case.run();
    let elapsed = started.elapsed();
    let line = outcome.mismatch().map_or_else(
        || format!("{} {}", outcome.state(), case.name()),
        |err| format!("{} {}: {err}", outcome.state(), case.name()),
    );
    Verdict {
        lines: vec![line],
        file: FileResult::single(VerificationResult::from_outcome(
            case.name(),
            &outcome,
            elapsed,
        )),
    }
}

/// Lists the directives of `path` and resolves its `UNITTEST` outcome.
///
/// A file without a `UNITTEST` directive yields a skipped verification.
///
/// # Errors
///
/// Returns an error when `path` cannot be read.
pub fn inspect_directives(path: &Utf8Path) -> Result<Verdict> {
    let attributes = read_attributes(path)?;
    let mut lines: Vec<String> = attributes
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect();
    let resolved = resolve_unit_test_from_env(&attributes);
    if let Some(status) = resolved {
        let var = attributes.get(UNITTEST).map_or("", String::as_str);
        lines.push(format!("{UNITTEST} {var}: {status}"));
    }
    let status = resolved.unwrap_or(ResultStatus::Skipped);
    let name = path.file_name().map(String::from);
    Ok(Verdict {
        lines,
        file: FileResult::single(VerificationResult::new(
            name,
            status,
            std::time::Duration::ZERO,
        )),
    })
}

/// Executes `command`, writing the JSON result when one is configured.
///
/// Returns the verdict together with whether it counts as a success under
/// the configured skip policy.
///
/// # Errors
///
/// Returns an error when a directive file cannot be read or the result
/// cannot be written.
pub fn execute(command: &Commands, config: &VerifierConfig) -> Result<(Verdict, bool)> {
    let verdict = match command {
        Commands::Run(_) => run_case(config),
        Commands::Directive(cmd) => inspect_directives(&cmd.file)?,
    };
    if let Some(path) = &config.result_path {
        write_result(path, verdict.file())?;
    }
    let success = verdict.file().is_success(config.allow_skip);
    Ok((verdict, success))
}

/// Writes the verdict lines to `writer`.
///
/// # Errors
///
/// Returns an [`io::Error`] when writing fails.
pub fn write_verdict<W: Write>(writer: &mut W, verdict: &Verdict) -> io::Result<()> {
    for line in verdict.lines() {
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}
