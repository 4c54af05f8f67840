//! Tests for configuration layering.

use super::*;
use anyhow::{Result, ensure};
use rstest::rstest;
use std::convert::Infallible;
use test_helpers::figment::JailSetup;

#[rstest]
fn defaults_apply_without_file_or_env() -> Result<()> {
    let config = JailSetup::new().run(|| load_config(None))?;
    ensure!(config == VerifierConfig::default(), "unexpected config {config:?}");
    ensure!(config.case_name == "TestHelloWorld", "default case name");
    Ok(())
}

#[rstest]
fn discovered_file_overrides_defaults() -> Result<()> {
    let config = JailSetup::new()
        .config(
            r#"
                case_name = "FromFile"
                result_path = "out/result.json"
                allow_skip = true
            "#,
        )
        .run(|| load_config(None))?;
    ensure!(config.case_name == "FromFile", "file should set case name");
    ensure!(
        config.result_path.as_deref() == Some(Utf8Path::new("out/result.json")),
        "file should set result path"
    );
    ensure!(config.allow_skip, "file should enable allow_skip");
    ensure!(config.log_level == "info", "unset keys keep defaults");
    Ok(())
}

#[rstest]
fn discovers_file_in_ancestor_directory() -> Result<()> {
    let config = JailSetup::new()
        .config("case_name = \"FromParent\"\n")
        .cwd("nested/deeper")
        .run(|| load_config(None))?;
    ensure!(
        config.case_name == "FromParent",
        "file in an ancestor directory should be found, got {config:?}"
    );
    Ok(())
}

#[rstest]
fn environment_overrides_file() -> Result<()> {
    let config = JailSetup::new()
        .file("custom.toml", "case_name = \"FromFile\"\nlog_level = \"warn\"\n")
        .setting("case_name", "FromEnv")
        .run(|| load_config(Some(Utf8Path::new("custom.toml"))))?;
    ensure!(config.case_name == "FromEnv", "env should win over file");
    ensure!(config.log_level == "warn", "file value should survive");
    Ok(())
}

#[rstest]
fn explicit_missing_file_is_an_error() -> Result<()> {
    let outcome = JailSetup::new()
        .run(|| Ok::<_, Infallible>(load_config(Some(Utf8Path::new("absent.toml")))))?;
    ensure!(
        matches!(outcome, Err(HelloVerifierError::MissingConfig(ref path)) if path == "absent.toml"),
        "expected missing config error, got {outcome:?}"
    );
    Ok(())
}

#[rstest]
fn malformed_file_reports_configuration_error() -> Result<()> {
    let outcome = JailSetup::new()
        .config("allow_skip = \"sometimes\"")
        .run(|| Ok::<_, Infallible>(load_config(None)))?;
    ensure!(
        matches!(outcome, Err(HelloVerifierError::Configuration(_))),
        "expected configuration error, got {outcome:?}"
    );
    Ok(())
}
