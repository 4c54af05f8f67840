//! Tests for directive parsing and `UNITTEST` resolution.

use super::*;
use anyhow::{Result, ensure};
use rstest::rstest;

fn attributes_with_unittest(var: &str) -> Attributes {
    Attributes::from([(String::from(UNITTEST), var.to_owned())])
}

#[rstest]
#[case::line_comment("// competitive-verifier: UNITTEST GOTESTRESULT", "UNITTEST", "GOTESTRESULT")]
#[case::hash_comment("# verification-helper: PROBLEM https://example.com/p/1", "PROBLEM", "https://example.com/p/1")]
#[case::legacy_marker("// verify-helper: IGNORE", "IGNORE", "")]
#[case::no_space_after_colon("//competitive-verifier:STANDALONE", "STANDALONE", "")]
#[case::value_is_trimmed("// competitive-verifier: TLE   1.5   ", "TLE", "1.5")]
#[case::value_keeps_inner_spaces("// competitive-verifier: TITLE Hello  World", "TITLE", "Hello  World")]
fn parses_single_directive(#[case] line: &str, #[case] key: &str, #[case] value: &str) -> Result<()> {
    let attributes = parse_attributes(line);
    ensure!(attributes.len() == 1, "expected one attribute from {line:?}");
    ensure!(
        attributes.get(key).map(String::as_str) == Some(value),
        "unexpected value for {key}: {attributes:?}"
    );
    Ok(())
}

#[rstest]
#[case::no_marker("// just a comment")]
#[case::glued_to_word("// mycompetitive-verifier: UNITTEST X")]
#[case::missing_key("// competitive-verifier:   ")]
#[case::punctuated_key("// competitive-verifier: UNIT-TEST X")]
fn ignores_malformed_lines(#[case] line: &str) {
    assert!(parse_attributes(line).is_empty(), "{line:?} should not parse");
}

#[rstest]
fn later_keys_override_earlier_ones() {
    let text = "// competitive-verifier: UNITTEST FIRST\r\n\
                package main\r\n\
                // competitive-verifier: UNITTEST SECOND\r\n\
                // competitive-verifier: STANDALONE\r\n";
    let attributes = parse_attributes(text);
    assert_eq!(attributes.len(), 2);
    assert_eq!(attributes.get(UNITTEST).map(String::as_str), Some("SECOND"));
    assert_eq!(attributes.get("STANDALONE").map(String::as_str), Some(""));
}

#[rstest]
#[case::lone_carriage_return("// competitive-verifier: PROBLEM a\r// competitive-verifier: UNITTEST X\r")]
#[case::line_separator("// competitive-verifier: PROBLEM a\u{2028}// competitive-verifier: UNITTEST X")]
#[case::form_feed("// competitive-verifier: PROBLEM a\u{0c}// competitive-verifier: UNITTEST X\n")]
fn splits_on_every_line_break(#[case] text: &str) {
    let attributes = parse_attributes(text);
    assert_eq!(
        attributes,
        Attributes::from([
            (String::from("PROBLEM"), String::from("a")),
            (String::from(UNITTEST), String::from("X")),
        ])
    );
}

#[rstest]
#[case::unset(None, ResultStatus::Failure)]
#[case::false_lower(Some("false"), ResultStatus::Failure)]
#[case::false_upper(Some("FALSE"), ResultStatus::Failure)]
#[case::zero(Some("0"), ResultStatus::Failure)]
#[case::truthy(Some("true"), ResultStatus::Success)]
#[case::one(Some("1"), ResultStatus::Success)]
#[case::empty_value(Some(""), ResultStatus::Success)]
fn resolves_unit_test_variable(#[case] value: Option<&str>, #[case] expected: ResultStatus) {
    let attributes = attributes_with_unittest("GOTESTRESULT");
    let status = resolve_unit_test(&attributes, |var| {
        assert_eq!(var, "GOTESTRESULT");
        value.map(String::from)
    });
    assert_eq!(status, Some(expected));
}

#[rstest]
#[case::absent(Attributes::new())]
#[case::empty(attributes_with_unittest(""))]
fn skips_resolution_without_directive(#[case] attributes: Attributes) {
    let status = resolve_unit_test(&attributes, |_| panic!("lookup must not run"));
    assert_eq!(status, None);
}

#[rstest]
fn reads_directives_from_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("helloworld_test.rs");
    std::fs::write(&path, "// competitive-verifier: UNITTEST GOTESTRESULT\n\nfn main() {}\n")?;
    let utf8 = camino::Utf8PathBuf::from_path_buf(path)
        .map_err(|p| anyhow::anyhow!("non UTF-8 temp path: {}", p.display()))?;
    let attributes = read_attributes(&utf8)?;
    ensure!(
        attributes.get(UNITTEST).map(String::as_str) == Some("GOTESTRESULT"),
        "directive should be read from disk"
    );
    Ok(())
}

#[rstest]
fn reading_missing_file_reports_path() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = camino::Utf8PathBuf::from_path_buf(dir.path().join("absent.rs"))
        .map_err(|p| anyhow::anyhow!("non UTF-8 temp path: {}", p.display()))?;
    let Err(err) = read_attributes(&path) else {
        return Err(anyhow::anyhow!("expected read to fail"));
    };
    ensure!(err.to_string().contains("absent.rs"), "error should name the file: {err}");
    Ok(())
}

#[rstest]
fn reads_directives_despite_invalid_utf8() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("latin1.rs");
    std::fs::write(&path, b"// competitive-verifier: UNITTEST GOTESTRESULT\n// caf\xe9\n")?;
    let utf8 = camino::Utf8PathBuf::from_path_buf(path)
        .map_err(|p| anyhow::anyhow!("non UTF-8 temp path: {}", p.display()))?;
    let attributes = read_attributes(&utf8)?;
    ensure!(
        attributes.get(UNITTEST).map(String::as_str) == Some("GOTESTRESULT"),
        "directive should survive undecodable bytes: {attributes:?}"
    );
    Ok(())
}
