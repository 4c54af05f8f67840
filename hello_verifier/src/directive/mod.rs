//! Harness directives embedded in source comments.
//!
//! External verification tools discover how to treat a file through special
//! comments such as `// competitive-verifier: UNITTEST GOTESTRESULT`. The
//! directive is metadata only: it never changes what a verification case
//! does, it only tells the harness how to interpret the outcome.
use std::collections::BTreeMap;

use camino::Utf8Path;

use crate::error::Result;
use crate::fs::read_text_lossy;
use crate::report::ResultStatus;

/// Attribute key naming the environment variable that carries a unit test
/// outcome.
pub const UNITTEST: &str = "UNITTEST";

const MARKERS: [&str; 3] = [
    "competitive-verifier:",
    "verification-helper:",
    "verify-helper:",
];

/// Directive keys mapped to their (possibly empty) values.
pub type Attributes = BTreeMap<String, String>;

/// Collects every directive found in `text`.
///
/// Lines end at `\r\n`, a lone `\r` or `\n`, or any other Unicode line
/// separator. Later occurrences of a key replace earlier ones.
///
/// # Examples
///
/// ```rust
/// use hello_verifier::directive::parse_attributes;
///
/// let attributes = parse_attributes("// competitive-verifier: UNITTEST GOTESTRESULT\n");
/// assert_eq!(attributes.get("UNITTEST").map(String::as_str), Some("GOTESTRESULT"));
/// ```
#[must_use]
pub fn parse_attributes(text: &str) -> Attributes {
    let normalised = text.replace("\r\n", "\n");
    let mut attributes = Attributes::new();
    for line in normalised.split(is_line_break) {
        if let Some((key, value)) = parse_line(line) {
            attributes.insert(key.to_owned(), value.to_owned());
        }
    }
    attributes
}

/// Reads `path` and collects its directives.
///
/// Bytes that are not valid UTF-8 decode to U+FFFD, so a source saved in
/// another encoding still yields its ASCII directives.
///
/// # Errors
///
/// Returns [`crate::error::HelloVerifierError::Io`] when the file cannot be
/// read.
pub fn read_attributes(path: &Utf8Path) -> Result<Attributes> {
    let text = read_text_lossy(path)?;
    Ok(parse_attributes(&text))
}

/// Resolves the outcome recorded by a `UNITTEST` directive.
///
/// The directive value names an environment variable, looked up through
/// `lookup`. An unset variable, `false` (in any letter case), or `0` resolve to
/// [`ResultStatus::Failure`]; any other value resolves to
/// [`ResultStatus::Success`]. Returns `None` when the attributes carry no
/// `UNITTEST` directive or its value is empty.
///
/// # Examples
///
/// ```rust
/// use hello_verifier::directive::{parse_attributes, resolve_unit_test};
/// use hello_verifier::report::ResultStatus;
///
/// let attributes = parse_attributes("// competitive-verifier: UNITTEST GOTESTRESULT");
/// let status = resolve_unit_test(&attributes, |_| Some(String::from("true")));
/// assert_eq!(status, Some(ResultStatus::Success));
/// ```
pub fn resolve_unit_test<L>(attributes: &Attributes, lookup: L) -> Option<ResultStatus>
where
    L: FnOnce(&str) -> Option<String>,
{
    let var = attributes
        .get(UNITTEST)
        .map(String::as_str)
        .filter(|var| !var.is_empty())?;
    let status = match lookup(var) {
        None => {
            tracing::warn!(var, "UNITTEST environment variable is not defined");
            ResultStatus::Failure
        }
        Some(value) if value.eq_ignore_ascii_case("false") || value == "0" => {
            tracing::info!(var, %value, "UNITTEST environment variable is falsy");
            ResultStatus::Failure
        }
        Some(value) => {
            tracing::info!(var, %value, "UNITTEST environment variable is truthy");
            ResultStatus::Success
        }
    };
    Some(status)
}

/// Resolves a `UNITTEST` directive against the process environment.
#[must_use]
pub fn resolve_unit_test_from_env(attributes: &Attributes) -> Option<ResultStatus> {
    resolve_unit_test(attributes, |var| std::env::var(var).ok())
}

/// Finds the leftmost marker that opens a well-formed directive.
fn parse_line(line: &str) -> Option<(&str, &str)> {
    let mut hits: Vec<(usize, &str)> = MARKERS
        .iter()
        .flat_map(|marker| line.match_indices(*marker))
        .collect();
    hits.sort_unstable_by_key(|&(start, _)| start);
    hits.into_iter()
        .filter(|&(start, _)| at_word_boundary(line, start))
        .find_map(|(start, marker)| line.get(start + marker.len()..).and_then(parse_body))
}

fn at_word_boundary(line: &str, start: usize) -> bool {
    line.get(..start)
        .and_then(|before| before.chars().next_back())
        .is_none_or(|ch| !(ch.is_alphanumeric() || ch == '_'))
}

const fn is_line_break(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}'
            | '\u{2028}' | '\u{2029}'
    )
}

const fn is_key_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Splits `  KEY value...` into its key and trimmed value.
fn parse_body(body: &str) -> Option<(&str, &str)> {
    let rest = body.trim_start();
    let key_len = rest
        .char_indices()
        .find(|&(_, ch)| !is_key_char(ch))
        .map_or(rest.len(), |(idx, _)| idx);
    if key_len == 0 {
        return None;
    }
    let (key, tail) = rest.split_at(key_len);
    let mut chars = tail.chars();
    match chars.next() {
        None => Some((key, "")),
        Some(ch) if ch.is_whitespace() => Some((key, chars.as_str().trim())),
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests;
