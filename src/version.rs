//! Version parsing, comparison and extraction.
//!
//! Versions are compared as tuples of non-negative integers. A version
//! string is split on a per-check delimiter (usually `.`); every component
//! must be numeric.
//!
//! # Example
//!
//! ```
//! use envcheck::version::{parse, VersionTuple};
//!
//! let actual = parse("1.7.2", ".").unwrap().unwrap();
//! let minimum = VersionTuple::from(vec![1, 7, 0]);
//! assert!(actual.satisfies(&minimum));
//! ```

use regex::Regex;
use std::fmt;
use thiserror::Error;

/// An ordered tuple of version components.
///
/// Ordering is lexicographic: components are compared left to right, and
/// when one tuple is a prefix of the other the longer tuple is greater, so
/// `(2, 6) < (2, 6, 0)`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionTuple(Vec<u64>);

impl VersionTuple {
    /// The individual components.
    pub fn components(&self) -> &[u64] {
        &self.0
    }

    /// Whether this version is at least `minimum`.
    pub fn satisfies(&self, minimum: &VersionTuple) -> bool {
        compare(self, minimum)
    }

    /// Render the components joined with `delimiter`.
    pub fn join(&self, delimiter: &str) -> String {
        self.0
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(delimiter)
    }
}

impl From<Vec<u64>> for VersionTuple {
    fn from(components: Vec<u64>) -> Self {
        Self(components)
    }
}

impl<const N: usize> From<[u64; N]> for VersionTuple {
    fn from(components: [u64; N]) -> Self {
        Self(components.to_vec())
    }
}

impl fmt::Display for VersionTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join("."))
    }
}

/// A version component that is not a non-negative integer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unparsable '{component}' in version {raw}")]
pub struct ParseError {
    /// The offending component.
    pub component: String,
    /// The full version string being parsed.
    pub raw: String,
}

/// Parse `raw` into a version tuple by splitting on `delimiter`.
///
/// An empty string is "no version" and yields `Ok(None)`.
pub fn parse(raw: &str, delimiter: &str) -> Result<Option<VersionTuple>, ParseError> {
    if raw.is_empty() {
        return Ok(None);
    }

    let mut components = Vec::new();
    for part in raw.split(delimiter) {
        let value = part.parse::<u64>().map_err(|_| ParseError {
            component: part.to_string(),
            raw: raw.to_string(),
        })?;
        components.push(value);
    }
    Ok(Some(VersionTuple(components)))
}

/// Whether `actual >= minimum`.
pub fn compare(actual: &VersionTuple, minimum: &VersionTuple) -> bool {
    actual >= minimum
}

/// Default pattern for pulling a version out of command output.
///
/// Matches a run of digits and delimiters that starts and ends with a
/// digit. Capture group 1 is the version.
pub fn extraction_pattern(delimiter: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"([\d][\d{}]*[\d])", regex::escape(delimiter)))
}

/// Find the first version-looking substring in `output`.
pub fn extract(pattern: &Regex, output: &str) -> Option<String> {
    pattern
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
