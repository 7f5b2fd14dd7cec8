//! Check failures.
//!
//! A failing check produces a [`CheckError`]: a tree of failures rooted at
//! the check that was requested, with the prerequisite or alternative
//! failures that caused it as children. Check errors are report data, not
//! control flow, so they are cheap to clone and compare.

use std::path::PathBuf;
use thiserror::Error;

use super::remediation::Remediation;

/// What went wrong with a single check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Failure {
    /// The executable could not be launched.
    #[error("could not find '{command}' executable")]
    CommandNotFound { command: String },

    /// The executable ran but exited with an unexpected status.
    #[error("{}", execution_message(.command_line, *.status, .stdout, .stderr))]
    CommandExecution {
        command_line: String,
        status: Option<i32>,
        stdout: String,
        stderr: String,
    },

    /// The output did not contain anything that looks like a version.
    #[error("no version string in output:\n{output}")]
    NoVersionString { output: String },

    /// The Python package could not be imported.
    #[error("could not import the '{package}' package for {full_name}")]
    ImportUnavailable { package: String, full_name: String },

    /// None of the candidate paths exist.
    #[error("{}", path_message(.full_name, .paths))]
    PathNotFound {
        full_name: String,
        paths: Vec<PathBuf>,
    },

    /// The operator task left something other than what was asked for.
    #[error("file contents ({actual:?}) did not match the expected {expected:?}")]
    VerificationFailed { actual: String, expected: String },

    /// The operator's answer to a task prompt could not be read.
    #[error("could not read an answer to the task for {full_name}: {message}")]
    NoAnswer { full_name: String, message: String },

    /// A file needed for verification could not be read.
    #[error("could not open '{}': {message}", .path.display())]
    Unreadable { path: PathBuf, message: String },

    /// The reported version has a non-numeric component.
    #[error("unparsable '{component}' in version {raw} of {full_name}, (need >= {minimum})")]
    UnparsableVersion {
        component: String,
        raw: String,
        full_name: String,
        minimum: String,
    },

    /// The version is below the configured minimum, or unknown.
    #[error(
        "outdated version of {full_name}: {} (need >= {minimum})",
        .version.as_deref().unwrap_or("unknown")
    )]
    VersionTooOld {
        full_name: String,
        version: Option<String>,
        minimum: String,
    },

    /// One or more AND prerequisites failed.
    #[error("some dependencies for {full_name} were not satisfied")]
    PrerequisitesNotSatisfied { full_name: String },

    /// Every OR alternative failed.
    #[error("{full_name} requires at least one of the following dependencies")]
    NoAlternativeSatisfied { full_name: String },
}

fn execution_message(
    command_line: &str,
    status: Option<i32>,
    stdout: &str,
    stderr: &str,
) -> String {
    let mut lines = vec![
        format!("failed to execute: {}", command_line),
        match status {
            Some(code) => format!("status: {}", code),
            None => "status: terminated by signal".to_string(),
        },
    ];
    for (name, stream) in [("stdout", stdout), ("stderr", stderr)] {
        if !stream.is_empty() {
            lines.push(format!("{}:", name));
            lines.push(stream.trim_end().to_string());
        }
    }
    lines.join("\n")
}

fn path_message(full_name: &str, paths: &[PathBuf]) -> String {
    let listed = paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join("\n    ");
    format!(
        "nothing exists at any of the expected paths for {}:\n    {}",
        full_name, listed
    )
}

/// A failed check, with the failures that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{failure}")]
pub struct CheckError {
    /// Registry name of the failing check.
    pub check: String,
    /// Display name of the failing check.
    pub full_name: String,
    /// The failure itself.
    pub failure: Failure,
    /// Failures of prerequisites or alternatives, in declared order.
    pub causes: Vec<CheckError>,
}

impl CheckError {
    /// Create a leaf error with no causes.
    pub fn new(check: &str, full_name: &str, failure: Failure) -> Self {
        Self {
            check: check.to_string(),
            full_name: full_name.to_string(),
            failure,
            causes: Vec::new(),
        }
    }

    /// Attach causes.
    pub fn with_causes(mut self, causes: Vec<CheckError>) -> Self {
        self.causes = causes;
        self
    }

    /// Human-readable message for this node only.
    pub fn message(&self) -> String {
        self.failure.to_string()
    }

    /// Render the full error tree with remediation links.
    ///
    /// ```text
    /// check for Git (git) failed:
    ///   could not find 'git' executable
    ///   For instructions on installing an up-to-date version, see
    ///   http://software-carpentry.org/setup/
    /// ```
    pub fn render(&self, remediation: &Remediation) -> String {
        let mut lines = vec![format!("check for {} failed:", self.full_name)];
        lines.extend(self.message().lines().map(|line| format!("  {}", line)));
        lines.push("  For instructions on installing an up-to-date version, see".to_string());
        lines.push(format!("  {}", remediation.url_for(&self.check)));

        if !self.causes.is_empty() {
            lines.push("  causes:".to_string());
            for cause in &self.causes {
                lines.extend(
                    cause
                        .render(remediation)
                        .lines()
                        .map(|line| format!("  {}", line)),
                );
            }
        }

        lines.join("\n")
    }
}
