//! Running a list of checks and collecting the results.

use serde::Serialize;

use crate::error::{EnvcheckError, Result};
use crate::ui::OutputMode;

use super::catalog::DEFAULT_CHECKS;
use super::dependency::DependencyId;
use super::error::CheckError;
use super::probe::ProbeContext;
use super::registry::Registry;
use super::remediation::Remediation;

/// A check that passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Success {
    pub name: String,
    pub full_name: String,
    /// `None` when the check passed without a known version.
    pub version: Option<String>,
}

/// Outcome of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    successes: Vec<Success>,
    failures: Vec<CheckError>,
}

impl Report {
    pub fn successes(&self) -> &[Success] {
        &self.successes
    }

    /// Unique failures, in the order they first occurred.
    pub fn failures(&self) -> &[CheckError] {
        &self.failures
    }

    /// Whether every requested check passed.
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    fn record_failure(&mut self, err: CheckError) {
        if !self.failures.contains(&err) {
            self.failures.push(err);
        }
    }

    /// Render the `Successes:` and `Failures:` blocks.
    pub fn render(&self, remediation: &Remediation) -> Vec<String> {
        let mut lines = Vec::new();

        if !self.successes.is_empty() {
            lines.extend(["".to_string(), "Successes:".to_string(), "".to_string()]);
            for success in &self.successes {
                lines.push(format!(
                    "{} {}",
                    success.full_name,
                    success.version.as_deref().unwrap_or("unknown")
                ));
            }
        }

        if !self.failures.is_empty() {
            lines.extend(["".to_string(), "Failures:".to_string()]);
            for failure in &self.failures {
                lines.push(String::new());
                lines.extend(failure.render(remediation).lines().map(str::to_string));
            }
        }

        lines
    }

    /// Serialize the report as pretty JSON.
    pub fn to_json(&self, remediation: &Remediation) -> serde_json::Result<String> {
        let view = ReportView {
            passed: self.passed(),
            successes: &self.successes,
            failures: self
                .failures
                .iter()
                .map(|f| FailureView::new(f, remediation))
                .collect(),
        };
        serde_json::to_string_pretty(&view)
    }
}

#[derive(Serialize)]
struct ReportView<'a> {
    passed: bool,
    successes: &'a [Success],
    failures: Vec<FailureView<'a>>,
}

#[derive(Serialize)]
struct FailureView<'a> {
    check: &'a str,
    full_name: &'a str,
    message: String,
    url: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    causes: Vec<FailureView<'a>>,
}

impl<'a> FailureView<'a> {
    fn new(err: &'a CheckError, remediation: &Remediation) -> Self {
        Self {
            check: &err.check,
            full_name: &err.full_name,
            message: err.message(),
            url: remediation.url_for(&err.check),
            causes: err
                .causes
                .iter()
                .map(|c| FailureView::new(c, remediation))
                .collect(),
        }
    }
}

/// Runs requested checks against a registry.
pub struct CheckRunner<'r> {
    registry: &'r Registry,
    defaults: Vec<String>,
}

impl<'r> CheckRunner<'r> {
    /// Runner whose default list is the built-in curated list.
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            defaults: DEFAULT_CHECKS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Replace the list used when no checks are requested.
    pub fn with_defaults(mut self, defaults: Vec<String>) -> Self {
        self.defaults = defaults;
        self
    }

    /// Resolve every name up front; the first unknown name is an error.
    pub fn resolve(&self, names: &[String]) -> Result<Vec<DependencyId>> {
        let names = if names.is_empty() {
            &self.defaults
        } else {
            names
        };

        names
            .iter()
            .map(|name| {
                self.registry
                    .lookup(name)
                    .ok_or_else(|| EnvcheckError::InvalidCheck { name: name.clone() })
            })
            .collect()
    }

    /// Run `names` (or the default list when empty) in order.
    ///
    /// Nothing is probed unless every name is known.
    pub fn run(&self, names: &[String], ctx: &mut ProbeContext<'_>) -> Result<Report> {
        let ids = self.resolve(names)?;
        let mut report = Report::default();

        for id in ids {
            let dependency = self.registry.get(id);
            let full_name = dependency.full_name();
            ctx.ui.inline(&format!("check {}...\t", full_name));

            match self.registry.check(id, ctx) {
                Ok(version) => {
                    ctx.ui.verdict(true);
                    if ctx.ui.output_mode() == OutputMode::Verbose {
                        let shown = version.as_deref().unwrap_or("unknown");
                        ctx.ui.message(&format!("  version {}", shown));
                    }
                    report.successes.push(Success {
                        name: dependency.name().to_string(),
                        full_name,
                        version,
                    });
                }
                Err(err) => {
                    ctx.ui.verdict(false);
                    tracing::debug!("{} failed: {}", dependency.name(), err);
                    report.record_failure(err);
                }
            }
        }

        Ok(report)
    }
}

/// One line per known check, with its long name when it differs.
pub fn known_checks(registry: &Registry) -> Vec<String> {
    registry
        .iter()
        .map(|dep| {
            if dep.long_name() == dep.name() {
                format!("  {}", dep.name())
            } else {
                format!(
                    "  {} {}({})",
                    dep.name(),
                    " ".repeat(20usize.saturating_sub(dep.name().len())),
                    dep.long_name()
                )
            }
        })
        .collect()
}
