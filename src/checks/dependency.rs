//! Check graph nodes.

use regex::Regex;
use std::cell::RefCell;

use crate::version::{self, VersionTuple};

use super::error::{CheckError, Failure};
use super::probe::{Probe, ProbeContext};
use super::registry::Registry;

/// Handle to a [`Dependency`] owned by a [`Registry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DependencyId(pub(crate) usize);

/// Cached outcome of a check.
///
/// Written once, on the first check, and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CheckState {
    #[default]
    Unchecked,
    Passed(Option<String>),
    Failed(CheckError),
}

impl CheckState {
    fn outcome(&self) -> Option<Result<Option<String>, CheckError>> {
        match self {
            CheckState::Unchecked => None,
            CheckState::Passed(found) => Some(Ok(found.clone())),
            CheckState::Failed(err) => Some(Err(err.clone())),
        }
    }
}

/// A single checkable unit.
#[derive(Debug)]
pub struct Dependency {
    pub(crate) name: String,
    pub(crate) long_name: Option<String>,
    pub(crate) minimum: Option<VersionTuple>,
    pub(crate) delimiter: String,
    pub(crate) and_dependencies: Vec<DependencyId>,
    pub(crate) or_dependencies: Vec<DependencyId>,
    pub(crate) probe: Probe,
    pub(crate) pattern: Regex,
    pub(crate) state: RefCell<CheckState>,
}

impl Dependency {
    /// Registry name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display name, falling back to the registry name.
    pub fn long_name(&self) -> &str {
        match self.long_name.as_deref() {
            Some(long) if !long.is_empty() => long,
            _ => &self.name,
        }
    }

    /// `"{long name} ({name})"`, or just the name when they are the same.
    pub fn full_name(&self) -> String {
        if self.long_name() == self.name {
            self.name.clone()
        } else {
            format!("{} ({})", self.long_name(), self.name)
        }
    }

    pub fn minimum(&self) -> Option<&VersionTuple> {
        self.minimum.as_ref()
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    pub fn probe(&self) -> &Probe {
        &self.probe
    }

    /// Checks that must all pass first.
    pub fn and_dependencies(&self) -> &[DependencyId] {
        &self.and_dependencies
    }

    /// Alternatives, tried in order until one passes.
    pub fn or_dependencies(&self) -> &[DependencyId] {
        &self.or_dependencies
    }

    /// Whether this check has no probe of its own.
    pub fn is_virtual(&self) -> bool {
        matches!(self.probe, Probe::Alternatives)
    }

    /// Snapshot of the cached outcome.
    pub fn state(&self) -> CheckState {
        self.state.borrow().clone()
    }

    /// Check this dependency, probing at most once per process.
    ///
    /// Returns the version (`None` when unknown) or the failure. Later
    /// calls return the cached outcome.
    pub fn ensure_checked(
        &self,
        registry: &Registry,
        ctx: &mut ProbeContext<'_>,
    ) -> Result<Option<String>, CheckError> {
        let cached = self.state.borrow().outcome();
        if let Some(outcome) = cached {
            tracing::debug!("{} already checked", self.name);
            return outcome;
        }

        let outcome = self.evaluate(registry, ctx);
        *self.state.borrow_mut() = match &outcome {
            Ok(found) => CheckState::Passed(found.clone()),
            Err(err) => CheckState::Failed(err.clone()),
        };
        outcome
    }

    fn evaluate(
        &self,
        registry: &Registry,
        ctx: &mut ProbeContext<'_>,
    ) -> Result<Option<String>, CheckError> {
        let full_name = self.full_name();

        let mut unmet = Vec::new();
        for id in &self.and_dependencies {
            if let Err(err) = registry.get(*id).ensure_checked(registry, ctx) {
                unmet.push(err);
            }
        }
        if !unmet.is_empty() {
            return Err(self
                .error(Failure::PrerequisitesNotSatisfied { full_name })
                .with_causes(unmet));
        }

        let mut branch = None;
        if !self.or_dependencies.is_empty() {
            let mut rejected = Vec::new();
            for id in &self.or_dependencies {
                let alternative = registry.get(*id);
                match alternative.ensure_checked(registry, ctx) {
                    Ok(found) => {
                        tracing::debug!("{} satisfied by {}", self.name, alternative.name);
                        branch = Some((alternative, found));
                        break;
                    }
                    Err(err) => rejected.push(err),
                }
            }
            if branch.is_none() {
                return Err(self
                    .error(Failure::NoAlternativeSatisfied { full_name })
                    .with_causes(rejected));
            }
        }

        if self.is_virtual() {
            return Ok(branch.map(|(alternative, found)| {
                format!(
                    "{} {}",
                    alternative.full_name(),
                    found.as_deref().unwrap_or("unknown")
                )
            }));
        }

        let found = self
            .probe
            .run(&self.name, &full_name, &self.pattern, ctx)
            .map_err(|failure| self.error(failure))?;
        self.check_minimum(found.as_deref())?;
        Ok(found)
    }

    fn check_minimum(&self, found: Option<&str>) -> Result<(), CheckError> {
        let Some(minimum) = &self.minimum else {
            return Ok(());
        };
        let needed = minimum.join(&self.delimiter);

        let parsed = version::parse(found.unwrap_or_default(), &self.delimiter).map_err(|e| {
            self.error(Failure::UnparsableVersion {
                component: e.component,
                raw: e.raw,
                full_name: self.full_name(),
                minimum: needed.clone(),
            })
        })?;

        match parsed {
            Some(actual) if actual.satisfies(minimum) => Ok(()),
            _ => Err(self.error(Failure::VersionTooOld {
                full_name: self.full_name(),
                version: found.map(str::to_string),
                minimum: needed,
            })),
        }
    }

    fn error(&self, failure: Failure) -> CheckError {
        CheckError::new(&self.name, &self.full_name(), failure)
    }
}
