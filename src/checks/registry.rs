//! Check registry.
//!
//! Checks are declared as [`DependencySpec`]s that refer to each other by
//! name. [`RegistryBuilder::build`] resolves those names into
//! [`DependencyId`] handles once, so a registry that builds successfully
//! has no dangling references, duplicates or cycles.

use regex::Regex;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::{EnvcheckError, Result};
use crate::version::{self, VersionTuple};

use super::dependency::{CheckState, Dependency, DependencyId};
use super::error::CheckError;
use super::probe::{CommandProbe, LibraryProbe, Probe, ProbeContext, TaskProbe};

/// Declaration of a check, before name resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencySpec {
    pub name: String,
    pub long_name: Option<String>,
    pub minimum: Option<VersionTuple>,
    pub delimiter: String,
    pub and_dependencies: Vec<String>,
    pub or_dependencies: Vec<String>,
    pub probe: Probe,
    /// Custom extraction pattern; capture group 1 is the version.
    pub version_pattern: Option<String>,
}

impl DependencySpec {
    /// Declare a check with an explicit probe.
    pub fn new(name: &str, probe: Probe) -> Self {
        Self {
            name: name.to_string(),
            long_name: None,
            minimum: None,
            delimiter: ".".to_string(),
            and_dependencies: Vec::new(),
            or_dependencies: Vec::new(),
            probe,
            version_pattern: None,
        }
    }

    /// `name --version`.
    pub fn command(name: &str) -> Self {
        Self::new(name, Probe::Command(CommandProbe::new(name)))
    }

    /// Import `module` and read `__version__`.
    pub fn library(name: &str, module: &str) -> Self {
        Self::new(name, Probe::Library(LibraryProbe::new(module)))
    }

    /// Any of `paths` exists.
    pub fn paths(name: &str, paths: &[&str]) -> Self {
        Self::new(name, Probe::Paths(paths.iter().map(PathBuf::from).collect()))
    }

    /// Operator task.
    pub fn task(name: &str, task: TaskProbe) -> Self {
        Self::new(name, Probe::Task(task))
    }

    /// Virtual check satisfied by any of `alternatives`, tried in order.
    pub fn alternatives(name: &str, alternatives: &[&str]) -> Self {
        let mut spec = Self::new(name, Probe::Alternatives);
        spec.or_dependencies = alternatives.iter().map(|a| a.to_string()).collect();
        spec
    }

    pub fn long_name(mut self, long_name: &str) -> Self {
        self.long_name = Some(long_name.to_string());
        self
    }

    pub fn minimum(mut self, components: &[u64]) -> Self {
        self.minimum = Some(VersionTuple::from(components.to_vec()));
        self
    }

    pub fn delimiter(mut self, delimiter: &str) -> Self {
        self.delimiter = delimiter.to_string();
        self
    }

    pub fn version_pattern(mut self, pattern: &str) -> Self {
        self.version_pattern = Some(pattern.to_string());
        self
    }

    /// Add prerequisites that must all pass first.
    pub fn requires(mut self, names: &[&str]) -> Self {
        self.and_dependencies
            .extend(names.iter().map(|n| n.to_string()));
        self
    }
}

/// Collects check declarations and validates them into a [`Registry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    specs: Vec<DependencySpec>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a declaration. Duplicates are reported by [`build`](Self::build).
    pub fn add(&mut self, spec: DependencySpec) -> &mut Self {
        self.specs.push(spec);
        self
    }

    /// Whether a check named `name` has been added.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// An added declaration.
    pub fn get(&self, name: &str) -> Option<&DependencySpec> {
        self.specs.iter().find(|s| s.name == name)
    }

    /// Mutable access to an added declaration.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut DependencySpec> {
        self.specs.iter_mut().find(|s| s.name == name)
    }

    /// Resolve references and validate the check graph.
    pub fn build(self) -> Result<Registry> {
        let mut index = BTreeMap::new();
        for (position, spec) in self.specs.iter().enumerate() {
            if index
                .insert(spec.name.clone(), DependencyId(position))
                .is_some()
            {
                return Err(EnvcheckError::DuplicateCheck {
                    name: spec.name.clone(),
                });
            }
        }

        let mut nodes = Vec::with_capacity(self.specs.len());
        for spec in self.specs {
            let pattern = validate(&spec)?;
            let resolve = |names: &[String]| -> Result<Vec<DependencyId>> {
                names
                    .iter()
                    .map(|reference| {
                        index.get(reference).copied().ok_or_else(|| {
                            EnvcheckError::UnresolvedReference {
                                check: spec.name.clone(),
                                reference: reference.clone(),
                            }
                        })
                    })
                    .collect()
            };
            let and_dependencies = resolve(&spec.and_dependencies)?;
            let or_dependencies = resolve(&spec.or_dependencies)?;

            nodes.push(Dependency {
                name: spec.name,
                long_name: spec.long_name,
                minimum: spec.minimum,
                delimiter: spec.delimiter,
                and_dependencies,
                or_dependencies,
                probe: spec.probe,
                pattern,
                state: RefCell::new(CheckState::Unchecked),
            });
        }

        let registry = Registry { nodes, index };
        registry.detect_cycles()?;

        tracing::debug!("registry built with {} checks", registry.len());
        Ok(registry)
    }
}

/// Per-declaration checks; returns the compiled extraction pattern.
fn validate(spec: &DependencySpec) -> Result<Regex> {
    let invalid = |message: &str| EnvcheckError::InvalidDefinition {
        check: spec.name.clone(),
        message: message.to_string(),
    };

    if spec.delimiter.is_empty() {
        return Err(invalid("version delimiter must not be empty"));
    }
    match spec.probe {
        Probe::Paths(_) if spec.minimum.is_some() => {
            return Err(invalid("path checks cannot have a minimum version"));
        }
        Probe::Alternatives if spec.minimum.is_some() => {
            return Err(invalid("virtual checks cannot have a minimum version"));
        }
        Probe::Alternatives if spec.or_dependencies.is_empty() => {
            return Err(invalid("virtual checks need at least one alternative"));
        }
        _ => {}
    }

    let pattern = match &spec.version_pattern {
        Some(custom) => Regex::new(custom),
        None => version::extraction_pattern(&spec.delimiter),
    };
    pattern.map_err(|e| invalid(&e.to_string()))
}

/// Owns every check, keyed by name.
#[derive(Debug)]
pub struct Registry {
    nodes: Vec<Dependency>,
    index: BTreeMap<String, DependencyId>,
}

impl Registry {
    /// The check behind `id`.
    ///
    /// Handles are only created by this registry's builder, so every id
    /// refers to an existing node.
    pub fn get(&self, id: DependencyId) -> &Dependency {
        &self.nodes[id.0]
    }

    /// Handle for the check named `name`.
    pub fn lookup(&self, name: &str) -> Option<DependencyId> {
        self.index.get(name).copied()
    }

    /// The check named `name`.
    pub fn dependency(&self, name: &str) -> Option<&Dependency> {
        self.lookup(name).map(|id| self.get(id))
    }

    /// Check names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }

    /// Checks in sorted name order.
    pub fn iter(&self) -> impl Iterator<Item = &Dependency> {
        self.index.values().map(|id| self.get(*id))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Run the check behind `id` (or return its cached outcome).
    pub fn check(
        &self,
        id: DependencyId,
        ctx: &mut ProbeContext<'_>,
    ) -> std::result::Result<Option<String>, CheckError> {
        self.get(id).ensure_checked(self, ctx)
    }

    fn detect_cycles(&self) -> Result<()> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            New,
            Active,
            Done,
        }

        fn visit(
            registry: &Registry,
            id: DependencyId,
            marks: &mut [Mark],
            path: &mut Vec<DependencyId>,
        ) -> Result<()> {
            match marks[id.0] {
                Mark::Done => return Ok(()),
                Mark::Active => {
                    let start = path.iter().position(|p| *p == id).unwrap_or(0);
                    let mut cycle: Vec<&str> =
                        path[start..].iter().map(|p| registry.get(*p).name()).collect();
                    cycle.push(registry.get(id).name());
                    return Err(EnvcheckError::CircularDependency {
                        cycle: cycle.join(" → "),
                    });
                }
                Mark::New => {}
            }

            marks[id.0] = Mark::Active;
            path.push(id);
            let node = registry.get(id);
            for next in node.and_dependencies().iter().chain(node.or_dependencies()) {
                visit(registry, *next, marks, path)?;
            }
            path.pop();
            marks[id.0] = Mark::Done;
            Ok(())
        }

        let mut marks = vec![Mark::New; self.nodes.len()];
        let mut path = Vec::new();
        for position in 0..self.nodes.len() {
            visit(self, DependencyId(position), &mut marks, &mut path)?;
        }
        Ok(())
    }
}
