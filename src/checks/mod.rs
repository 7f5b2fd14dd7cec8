//! Dependency checking engine.
//!
//! This module provides:
//! - [`Probe`] strategies that obtain a version or presence signal
//! - [`Dependency`] nodes with AND/OR composition and cached outcomes
//! - [`Registry`] owning every check, built through [`RegistryBuilder`]
//! - [`catalog`] with the built-in checks
//! - [`CheckRunner`] producing a [`Report`]
//!
//! # Example
//!
//! ```no_run
//! use envcheck::checks::{catalog, CheckRunner, ProbeContext};
//! use envcheck::system::{PythonImporter, SystemRunner};
//! use envcheck::ui::{create_ui, OutputMode};
//!
//! let registry = catalog::builtin("python3").build().unwrap();
//! let importer = PythonImporter::new("python3");
//! let mut ui = create_ui(false, OutputMode::Normal);
//! let mut ctx = ProbeContext {
//!     commands: &SystemRunner,
//!     modules: &importer,
//!     ui: ui.as_mut(),
//! };
//!
//! let report = CheckRunner::new(&registry)
//!     .run(&["git".to_string()], &mut ctx)
//!     .unwrap();
//! println!("passed: {}", report.passed());
//! ```

pub mod catalog;
pub mod dependency;
pub mod error;
pub mod probe;
pub mod registry;
pub mod remediation;
pub mod runner;

pub use dependency::{CheckState, Dependency, DependencyId};
pub use error::{CheckError, Failure};
pub use probe::{
    CommandFallback, CommandProbe, ImportCandidate, LibraryProbe, Probe, ProbeContext, Task,
    TaskProbe, VersionStream,
};
pub use registry::{DependencySpec, Registry, RegistryBuilder};
pub use remediation::{Remediation, DEFAULT_SETUP_URL};
pub use runner::{known_checks, CheckRunner, Report, Success};

#[cfg(test)]
pub(crate) mod test_support {
    //! Scripted stand-ins for the process and import seams.

    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::io;

    use crate::system::{CommandOutput, CommandRunner, ImportError, ModuleImporter, VersionSource};

    /// Answers commands by their command line (`"git --version"`).
    ///
    /// Unscripted commands fail to launch, like a missing executable.
    #[derive(Default)]
    pub struct ScriptedCommands {
        responses: HashMap<String, CommandOutput>,
        calls: RefCell<Vec<(String, Option<String>)>>,
    }

    impl ScriptedCommands {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn on(mut self, command_line: &str, output: CommandOutput) -> Self {
            self.responses.insert(command_line.to_string(), output);
            self
        }

        pub fn call_count(&self, command_line: &str) -> usize {
            self.calls
                .borrow()
                .iter()
                .filter(|(line, _)| line == command_line)
                .count()
        }

        pub fn stdin_for(&self, command_line: &str) -> Option<String> {
            self.calls
                .borrow()
                .iter()
                .find(|(line, _)| line == command_line)
                .and_then(|(_, stdin)| stdin.clone())
        }
    }

    impl CommandRunner for ScriptedCommands {
        fn run(
            &self,
            program: &str,
            args: &[String],
            stdin: Option<&str>,
        ) -> io::Result<CommandOutput> {
            let program = program.strip_suffix(".exe").unwrap_or(program);
            let line = std::iter::once(program.to_string())
                .chain(args.iter().cloned())
                .collect::<Vec<_>>()
                .join(" ");
            self.calls
                .borrow_mut()
                .push((line.clone(), stdin.map(str::to_string)));

            self.responses
                .get(&line)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "not found"))
        }
    }

    /// Answers imports by module name.
    ///
    /// Unscripted modules fail to import.
    #[derive(Default)]
    pub struct ScriptedModules {
        versions: HashMap<String, Option<String>>,
        calls: RefCell<Vec<String>>,
    }

    impl ScriptedModules {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with(mut self, module: &str, version: Option<&str>) -> Self {
            self.versions
                .insert(module.to_string(), version.map(str::to_string));
            self
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl ModuleImporter for ScriptedModules {
        fn import_version(
            &self,
            module: &str,
            _source: &VersionSource,
        ) -> Result<Option<String>, ImportError> {
            self.calls.borrow_mut().push(module.to_string());
            self.versions.get(module).cloned().ok_or_else(|| ImportError {
                module: module.to_string(),
                reason: format!("No module named '{}'", module),
            })
        }
    }
}
