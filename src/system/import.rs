//! Python module import probing.
//!
//! Package checks ask a Python interpreter to import a module and report
//! its version. The interpreter runs a short script that exits with
//! [`IMPORT_FAILED_STATUS`] when the import itself fails, so a missing
//! package can be told apart from a broken interpreter.

use thiserror::Error;

use super::command::{CommandRunner, SystemRunner};

/// Exit status the import script uses for `ImportError`.
pub const IMPORT_FAILED_STATUS: i32 = 3;

const IMPORT_SCRIPT: &str = r#"
import importlib, sys
name, source, attr = sys.argv[1:4]
try:
    module = importlib.import_module(name)
except ImportError as e:
    sys.stderr.write(str(e))
    sys.exit(3)
if source == "interpreter":
    version = "%d.%d.%d" % tuple(sys.version_info[:3])
elif source == "call":
    version = getattr(module, attr)()
else:
    version = getattr(module, attr, None)
sys.stdout.write("" if version is None else str(version))
"#;

/// Where to read a module's version from once it is imported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSource {
    /// A module attribute, usually `__version__`. Missing means unknown.
    Attribute(String),
    /// A zero-argument function returning the version.
    Call(String),
    /// The interpreter's own version (for modules bundled with Python).
    Interpreter,
}

impl Default for VersionSource {
    fn default() -> Self {
        Self::Attribute("__version__".to_string())
    }
}

impl VersionSource {
    fn script_args(&self) -> (&str, &str) {
        match self {
            Self::Attribute(attr) => ("attribute", attr),
            Self::Call(func) => ("call", func),
            Self::Interpreter => ("interpreter", "-"),
        }
    }
}

/// Failure to import a module.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot import '{module}': {reason}")]
pub struct ImportError {
    /// Module path that was requested.
    pub module: String,
    /// Why the import failed.
    pub reason: String,
}

/// Imports modules and reads their version.
///
/// This trait allows mocking imports in tests.
pub trait ModuleImporter {
    /// Import `module` and read its version from `source`.
    ///
    /// `Ok(None)` means the module imported but exposes no version.
    fn import_version(
        &self,
        module: &str,
        source: &VersionSource,
    ) -> Result<Option<String>, ImportError>;
}

/// Imports modules by running a Python interpreter.
#[derive(Debug, Clone)]
pub struct PythonImporter<R: CommandRunner = SystemRunner> {
    interpreter: String,
    runner: R,
}

impl PythonImporter<SystemRunner> {
    /// Create an importer for `interpreter` that runs on the real system.
    pub fn new(interpreter: &str) -> Self {
        Self::with_runner(interpreter, SystemRunner)
    }
}

impl<R: CommandRunner> PythonImporter<R> {
    /// Create an importer with a custom command runner.
    pub fn with_runner(interpreter: &str, runner: R) -> Self {
        Self {
            interpreter: interpreter.to_string(),
            runner,
        }
    }

    /// The interpreter command used for imports.
    pub fn interpreter(&self) -> &str {
        &self.interpreter
    }
}

impl<R: CommandRunner> ModuleImporter for PythonImporter<R> {
    fn import_version(
        &self,
        module: &str,
        source: &VersionSource,
    ) -> Result<Option<String>, ImportError> {
        let (kind, attr) = source.script_args();
        let args = vec![
            "-c".to_string(),
            IMPORT_SCRIPT.to_string(),
            module.to_string(),
            kind.to_string(),
            attr.to_string(),
        ];

        tracing::debug!("importing {} with {}", module, self.interpreter);

        let output = self
            .runner
            .run(&self.interpreter, &args, None)
            .map_err(|e| ImportError {
                module: module.to_string(),
                reason: format!("could not run {}: {}", self.interpreter, e),
            })?;

        match output.status {
            Some(0) => {
                let version = output.stdout.trim();
                Ok((!version.is_empty()).then(|| version.to_string()))
            }
            Some(IMPORT_FAILED_STATUS) => Err(ImportError {
                module: module.to_string(),
                reason: output.stderr.trim().to_string(),
            }),
            status => Err(ImportError {
                module: module.to_string(),
                reason: format!(
                    "{} exited with status {:?}: {}",
                    self.interpreter,
                    status,
                    output.stderr.trim()
                ),
            }),
        }
    }
}
