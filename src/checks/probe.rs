//! Probe strategies.
//!
//! A probe obtains the raw signal for one check: a version string, or just
//! the fact that something is present. Probes know nothing about minimum
//! versions or other checks; [`Dependency`](super::Dependency) combines
//! probe results with the check graph.

use regex::Regex;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::system::{display_command, exe_suffix, CommandRunner, ModuleImporter, VersionSource};
use crate::ui::{Prompt, UserInterface};
use crate::version;

use super::error::Failure;

/// Makefile fed to `make -f -` when `make --version` is not supported.
pub const MAKEFILE_QUERY: &str =
    "all:\n\t@echo \"MAKE_VERSION=$(MAKE_VERSION)\"\n\t@echo \"MAKE=$(MAKE)\"\n";

/// Everything a probe may touch on the host.
pub struct ProbeContext<'a> {
    /// Launches external commands.
    pub commands: &'a dyn CommandRunner,
    /// Imports Python modules.
    pub modules: &'a dyn ModuleImporter,
    /// Shows task prompts and reads the operator's answer.
    pub ui: &'a mut dyn UserInterface,
}

/// Which output stream carries the version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VersionStream {
    #[default]
    Stdout,
    Stderr,
    /// stdout followed by stderr.
    Combined,
}

/// Second attempt for tools that do not answer `--version`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandFallback {
    /// Ask make for `$(MAKE_VERSION)` through a makefile on stdin.
    MakefileQuery,
    /// Re-run expecting status 1 and look for `marker` on stderr.
    ///
    /// When found, the tool is present and `version` is reported.
    UnrecognizedFlag { marker: String, version: String },
}

/// Run an executable and search its output for a version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandProbe {
    pub command: String,
    pub args: Vec<String>,
    pub stdin: Option<String>,
    pub expected_status: Vec<i32>,
    pub stream: VersionStream,
    pub fallback: Option<CommandFallback>,
}

impl CommandProbe {
    /// Probe `command --version`, expecting status 0 and reading stdout.
    pub fn new(command: &str) -> Self {
        Self {
            command: command.to_string(),
            args: vec!["--version".to_string()],
            stdin: None,
            expected_status: vec![0],
            stream: VersionStream::Stdout,
            fallback: None,
        }
    }

    /// Replace the version-query arguments.
    pub fn with_args(mut self, args: &[&str]) -> Self {
        self.args = args.iter().map(|a| a.to_string()).collect();
        self
    }

    /// Feed `stdin` to the command.
    pub fn with_stdin(mut self, stdin: &str) -> Self {
        self.stdin = Some(stdin.to_string());
        self
    }

    /// Replace the set of acceptable exit statuses.
    pub fn with_expected_status(mut self, statuses: &[i32]) -> Self {
        self.expected_status = statuses.to_vec();
        self
    }

    /// Read the version from another stream.
    pub fn with_stream(mut self, stream: VersionStream) -> Self {
        self.stream = stream;
        self
    }

    /// Try `fallback` when the primary query fails.
    pub fn with_fallback(mut self, fallback: CommandFallback) -> Self {
        self.fallback = Some(fallback);
        self
    }

    fn program(&self) -> String {
        format!("{}{}", self.command, exe_suffix())
    }

    fn run(
        &self,
        pattern: &Regex,
        commands: &dyn CommandRunner,
    ) -> Result<Option<String>, Failure> {
        let primary = capture(
            commands,
            &self.program(),
            &self.args,
            self.stdin.as_deref(),
            &self.expected_status,
            self.stream,
        )
        .and_then(|output| match version::extract(pattern, &output) {
            Some(found) => Ok(Some(found)),
            None => Err(Failure::NoVersionString { output }),
        });

        let original = match primary {
            Ok(found) => return Ok(found),
            Err(failure) => failure,
        };

        match &self.fallback {
            None => Err(original),
            Some(fallback) => {
                tracing::debug!("{} failed, trying {:?} fallback", self.command, fallback);
                self.run_fallback(fallback, commands).ok_or(original)
            }
        }
    }

    /// `None` means the fallback did not recognise the tool.
    fn run_fallback(
        &self,
        fallback: &CommandFallback,
        commands: &dyn CommandRunner,
    ) -> Option<Option<String>> {
        match fallback {
            CommandFallback::MakefileQuery => {
                let args = vec!["-f".to_string(), "-".to_string()];
                let output = capture(
                    commands,
                    &self.program(),
                    &args,
                    Some(MAKEFILE_QUERY),
                    &[0],
                    VersionStream::Stdout,
                )
                .ok()?;
                parse_make_query(&output)
            }
            CommandFallback::UnrecognizedFlag { marker, version } => {
                let output = capture(
                    commands,
                    &self.program(),
                    &self.args,
                    self.stdin.as_deref(),
                    &[1],
                    VersionStream::Stderr,
                )
                .ok()?;
                output.contains(marker.as_str()).then(|| Some(version.clone()))
            }
        }
    }
}

/// Interpret the `KEY=VALUE` lines printed by [`MAKEFILE_QUERY`].
fn parse_make_query(output: &str) -> Option<Option<String>> {
    let mut info = HashMap::new();
    for line in output.lines() {
        let (key, value) = line.split_once('=')?;
        info.insert(key, value);
    }

    match (info.get("MAKE_VERSION"), info.get("MAKE")) {
        (Some(version), _) if !version.is_empty() => Some(Some(version.to_string())),
        (_, Some(make)) if !make.is_empty() => Some(None),
        _ => None,
    }
}

/// Run a command to completion and return the requested stream.
fn capture(
    commands: &dyn CommandRunner,
    program: &str,
    args: &[String],
    stdin: Option<&str>,
    expected_status: &[i32],
    stream: VersionStream,
) -> Result<String, Failure> {
    tracing::debug!("running {}", display_command(program, args));

    let output = commands
        .run(program, args, stdin)
        .map_err(|e| {
            tracing::debug!("could not launch {}: {}", program, e);
            Failure::CommandNotFound {
                command: program.to_string(),
            }
        })?;

    let accepted = output
        .status
        .is_some_and(|code| expected_status.contains(&code));
    if !accepted {
        return Err(Failure::CommandExecution {
            command_line: display_command(program, args),
            status: output.status,
            stdout: output.stdout,
            stderr: output.stderr,
        });
    }

    Ok(match stream {
        VersionStream::Stdout => output.stdout,
        VersionStream::Stderr => output.stderr,
        VersionStream::Combined => format!("{}{}", output.stdout, output.stderr),
    })
}

/// One way to import a Python package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportCandidate {
    pub module: String,
    pub source: VersionSource,
}

impl ImportCandidate {
    /// Import `module` and read `__version__`.
    pub fn new(module: &str) -> Self {
        Self {
            module: module.to_string(),
            source: VersionSource::default(),
        }
    }

    /// Read the version from `source` instead.
    pub fn with_source(mut self, source: VersionSource) -> Self {
        self.source = source;
        self
    }
}

/// Import a Python package and read its version.
///
/// Candidates are tried in order; the first importable one wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryProbe {
    pub candidates: Vec<ImportCandidate>,
}

impl LibraryProbe {
    /// Probe a single module's `__version__`.
    pub fn new(module: &str) -> Self {
        Self {
            candidates: vec![ImportCandidate::new(module)],
        }
    }

    /// Probe a single module, reading the version from `source`.
    pub fn with_source(module: &str, source: VersionSource) -> Self {
        Self {
            candidates: vec![ImportCandidate::new(module).with_source(source)],
        }
    }

    /// Add a candidate tried when the earlier ones cannot be imported.
    pub fn or_else(mut self, candidate: ImportCandidate) -> Self {
        self.candidates.push(candidate);
        self
    }

    fn run(
        &self,
        full_name: &str,
        modules: &dyn ModuleImporter,
    ) -> Result<Option<String>, Failure> {
        let mut last_module = None;
        for candidate in &self.candidates {
            match modules.import_version(&candidate.module, &candidate.source) {
                Ok(found) => return Ok(found),
                Err(e) => {
                    tracing::debug!("{}", e);
                    last_module = Some(candidate.module.as_str());
                }
            }
        }

        Err(Failure::ImportUnavailable {
            package: last_module.unwrap_or_default().to_string(),
            full_name: full_name.to_string(),
        })
    }
}

/// Something the operator is asked to do before verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    /// Create `path` containing `contents` (surrounding whitespace ignored).
    CreateFile { path: PathBuf, contents: String },
}

/// Ask the operator to perform a task, then verify its side effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskProbe {
    pub prompt: String,
    pub task: Task,
}

impl TaskProbe {
    /// Ask the operator to create `path` with the given contents in an editor.
    pub fn create_file(path: PathBuf, contents: &str) -> Self {
        let prompt = format!(
            "Open your favorite text editor and create the file\n  {}\n\
             containing the line:\n  {}\n\
             Press enter here after you have done this.\n\
             You may remove the file after you have finished testing.",
            path.display(),
            contents
        );
        Self {
            prompt,
            task: Task::CreateFile {
                path,
                contents: contents.to_string(),
            },
        }
    }

    fn run(
        &self,
        name: &str,
        full_name: &str,
        ui: &mut dyn UserInterface,
    ) -> Result<Option<String>, Failure> {
        let prompt = Prompt::new(name, &self.prompt).with_default("");
        ui.prompt(&prompt).map_err(|e| Failure::NoAnswer {
            full_name: full_name.to_string(),
            message: e.to_string(),
        })?;
        self.verify()
    }

    fn verify(&self) -> Result<Option<String>, Failure> {
        match &self.task {
            Task::CreateFile { path, contents } => {
                let actual = std::fs::read_to_string(path).map_err(|e| Failure::Unreadable {
                    path: path.clone(),
                    message: e.to_string(),
                })?;
                if actual.trim() != contents {
                    return Err(Failure::VerificationFailed {
                        actual,
                        expected: contents.clone(),
                    });
                }
                Ok(None)
            }
        }
    }
}

/// How a check obtains its signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    /// Run an external command.
    Command(CommandProbe),
    /// Import a Python package.
    Library(LibraryProbe),
    /// Any of these paths exists.
    Paths(Vec<PathBuf>),
    /// Ask the operator to do something and verify it.
    Task(TaskProbe),
    /// No probe of its own; satisfied by one of its alternatives.
    Alternatives,
}

impl Probe {
    /// Short label used in listings and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Probe::Command(_) => "command",
            Probe::Library(_) => "library",
            Probe::Paths(_) => "paths",
            Probe::Task(_) => "task",
            Probe::Alternatives => "virtual",
        }
    }

    /// Run the probe for the check `name`.
    ///
    /// Returns the raw version (`None` when present but unversioned).
    pub fn run(
        &self,
        name: &str,
        full_name: &str,
        pattern: &Regex,
        ctx: &mut ProbeContext<'_>,
    ) -> Result<Option<String>, Failure> {
        tracing::debug!("probing {} ({})", name, self.kind());
        match self {
            Probe::Command(probe) => probe.run(pattern, ctx.commands),
            Probe::Library(probe) => probe.run(full_name, ctx.modules),
            Probe::Paths(paths) => {
                if paths.iter().any(|p| p.exists()) {
                    Ok(None)
                } else {
                    Err(Failure::PathNotFound {
                        full_name: full_name.to_string(),
                        paths: paths.clone(),
                    })
                }
            }
            Probe::Task(probe) => probe.run(name, full_name, ctx.ui),
            Probe::Alternatives => Ok(None),
        }
    }
}
