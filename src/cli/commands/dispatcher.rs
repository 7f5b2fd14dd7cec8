//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::checks::{catalog, Registry};
use crate::cli::args::{Cli, Commands};
use crate::config::{apply_overrides, load_config, EnvcheckConfig};
use crate::error::Result;
use crate::ui::{OutputMode, UserInterface};

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Load config and build the check registry it describes.
pub(crate) fn load_catalog(
    project_root: &Path,
    config_path: Option<&Path>,
    ui: &mut dyn UserInterface,
) -> Result<(EnvcheckConfig, Registry)> {
    let config = load_config(project_root, config_path)?;

    // Config output mode applies only when no flag chose one
    if ui.output_mode() == OutputMode::Normal {
        if let Some(mode) = config.settings.output {
            ui.set_output_mode(mode);
        }
    }

    let mut builder = catalog::builtin(config.python());
    apply_overrides(&config, &mut builder)?;
    let registry = builder.build()?;
    Ok((config, registry))
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf, config_path: Option<PathBuf>) -> Self {
        Self {
            project_root,
            config_path,
        }
    }

    /// Dispatch and execute a command.
    ///
    /// With no subcommand the named checks (or the default list) are run.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config_path = self.config_path.as_deref();
        match &cli.command {
            Some(Commands::List(args)) => {
                let cmd =
                    super::list::ListCommand::new(&self.project_root, config_path, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
            None => {
                let cmd = super::check::CheckCommand::new(
                    &self.project_root,
                    config_path,
                    cli.check_args(),
                );
                cmd.execute(ui)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn load_catalog_applies_config_output_mode() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".envcheck");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.yml"), "settings:\n  output: quiet\n").unwrap();

        let mut ui = MockUI::new();
        let (_, registry) = load_catalog(temp.path(), None, &mut ui).unwrap();
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
        assert!(registry.lookup("git").is_some());
    }

    #[test]
    fn load_catalog_keeps_flag_output_mode() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".envcheck");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.yml"), "settings:\n  output: quiet\n").unwrap();

        let mut ui = MockUI::new();
        ui.set_output_mode(OutputMode::Verbose);
        load_catalog(temp.path(), None, &mut ui).unwrap();
        assert_eq!(ui.output_mode(), OutputMode::Verbose);
    }

    #[test]
    fn load_catalog_rejects_unknown_override() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("bad.yml");
        fs::write(&config, "minimum_versions:\n  svn: '1.0'\n").unwrap();

        let mut ui = MockUI::new();
        assert!(load_catalog(temp.path(), Some(&config), &mut ui).is_err());
    }
}
