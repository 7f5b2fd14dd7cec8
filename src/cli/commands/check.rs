//! Check command implementation.
//!
//! Runs the named checks (or the default list), prints a line per check
//! while it runs, then the `Successes:`/`Failures:` report. A failing run
//! ends with system information and installation pointers.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::checks::{known_checks, CheckRunner, ProbeContext, Remediation};
use crate::cli::args::CheckArgs;
use crate::error::{EnvcheckError, Result};
use crate::system::info::suggestions;
use crate::system::{CommandRunner, ModuleImporter, PythonImporter, SystemInfo, SystemRunner};
use crate::ui::{OutputMode, UserInterface};

use super::dispatcher::{load_catalog, Command, CommandResult};

/// The check command implementation.
pub struct CheckCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(project_root: &Path, config_path: Option<&Path>, args: CheckArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }

    /// Run against explicit process and import seams.
    pub fn run_with(
        &self,
        ui: &mut dyn UserInterface,
        commands: &dyn CommandRunner,
        modules: Option<&dyn ModuleImporter>,
    ) -> Result<CommandResult> {
        let (config, registry) = load_catalog(&self.project_root, self.config_path.as_deref(), ui)?;

        // Progress lines would corrupt the JSON document on stdout
        if self.args.json {
            ui.set_output_mode(OutputMode::Quiet);
        }

        let importer = PythonImporter::new(config.python());
        let modules = modules.unwrap_or(&importer);
        let runner = CheckRunner::new(&registry).with_defaults(config.default_checks());

        let report = {
            let mut ctx = ProbeContext {
                commands,
                modules,
                ui: &mut *ui,
            };
            match runner.run(&self.args.checks, &mut ctx) {
                Ok(report) => report,
                Err(EnvcheckError::InvalidCheck { name }) => {
                    ui.error(&format!("I don't know how to check for '{}'", name));
                    ui.message("I do know how to check for:");
                    for line in known_checks(&registry) {
                        ui.message(&line);
                    }
                    return Ok(CommandResult::failure(1));
                }
                Err(e) => return Err(e),
            }
        };

        let remediation = Remediation::detect(config.setup_url());
        tracing::debug!("remediation links for system '{}'", remediation.system());

        if self.args.json {
            let json = report
                .to_json(&remediation)
                .context("Failed to serialize report")?;
            println!("{}", json);
        } else if ui.output_mode().shows_status() {
            for line in report.render(&remediation) {
                ui.message(&line);
            }

            let show_info = config.settings.system_info && !self.args.no_system_info;
            if !report.passed() && show_info && ui.output_mode().shows_diagnostics() {
                ui.message("");
                for line in SystemInfo::collect().render() {
                    ui.message(&line);
                }
                for line in suggestions(config.setup_url()) {
                    ui.message(&line);
                }
            }
        }

        if report.passed() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        self.run_with(ui, &SystemRunner, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::test_support::{ScriptedCommands, ScriptedModules};
    use crate::system::CommandOutput;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn args(checks: &[&str]) -> CheckArgs {
        CheckArgs {
            checks: checks.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    fn git_ok() -> ScriptedCommands {
        ScriptedCommands::new().on(
            "git --version",
            CommandOutput::new(Some(0), "git version 2.39.2", ""),
        )
    }

    #[test]
    fn passing_run_prints_successes() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        let modules = ScriptedModules::new();
        let cmd = CheckCommand::new(temp.path(), None, args(&["git"]));

        let result = cmd.run_with(&mut ui, &git_ok(), Some(&modules)).unwrap();
        assert!(result.success);
        assert!(ui.has_line("check Git (git)...\tpass"));
        assert!(ui.has_line("Successes:"));
        assert!(ui.has_line("Git (git) 2.39.2"));
        assert!(!ui.has_line("System information"));
    }

    #[test]
    fn failing_run_prints_system_information() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        let modules = ScriptedModules::new();
        let cmd = CheckCommand::new(temp.path(), None, args(&["hg"]));

        let result = cmd
            .run_with(&mut ui, &ScriptedCommands::new(), Some(&modules))
            .unwrap();
        assert_eq!(result.exit_code, 1);
        assert!(ui.has_line("check for Mercurial (hg) failed:"));
        assert!(ui.has_line("System information"));
        assert!(ui.has_line("For help, email the *entire* output of this run to"));
    }

    #[test]
    fn no_system_info_flag_suppresses_block() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        let modules = ScriptedModules::new();
        let cmd = CheckCommand::new(
            temp.path(),
            None,
            CheckArgs {
                no_system_info: true,
                ..args(&["hg"])
            },
        );

        cmd.run_with(&mut ui, &ScriptedCommands::new(), Some(&modules))
            .unwrap();
        assert!(ui.has_line("Failures:"));
        assert!(!ui.has_line("System information"));
    }

    #[test]
    fn unknown_check_lists_known_ones() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        let commands = ScriptedCommands::new();
        let modules = ScriptedModules::new();
        let cmd = CheckCommand::new(temp.path(), None, args(&["git", "svn"]));

        let result = cmd.run_with(&mut ui, &commands, Some(&modules)).unwrap();
        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("I don't know how to check for 'svn'"));
        assert!(ui.has_line("I do know how to check for:"));
        assert!(ui.has_line("  git                  (Git)"));
        assert_eq!(commands.call_count("git --version"), 0);
    }

    #[test]
    fn config_minimum_override_applies() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".envcheck");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.yml"), "minimum_versions:\n  git: '3.0'\n").unwrap();

        let mut ui = MockUI::new();
        let modules = ScriptedModules::new();
        let cmd = CheckCommand::new(temp.path(), None, args(&["git"]));

        let result = cmd.run_with(&mut ui, &git_ok(), Some(&modules)).unwrap();
        assert!(!result.success);
        assert!(ui.has_line("outdated version of Git (git): 2.39.2 (need >= 3.0)"));
    }

    #[test]
    fn json_mode_suppresses_progress_lines() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        let modules = ScriptedModules::new();
        let cmd = CheckCommand::new(
            temp.path(),
            None,
            CheckArgs {
                json: true,
                ..args(&["git"])
            },
        );

        let result = cmd.run_with(&mut ui, &git_ok(), Some(&modules)).unwrap();
        assert!(result.success);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
        assert!(!ui.has_line("Successes:"));
    }

    #[test]
    fn configured_default_list_is_used() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("envcheck.yml");
        fs::write(&config, "checks: [git]\n").unwrap();

        let mut ui = MockUI::new();
        let modules = ScriptedModules::new();
        let cmd = CheckCommand::new(temp.path(), Some(&config), args(&[]));

        let result = cmd.run_with(&mut ui, &git_ok(), Some(&modules)).unwrap();
        assert!(result.success);
        assert!(ui.has_line("Git (git) 2.39.2"));
    }
}
