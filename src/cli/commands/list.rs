//! List command implementation.
//!
//! The `envcheck list` command prints every known check, or with
//! `--defaults` the checks a bare `envcheck` run would perform.

use std::path::{Path, PathBuf};

use crate::checks::known_checks;
use crate::cli::args::ListArgs;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{load_catalog, Command, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(project_root: &Path, config_path: Option<&Path>, args: ListArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: config_path.map(Path::to_path_buf),
            args,
        }
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let (config, registry) = load_catalog(&self.project_root, self.config_path.as_deref(), ui)?;

        if self.args.defaults {
            for name in config.default_checks() {
                ui.message(&name);
            }
        } else {
            for line in known_checks(&registry) {
                ui.message(&line);
            }
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn lists_every_check() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        let cmd = ListCommand::new(temp.path(), None, ListArgs::default());
        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_line("  git                  (Git)"));
        assert!(ui.has_line("  pip"));
        assert!(ui.has_line("virtual-editor"));
    }

    #[test]
    fn lists_configured_defaults() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("envcheck.yml");
        fs::write(&config, "checks: [git, make]\n").unwrap();

        let mut ui = MockUI::new();
        let cmd = ListCommand::new(temp.path(), Some(&config), ListArgs { defaults: true });
        cmd.execute(&mut ui).unwrap();
        assert_eq!(ui.lines(), &["git".to_string(), "make".to_string()]);
    }
}
