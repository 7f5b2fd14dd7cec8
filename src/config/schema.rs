//! Configuration schema.
//!
//! Every field is optional; an absent config file behaves like an empty one.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::checks::catalog::{DEFAULT_CHECKS, DEFAULT_PYTHON};
use crate::checks::DEFAULT_SETUP_URL;
use crate::ui::OutputMode;

/// Merged configuration from every config layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EnvcheckConfig {
    /// Checks to run when none are named on the command line.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub checks: Vec<String>,

    /// Base URL for installation instructions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setup_url: Option<String>,

    /// Python interpreter for the `python` check and package imports.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub python: Option<String>,

    /// Minimum versions by check name, overriding the built-in ones.
    ///
    /// Values are strings so `"2.10"` is not read as a float.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub minimum_versions: BTreeMap<String, String>,

    /// Output settings.
    pub settings: Settings,
}

impl EnvcheckConfig {
    /// Interpreter to probe, falling back to `python`.
    pub fn python(&self) -> &str {
        self.python.as_deref().unwrap_or(DEFAULT_PYTHON)
    }

    /// Base URL for installation instructions.
    pub fn setup_url(&self) -> &str {
        self.setup_url.as_deref().unwrap_or(DEFAULT_SETUP_URL)
    }

    /// Checks run when the command line names none.
    pub fn default_checks(&self) -> Vec<String> {
        if self.checks.is_empty() {
            DEFAULT_CHECKS.iter().map(|s| s.to_string()).collect()
        } else {
            self.checks.clone()
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Output mode when no flag overrides it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputMode>,

    /// Print system information after a failing run.
    pub system_info: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output: None,
            system_info: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        let config: EnvcheckConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, EnvcheckConfig::default());
        assert!(config.settings.system_info);
        assert_eq!(config.python(), "python");
        assert_eq!(config.setup_url(), "http://software-carpentry.org/setup/");
    }

    #[test]
    fn parses_every_field() {
        let yaml = r#"
checks: [git, make]
setup_url: https://example.org/setup/
python: python3
minimum_versions:
  git: "2.0"
settings:
  output: quiet
  system_info: false
"#;
        let config: EnvcheckConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.default_checks(), vec!["git", "make"]);
        assert_eq!(config.setup_url(), "https://example.org/setup/");
        assert_eq!(config.python(), "python3");
        assert_eq!(config.minimum_versions["git"], "2.0");
        assert_eq!(config.settings.output, Some(OutputMode::Quiet));
        assert!(!config.settings.system_info);
    }

    #[test]
    fn default_checks_fall_back_to_builtin_list() {
        let config = EnvcheckConfig::default();
        assert_eq!(config.default_checks().len(), DEFAULT_CHECKS.len());
        assert_eq!(config.default_checks()[0], "virtual-shell");
    }

    #[test]
    fn rejects_unknown_output_mode() {
        let result: Result<EnvcheckConfig, _> =
            serde_yaml::from_str("settings:\n  output: loud\n");
        assert!(result.is_err());
    }
}
