//! Configuration validation against the check registry.
//!
//! Config refers to checks by name, so it can only be validated once the
//! catalog is known. All problems are collected rather than stopping at the
//! first one.

use crate::checks::RegistryBuilder;
use crate::config::schema::EnvcheckConfig;
use crate::error::{EnvcheckError, Result};
use crate::version;

/// A single validation problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
    /// Check the problem refers to
    pub check: Option<String>,
}

/// Validate `config` against the checks in `builder`, returning every problem.
pub fn validate_config(config: &EnvcheckConfig, builder: &RegistryBuilder) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for name in &config.checks {
        if !builder.contains(name) {
            errors.push(ValidationError {
                rule: "unknown-check".to_string(),
                message: format!("'checks' lists unknown check '{}'", name),
                check: Some(name.clone()),
            });
        }
    }

    for (name, raw) in &config.minimum_versions {
        let Some(spec) = builder.get(name) else {
            errors.push(ValidationError {
                rule: "unknown-check".to_string(),
                message: format!("'minimum_versions' names unknown check '{}'", name),
                check: Some(name.clone()),
            });
            continue;
        };
        match version::parse(raw, &spec.delimiter) {
            Ok(Some(_)) => {}
            Ok(None) => errors.push(ValidationError {
                rule: "empty-version".to_string(),
                message: format!("minimum version for '{}' is empty", name),
                check: Some(name.clone()),
            }),
            Err(e) => errors.push(ValidationError {
                rule: "invalid-version".to_string(),
                message: format!("minimum version for '{}': {}", name, e),
                check: Some(name.clone()),
            }),
        }
    }

    errors
}

/// Validate and fail on the first problem.
pub fn validate(config: &EnvcheckConfig, builder: &RegistryBuilder) -> Result<()> {
    let errors = validate_config(config, builder);
    if errors.is_empty() {
        return Ok(());
    }

    let message = errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    Err(EnvcheckError::ConfigValidationError { message })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::DependencySpec;

    fn builder() -> RegistryBuilder {
        let mut builder = RegistryBuilder::new();
        builder
            .add(DependencySpec::command("git"))
            .add(DependencySpec::command("make"));
        builder
    }

    fn config(yaml: &str) -> EnvcheckConfig {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn valid_config_has_no_errors() {
        let config = config("checks: [git]\nminimum_versions:\n  git: '2.0'\n");
        assert!(validate_config(&config, &builder()).is_empty());
        assert!(validate(&config, &builder()).is_ok());
    }

    #[test]
    fn unknown_checks_are_reported() {
        let config = config("checks: [git, svn]\nminimum_versions:\n  cvs: '1.0'\n");
        let errors = validate_config(&config, &builder());
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.rule == "unknown-check"));
        assert_eq!(errors[0].check.as_deref(), Some("svn"));
    }

    #[test]
    fn bad_minimum_versions_are_reported() {
        let config = config("minimum_versions:\n  git: 2.x\n  make: ''\n");
        let rules: Vec<String> = validate_config(&config, &builder())
            .into_iter()
            .map(|e| e.rule)
            .collect();
        assert_eq!(rules, vec!["invalid-version", "empty-version"]);
    }

    #[test]
    fn validate_joins_messages() {
        let config = config("checks: [svn]\n");
        let err = validate(&config, &builder()).unwrap_err();
        assert!(matches!(err, EnvcheckError::ConfigValidationError { .. }));
        assert!(err.to_string().contains("svn"));
    }
}
