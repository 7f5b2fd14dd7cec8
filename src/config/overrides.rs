//! Applying configuration to the built-in catalog.

use crate::checks::RegistryBuilder;
use crate::config::schema::EnvcheckConfig;
use crate::config::validator::validate;
use crate::error::{EnvcheckError, Result};
use crate::version;

/// Validate `config` and apply its minimum-version overrides to `builder`.
///
/// Versions are parsed with each check's own delimiter.
pub fn apply_overrides(config: &EnvcheckConfig, builder: &mut RegistryBuilder) -> Result<()> {
    validate(config, builder)?;

    for (name, raw) in &config.minimum_versions {
        let Some(spec) = builder.get_mut(name) else {
            continue;
        };
        let minimum = version::parse(raw, &spec.delimiter).map_err(|e| {
            EnvcheckError::ConfigValidationError {
                message: format!("minimum version for '{}': {}", name, e),
            }
        })?;
        tracing::debug!("minimum version for {} set to {}", name, raw);
        spec.minimum = minimum;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::{catalog, DependencySpec};
    use crate::version::VersionTuple;

    #[test]
    fn overrides_builtin_minimum() {
        let config: EnvcheckConfig =
            serde_yaml::from_str("minimum_versions:\n  git: '2.30'\n").unwrap();
        let mut builder = catalog::builtin("python");
        apply_overrides(&config, &mut builder).unwrap();

        let registry = builder.build().unwrap();
        assert_eq!(
            registry.dependency("git").unwrap().minimum(),
            Some(&VersionTuple::from(vec![2, 30]))
        );
    }

    #[test]
    fn adds_minimum_where_none_existed() {
        let config: EnvcheckConfig =
            serde_yaml::from_str("minimum_versions:\n  make: '4'\n").unwrap();
        let mut builder = RegistryBuilder::new();
        builder.add(DependencySpec::command("make"));
        apply_overrides(&config, &mut builder).unwrap();
        assert_eq!(
            builder.get_mut("make").unwrap().minimum,
            Some(VersionTuple::from(vec![4]))
        );
    }

    #[test]
    fn rejects_unknown_check() {
        let config: EnvcheckConfig =
            serde_yaml::from_str("minimum_versions:\n  svn: '1.0'\n").unwrap();
        let mut builder = catalog::builtin("python");
        let result = apply_overrides(&config, &mut builder);
        assert!(matches!(result, Err(EnvcheckError::ConfigValidationError { .. })));
    }

    #[test]
    fn minimum_on_path_check_fails_at_build() {
        let config: EnvcheckConfig =
            serde_yaml::from_str("minimum_versions:\n  xcode: '4.0'\n").unwrap();
        let mut builder = catalog::builtin("python");
        apply_overrides(&config, &mut builder).unwrap();
        assert!(matches!(
            builder.build(),
            Err(EnvcheckError::InvalidDefinition { .. })
        ));
    }
}
