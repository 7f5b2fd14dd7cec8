//! Configuration file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::merger::merge_layers;
use crate::config::schema::EnvcheckConfig;
use crate::error::{EnvcheckError, Result};

/// Name of the per-user and per-project config directory.
pub const CONFIG_DIR: &str = ".envcheck";

/// Paths to configuration files in merge order (later overrides earlier).
///
/// 1. User global config (`~/.envcheck/config.yml`)
/// 2. Project config (`.envcheck/config.yml`)
/// 3. Local overrides (`.envcheck/config.local.yml`)
/// 4. An explicit `--config` file
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    pub user_global: Option<PathBuf>,
    pub project: Option<PathBuf>,
    pub project_local: Option<PathBuf>,
    pub explicit: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover existing config files for `project_root`.
    ///
    /// `explicit` is kept even if it does not exist so loading can report it.
    pub fn discover(project_root: &Path, explicit: Option<&Path>) -> Self {
        Self {
            user_global: dirs::home_dir()
                .map(|home| home.join(CONFIG_DIR).join("config.yml"))
                .filter(|p| p.exists()),
            project: existing(project_root.join(CONFIG_DIR).join("config.yml")),
            project_local: existing(project_root.join(CONFIG_DIR).join("config.local.yml")),
            explicit: explicit.map(Path::to_path_buf),
        }
    }

    /// Discovered layers in merge order, excluding the explicit file.
    pub fn discovered(&self) -> Vec<&PathBuf> {
        [&self.user_global, &self.project, &self.project_local]
            .into_iter()
            .flatten()
            .collect()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    path.exists().then_some(path)
}

/// Walk up from `start` to the nearest directory with `.envcheck` or `.git`.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(CONFIG_DIR).is_dir() || current.join(".git").exists() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Read one file as a raw YAML value.
///
/// # Errors
///
/// `ConfigNotFound` if the file is missing, `ConfigParseError` if it is not
/// valid YAML.
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            EnvcheckError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            EnvcheckError::Io(e)
        }
    })?;

    serde_yaml::from_str(&content).map_err(|e| EnvcheckError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load and merge every config layer.
///
/// Having no config at all is fine and yields the defaults. A discovered
/// layer that cannot be read is skipped with a warning; an explicit file
/// must exist and parse.
pub fn load_config(project_root: &Path, explicit: Option<&Path>) -> Result<EnvcheckConfig> {
    let paths = ConfigPaths::discover(project_root, explicit);
    let mut layers = Vec::new();

    for path in paths.discovered() {
        match load_config_value(path) {
            Ok(value) => layers.push(value),
            Err(EnvcheckError::Io(e)) => {
                tracing::warn!("skipping unreadable config {}: {}", path.display(), e);
            }
            Err(e) => return Err(e),
        }
    }
    if let Some(path) = &paths.explicit {
        layers.push(load_config_value(path)?);
    }

    tracing::debug!("loaded {} config layers", layers.len());

    let source = paths
        .explicit
        .clone()
        .unwrap_or_else(|| project_root.join(CONFIG_DIR).join("config.yml"));
    serde_yaml::from_value(merge_layers(layers)).map_err(|e| EnvcheckError::ConfigParseError {
        path: source,
        message: format!("Failed to parse merged config: {}", e),
    })
}
