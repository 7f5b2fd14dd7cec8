//! Configuration loading, merging and validation.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Layer merging in [`merger`]
//! - Validation against the catalog in [`validator`]
//! - Applying overrides to the catalog in [`overrides`]
//!
//! # Example
//!
//! ```
//! use envcheck::config::load_config;
//! use std::fs;
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".envcheck");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(dir.join("config.yml"), "python: python3").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert_eq!(config.python(), "python3");
//! ```
//!
//! # Configuration File Locations
//!
//! Layers are merged in this order, later ones winning:
//! 1. User global config (`~/.envcheck/config.yml`)
//! 2. Project config (`.envcheck/config.yml`)
//! 3. Local overrides (`.envcheck/config.local.yml`)
//! 4. The file passed with `--config`

pub mod loader;
pub mod merger;
pub mod overrides;
pub mod schema;
pub mod validator;

pub use loader::{find_project_root, load_config, load_config_value, ConfigPaths, CONFIG_DIR};
pub use merger::{merge_into, merge_layers};
pub use overrides::apply_overrides;
pub use schema::{EnvcheckConfig, Settings};
pub use validator::{validate, validate_config, ValidationError};
