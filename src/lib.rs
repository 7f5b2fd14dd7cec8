//! envcheck - Verify that the tools and packages a workshop or project
//! needs are installed and recent enough.
//!
//! Checks form a graph: a check may require other checks (all must pass)
//! or be satisfied by any one of several alternatives. Each check probes
//! the machine once per run, and failures come with a link to
//! installation instructions.
//!
//! # Modules
//!
//! - [`checks`] - Probes, the check graph, the built-in catalog and the runner
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, merging, and validation
//! - [`error`] - Error types and result aliases
//! - [`system`] - Process execution, Python imports and platform facts
//! - [`ui`] - Terminal output and prompts
//! - [`version`] - Version parsing and comparison
//!
//! # Example
//!
//! ```
//! use envcheck::checks::{DependencySpec, RegistryBuilder};
//!
//! let mut builder = RegistryBuilder::new();
//! builder
//!     .add(DependencySpec::command("git").long_name("Git").minimum(&[1, 7, 0]))
//!     .add(DependencySpec::alternatives("virtual-vcs", &["git"]));
//! let registry = builder.build().unwrap();
//! assert_eq!(registry.dependency("git").unwrap().full_name(), "Git (git)");
//! ```

pub mod checks;
pub mod cli;
pub mod config;
pub mod error;
pub mod system;
pub mod ui;
pub mod version;

pub use error::{EnvcheckError, Result};
