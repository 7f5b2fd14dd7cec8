//! Interaction with the host system.
//!
//! - [`command`] - Running external programs for command probes
//! - [`import`] - Importing Python modules for package probes
//! - [`platform`] - Operating system identification
//! - [`info`] - System information printed after failed runs

pub mod command;
pub mod import;
pub mod info;
pub mod platform;

pub use command::{display_command, CommandOutput, CommandRunner, SystemRunner};
pub use import::{ImportError, ModuleImporter, PythonImporter, VersionSource};
pub use info::SystemInfo;
pub use platform::{exe_suffix, is_ci, system_name};
