//! System information dump for failed runs.
//!
//! When checks fail, operators are asked to send the whole output to
//! whoever is helping them. This block gives that helper enough context
//! about the machine to diagnose install problems.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::PathBuf;

use super::platform;

const KEY_WIDTH: usize = 19;

/// Snapshot of the machine envcheck is running on.
#[derive(Debug, Clone)]
pub struct SystemInfo {
    /// OS family (`unix`, `windows`).
    pub family: String,
    /// OS name from the standard library (`linux`, `macos`, ...).
    pub os: String,
    /// Distribution or system name used for setup URLs.
    pub system: String,
    /// CPU architecture.
    pub arch: String,
    /// Executable suffix.
    pub exe_suffix: String,
    /// envcheck version.
    pub version: String,
    /// Path of the running envcheck binary, if known.
    pub executable: Option<PathBuf>,
    /// Environment variables, sorted by key.
    pub environment: BTreeMap<String, String>,
}

impl SystemInfo {
    /// Collect information about the current process and machine.
    pub fn collect() -> Self {
        Self {
            family: std::env::consts::FAMILY.to_string(),
            os: std::env::consts::OS.to_string(),
            system: platform::system_name(),
            arch: std::env::consts::ARCH.to_string(),
            exe_suffix: platform::exe_suffix().to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            executable: std::env::current_exe().ok(),
            environment: environment_map(std::env::vars_os()),
        }
    }

    /// Render as the framed block printed after failures.
    pub fn render(&self) -> Vec<String> {
        let rule = "=".repeat(18);
        let mut lines = vec![
            rule.clone(),
            "System information".to_string(),
            rule.clone(),
            info_line("os.family", &self.family),
            info_line("os.name", &self.os),
            info_line("system", &self.system),
            info_line("arch", &self.arch),
            info_line("exe_suffix", &format!("{:?}", self.exe_suffix)),
            info_line("envcheck", &self.version),
        ];
        if let Some(exe) = &self.executable {
            lines.push(info_line("executable", &exe.display().to_string()));
        }
        lines.push(info_line("environment", ""));
        for (key, value) in &self.environment {
            lines.push(format!("  {}={}", key, value));
        }
        lines.push(rule);
        lines
    }
}

/// Environment as text; bytes that are not UTF-8 are replaced.
fn environment_map(
    vars: impl IntoIterator<Item = (OsString, OsString)>,
) -> BTreeMap<String, String> {
    vars.into_iter()
        .map(|(k, v)| {
            (
                k.to_string_lossy().into_owned(),
                v.to_string_lossy().into_owned(),
            )
        })
        .collect()
}

fn info_line(key: &str, value: &str) -> String {
    let pad = KEY_WIDTH.saturating_sub(key.len());
    format!("{}{}: {}", key, " ".repeat(pad), value)
}

/// Closing advice printed after a failed run.
pub fn suggestions(setup_url: &str) -> Vec<String> {
    vec![
        String::new(),
        "For suggestions on installing missing packages, see".to_string(),
        setup_url.to_string(),
        String::new(),
        "For instructions on installing a particular package,".to_string(),
        "see the failure message for that package printed above.".to_string(),
        String::new(),
        "For help, email the *entire* output of this run to".to_string(),
        "your instructor.".to_string(),
    ]
}
