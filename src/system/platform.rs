//! Platform identification.

use std::fs;

/// Short names for systems that report a long distribution name.
const SYSTEM_ALIASES: &[(&str, &str)] = &[("Gentoo Base System", "Gentoo")];

/// Identify the running operating system by name.
///
/// On Linux this is the distribution name from `/etc/os-release` (e.g.
/// `Ubuntu`), falling back to `Linux`. Other systems report their kernel
/// family name (`Darwin`, `Windows`, ...).
pub fn system_name() -> String {
    let name = match std::env::consts::OS {
        "linux" => fs::read_to_string("/etc/os-release")
            .ok()
            .and_then(|content| parse_os_release(&content))
            .unwrap_or_else(|| "Linux".to_string()),
        "macos" => "Darwin".to_string(),
        "windows" => "Windows".to_string(),
        other => capitalize(other),
    };
    shorten_system_name(&name).to_string()
}

/// Map long system names to the short form used in setup URLs.
pub fn shorten_system_name(name: &str) -> &str {
    SYSTEM_ALIASES
        .iter()
        .find(|(long, _)| *long == name)
        .map(|(_, short)| *short)
        .unwrap_or(name)
}

/// Extract the `NAME=` value from an os-release file.
pub fn parse_os_release(content: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let value = line.strip_prefix("NAME=")?;
        let value = value.trim().trim_matches('"').trim_matches('\'');
        (!value.is_empty()).then(|| value.to_string())
    })
}

/// File suffix for executables on this platform (`.exe` on Windows).
pub fn exe_suffix() -> &'static str {
    std::env::consts::EXE_SUFFIX
}

/// Check if running in a CI environment.
///
/// Used to auto-detect CI and force non-interactive mode in `main()`.
/// Checks common CI environment variables: `CI`, `GITHUB_ACTIONS`,
/// `GITLAB_CI`, `CIRCLECI`, `TRAVIS`, `JENKINS_URL`.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
