//! Installation-instruction links for failed checks.

use crate::system::platform;

/// Default base URL for installation instructions.
pub const DEFAULT_SETUP_URL: &str = "http://software-carpentry.org/setup/";

/// (system, check) pairs with a dedicated instructions page.
const SUPPORTED: &[(&str, &str)] = &[
    ("Ubuntu", "emacs"),
    ("Ubuntu", "xemacs"),
    ("Ubuntu", "setuptools"),
    ("Ubuntu", "nose"),
    ("Ubuntu", "nosetests"),
    ("Ubuntu", "hg"),
    ("Ubuntu", "EasyMercurial"),
    ("Ubuntu", "sqlite3"),
];

/// Maps failing checks to installation-instruction URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remediation {
    base_url: String,
    system: String,
}

impl Remediation {
    /// Create a remediation table for an explicit system name.
    pub fn new(base_url: &str, system: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            system: platform::shorten_system_name(system).to_string(),
        }
    }

    /// Create a remediation table for the running system.
    pub fn detect(base_url: &str) -> Self {
        Self::new(base_url, &platform::system_name())
    }

    /// The base URL every link starts from.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The (shortened) system name links are chosen for.
    pub fn system(&self) -> &str {
        &self.system
    }

    /// URL with installation instructions for `check`.
    pub fn url_for(&self, check: &str) -> String {
        let supported = SUPPORTED
            .iter()
            .any(|(system, name)| *system == self.system && *name == check);

        if supported {
            format!(
                "{}{}.html#{}",
                self.base_url,
                urlencoding::encode(&self.system.to_lowercase()),
                urlencoding::encode(check)
            )
        } else {
            self.base_url.clone()
        }
    }
}

impl Default for Remediation {
    fn default() -> Self {
        Self::detect(DEFAULT_SETUP_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_pair_uses_base() {
        let remediation = Remediation::new(DEFAULT_SETUP_URL, "Darwin");
        assert_eq!(remediation.url_for("emacs"), DEFAULT_SETUP_URL);
    }

    #[test]
    fn supported_pair_links_to_system_page() {
        let remediation = Remediation::new(DEFAULT_SETUP_URL, "Ubuntu");
        assert_eq!(
            remediation.url_for("EasyMercurial"),
            "http://software-carpentry.org/setup/ubuntu.html#EasyMercurial"
        );
    }

    #[test]
    fn unsupported_check_on_supported_system_uses_base() {
        let remediation = Remediation::new(DEFAULT_SETUP_URL, "Ubuntu");
        assert_eq!(remediation.url_for("git"), DEFAULT_SETUP_URL);
    }

    #[test]
    fn long_system_names_are_shortened() {
        let remediation = Remediation::new(DEFAULT_SETUP_URL, "Gentoo Base System");
        assert_eq!(remediation.system(), "Gentoo");
    }

    #[test]
    fn custom_base_url() {
        let remediation = Remediation::new("https://example.org/setup/", "Ubuntu");
        assert_eq!(
            remediation.url_for("hg"),
            "https://example.org/setup/ubuntu.html#hg"
        );
    }
}
