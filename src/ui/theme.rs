//! Visual theme and styling.

use console::Style;

/// envcheck's visual theme.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Style for passing checks (green).
    pub success: Style,
    /// Style for failing checks and error messages (red bold).
    pub error: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            error: Style::new().red().bold(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            error: Style::new(),
        }
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format the `pass`/`fail` verdict that ends a check line.
    pub fn format_verdict(&self, passed: bool) -> String {
        if passed {
            self.success.apply_to("pass").to_string()
        } else {
            self.error.apply_to("fail").to_string()
        }
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    // Check if stdout is a TTY
    console::Term::stdout().is_term()
}
