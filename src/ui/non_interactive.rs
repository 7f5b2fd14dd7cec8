//! Non-interactive UI for CI/headless environments.

use std::collections::HashMap;
use std::ffi::OsString;
use std::io::{self, BufRead, Write};

use crate::error::Result;

use super::{OutputMode, Prompt, UserInterface};

/// Prefix for environment variables that answer prompts.
const PROMPT_ENV_PREFIX: &str = "ENVCHECK_PROMPT_";

/// Collect `ENVCHECK_PROMPT_*` answers, ignoring entries that are not UTF-8.
fn prompt_overrides(
    vars: impl IntoIterator<Item = (OsString, OsString)>,
) -> HashMap<String, String> {
    vars.into_iter()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
        .collect()
}

/// UI implementation for non-interactive mode.
///
/// Prompt text goes to stderr. Answers come from `ENVCHECK_PROMPT_<KEY>`
/// environment variables (key uppercased, `-` replaced by `_`), otherwise
/// one line is read from stdin. End of input counts as the prompt default.
pub struct NonInteractiveUI {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
    input: Option<Box<dyn BufRead>>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI reading answers from stdin.
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            env_overrides: prompt_overrides(std::env::vars_os()),
            input: None,
        }
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            env_overrides: overrides,
            input: None,
        }
    }

    /// Read answers from `input` instead of stdin.
    pub fn with_input(mut self, input: impl BufRead + 'static) -> Self {
        self.input = Some(Box::new(input));
        self
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        let read = match &mut self.input {
            Some(input) => input.read_line(&mut line)?,
            None => io::stdin().lock().read_line(&mut line)?,
        };
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn env_key(prompt_key: &str) -> String {
        format!(
            "{}{}",
            PROMPT_ENV_PREFIX,
            prompt_key.to_uppercase().replace('-', "_")
        )
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn inline(&mut self, text: &str) {
        if self.mode.shows_progress() {
            print!("{}", text);
            std::io::stdout().flush().ok();
        }
    }

    fn verdict(&mut self, passed: bool) {
        if self.mode.shows_progress() {
            println!("{}", if passed { "pass" } else { "fail" });
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<String> {
        eprintln!("{}", prompt.question);

        if let Some(value) = self.env_overrides.get(&Self::env_key(&prompt.key)) {
            return Ok(value.clone());
        }

        match self.read_line()? {
            Some(answer) => Ok(answer),
            None => Ok(prompt.default.clone().unwrap_or_default()),
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}
