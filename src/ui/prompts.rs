//! Interactive prompts.

use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;

use crate::error::{EnvcheckError, Result};

use super::Prompt;

/// Convert dialoguer errors to EnvcheckError.
fn map_dialoguer_err(e: dialoguer::Error) -> EnvcheckError {
    EnvcheckError::Io(e.into())
}

/// Dialoguer theme without the default yellow `?` prefix.
fn prompt_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("".to_string()),
        ..ColorfulTheme::default()
    }
}

/// Prompt the user for one line of input.
///
/// Empty input is accepted: task prompts only wait for the operator to
/// press enter.
pub fn prompt_user(prompt: &Prompt, term: &Term) -> Result<String> {
    let theme = prompt_theme();
    let input = Input::<String>::with_theme(&theme)
        .with_prompt(&prompt.question)
        .allow_empty(true);

    let result = if let Some(default) = &prompt.default {
        input
            .default(default.clone())
            .show_default(false)
            .interact_text_on(term)
    } else {
        input.interact_text_on(term)
    };

    result.map_err(map_dialoguer_err)
}
