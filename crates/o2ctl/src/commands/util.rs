//! Shared helpers for command handlers.

use std::io::IsTerminal;

use dialoguer::Input;

use crate::error::CliError;

/// Destructive-action gate: the operator must type `literal` back
/// exactly, anything else declines. `--yes` bypasses the prompt; a
/// non-interactive session without `--yes` is an error rather than a
/// hung read.
pub fn typed_confirmation(
    prompt: &str,
    literal: &str,
    action: &str,
    yes_flag: bool,
) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }

    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes { action: action.into() });
    }

    let entered: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;

    Ok(entered == literal)
}
