//! User confirmation prompts for changes to the live site

use dialoguer::Confirm;

use crate::error::{Result, WikiError};

/// Ask before changing the site
///
/// `auto_approve` skips the prompt. Batch mode without `auto_approve`
/// declines, since nobody can answer.
pub fn confirm_changes(prompt: &str, auto_approve: bool, batch_mode: bool) -> Result<bool> {
    if auto_approve {
        return Ok(true);
    }
    if batch_mode {
        eprintln!("Batch mode: pass --auto-approve to apply changes without a prompt");
        return Ok(false);
    }

    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| WikiError::Config(format!("Failed to read confirmation: {}", e)))
}
