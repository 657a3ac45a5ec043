use crate::error::{GcmtError, Result};

/// Call the system editor to edit text
///
/// Use the `edit` crate to automatically select editors by priority:
/// $VISUAL > $EDITOR > Platform default list (nano/vim/vi/emacs/...)
///
/// # Returns
/// * `Ok(String)` - edited content
/// * `Err(GcmtError::UserCancelled)` - The user cleared the content
/// * `Err(_)` - other errors
pub fn edit_text(initial_content: &str) -> Result<String> {
    let edited = edit::edit(initial_content)?;

    let trimmed = edited.trim();
    if trimmed.is_empty() {
        return Err(GcmtError::UserCancelled);
    }

    Ok(edited)
}
