//! Recoverable editing errors.
//!
//! Out-of-range indices are never errors (they clamp or no-op). The only
//! failures a buffer mutation reports are the capacity caps. Command-line
//! input has its own error type. The dispatcher shows both on the status
//! line; their `Display` text is the message the user sees.

use thiserror::Error;

/// A buffer mutation that was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EditError {
    /// The buffer already holds the maximum number of rows.
    #[error("Too many lines (limit is {max})")]
    RowLimit { max: usize },

    /// The row would grow past the per-row byte cap.
    #[error("Line {} too long (limit is {max} bytes)", .row + 1)]
    RowTooLong { row: usize, max: usize },
}

/// A `:` command that could not run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Not an editor command: {0}")]
    Unknown(String),

    #[error("Invalid substitute command")]
    InvalidSubstitute,

    #[error("Invalid pattern: {0}")]
    BadPattern(String),

    #[error("Pattern not found: {0}")]
    PatternNotFound(String),

    #[error("No write since last change (add ! to override)")]
    UnsavedChanges,

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Invalid argument: {option}={value}")]
    InvalidValue { option: String, value: String },

    #[error(transparent)]
    Edit(#[from] EditError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_user_facing() {
        assert_eq!(
            EditError::RowLimit { max: 10 }.to_string(),
            "Too many lines (limit is 10)"
        );
        assert_eq!(
            EditError::RowTooLong { row: 0, max: 4 }.to_string(),
            "Line 1 too long (limit is 4 bytes)"
        );
    }

    #[test]
    fn command_messages() {
        assert_eq!(
            CommandError::Unknown("frob".into()).to_string(),
            "Not an editor command: frob"
        );
        assert_eq!(
            CommandError::UnsavedChanges.to_string(),
            "No write since last change (add ! to override)"
        );
        assert_eq!(
            CommandError::InvalidValue {
                option: "tabstop".into(),
                value: "0".into()
            }
            .to_string(),
            "Invalid argument: tabstop=0"
        );
        let wrapped: CommandError = EditError::RowLimit { max: 1 }.into();
        assert_eq!(wrapped.to_string(), "Too many lines (limit is 1)");
    }
}
