use super::Command;
use std::fmt;

/// Validation errors for Command
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    MissingName,
    EmptyTarget,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingName => {
                write!(f, "command is required and must be non-empty")
            }
            ValidationError::EmptyTarget => {
                write!(f, "player, when present, must be non-empty")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validates a Command.
///
/// Validation rules:
/// - Name (the verb): must be non-empty; otherwise agents have nothing to
///   dispatch on
/// - Target: absent is fine (any agent may claim the command), but an empty
///   string is rejected because it names neither a real agent nor "any"
/// - Args: any content allowed, including the empty list
pub fn validate(cmd: &Command) -> Result<(), ValidationError> {
    if cmd.name.is_empty() {
        return Err(ValidationError::MissingName);
    }

    if matches!(cmd.target.as_deref(), Some("")) {
        return Err(ValidationError::EmptyTarget);
    }

    Ok(())
}
