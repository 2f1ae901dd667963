use serde::{Deserialize, Serialize};

mod validation;
#[cfg(test)]
mod tests;

pub use validation::{validate, ValidationError};

/// Command represents one unit of work for a polling agent.
///
/// Commands have a fixed envelope: an optional target agent, a verb, and
/// positional string arguments whose meaning the agent derives from the verb.
/// A command is immutable once enqueued and carries no identity beyond its
/// position in the dispatch queue.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Command {
    /// Agent the command is addressed to (wire name "player")
    /// Absent means any agent may claim it; agents filter by name themselves
    #[serde(rename = "player")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    /// The verb (e.g., "give", "flame")
    /// Must be non-empty; the relay does not restrict the vocabulary
    #[serde(rename = "command")]
    pub name: String,

    /// Positional arguments, interpreted per verb by the agent
    /// May be empty, but never absent
    pub args: Vec<String>,
}

impl Command {
    /// Creates a command any agent may claim.
    pub fn new(name: &str, args: Vec<String>) -> Self {
        Self {
            target: None,
            name: name.to_string(),
            args,
        }
    }

    /// Creates a command addressed to a single agent.
    pub fn targeted(target: &str, name: &str, args: Vec<String>) -> Self {
        Self {
            target: Some(target.to_string()),
            name: name.to_string(),
            args,
        }
    }

    /// Validates a command after deserialization.
    ///
    /// Structural checks (fields present, correct types) already happened in
    /// serde; this enforces the value rules the type system cannot express.
    ///
    /// Returns Ok(()) if valid, Err(ValidationError) otherwise.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate(self)
    }
}
