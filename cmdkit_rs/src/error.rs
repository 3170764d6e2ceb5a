//! Error types for registration, binding and dispatch.
//!
//! Binding-time `MissingArgument`s are collected and reported together as
//! [`DispatchError::MissingArguments`]; every other variant aborts the
//! invocation at the point it occurs.

use thiserror::Error;

use crate::types::ValueType;

/// A raw string that could not be parsed as the declared type.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("'{value}' is not a valid {expected}")]
pub struct CoercionError {
    pub value: String,
    pub expected: ValueType,
}

/// Failure returned by a command's entry point.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Arguments were individually valid but rejected by the command itself.
    /// Reported to the user together with the command help.
    #[error("{0}")]
    Argument(String),

    /// Any other failure; propagated as fatal.
    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

impl CommandError {
    pub fn argument(message: impl Into<String>) -> Self {
        CommandError::Argument(message.into())
    }
}

/// Errors surfaced by [`crate::cli::Program::dispatch`].
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("No command given")]
    NoCommand,

    #[error("Unknown command: {name}")]
    UnknownCommand {
        name: String,
        suggestion: Option<String>,
    },

    /// Every required option/positional that had no value.
    #[error("{}", format_missing(.0))]
    MissingArguments(Vec<String>),

    #[error("Invalid value for {name}: {source}")]
    TypeCoercion {
        name: String,
        #[source]
        source: CoercionError,
    },

    #[error("{0}")]
    CommandArgument(String),

    #[error("Command '{command}' failed: {source}")]
    Execution {
        command: String,
        #[source]
        source: anyhow::Error,
    },
}

fn format_missing(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("Missing argument: {}", name))
        .collect::<Vec<_>>()
        .join("\n")
}

impl DispatchError {
    /// Whether the caller should follow the message with the command help.
    pub fn wants_command_help(&self) -> bool {
        matches!(
            self,
            DispatchError::MissingArguments(_)
                | DispatchError::TypeCoercion { .. }
                | DispatchError::CommandArgument(_)
        )
    }
}

/// A descriptor rejected when it is registered.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistrationError {
    #[error("command name must not be empty")]
    EmptyName,

    #[error("command '{command}': option #{index} has no long name, short name or binder name")]
    UnnamedOption { command: String, index: usize },

    #[error("command '{command}': positional '{positional}' takes all values but is not last")]
    GreedyPositionalNotLast { command: String, positional: String },

    #[error("command '{command}': default '{value}' for '{name}' is not a valid {expected}")]
    InvalidDefault {
        command: String,
        name: String,
        value: String,
        expected: ValueType,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_arguments_render_one_per_line() {
        let err = DispatchError::MissingArguments(vec!["count".into(), "file".into()]);
        assert_eq!(
            err.to_string(),
            "Missing argument: count\nMissing argument: file"
        );
        assert!(err.wants_command_help());
    }

    #[test]
    fn test_coercion_error_names_the_option() {
        let err = DispatchError::TypeCoercion {
            name: "count".into(),
            source: ValueType::Integer.coerce("abc").unwrap_err(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for count: 'abc' is not a valid integer"
        );
    }

    #[test]
    fn test_anyhow_converts_into_failed() {
        let err: CommandError = anyhow::anyhow!("disk full").into();
        assert!(matches!(err, CommandError::Failed(_)));
        assert_eq!(err.to_string(), "disk full");
    }

    #[test]
    fn test_unknown_command_skips_help() {
        let err = DispatchError::UnknownCommand {
            name: "rnu".into(),
            suggestion: Some("run".into()),
        };
        assert!(!err.wants_command_help());
        assert_eq!(err.to_string(), "Unknown command: rnu");
    }
}
