//! Core error types

use std::sync::Arc;
use thiserror::Error;

/// Result type alias for dispatcher operations
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Structural routing failures.
///
/// These indicate a contract violation between the transport and the
/// registered handler tree, never a user mistake.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoutingError {
    /// The option tree nests deeper than command → group → sub-command
    #[error("Command chain is too long: {depth} nested levels (max 2)")]
    ChainTooLong { depth: usize },

    /// A two-level route named something that is not a sub-command group
    #[error("`{name}` is not a sub-command group")]
    NotAGroup { name: String },

    /// No command is registered under the interaction's command name
    #[error("Unknown command: {name}")]
    UnknownCommand { name: String },

    /// Autocomplete was requested without a focused option
    #[error("Autocomplete interaction has no focused option")]
    NoFocusedOption,
}

/// Domain-level command errors.
///
/// Every variant is recoverable at each enclosing scope through local error
/// handlers and is always surfaced to the global error sink.
#[derive(Error, Debug, Clone)]
pub enum CommandError {
    /// A pre-invocation check returned false or failed
    #[error("Check failed: {message}")]
    CheckFailure { message: String },

    /// A required parameter had no value and no default
    #[error("Missing required argument: {param}")]
    MissingArgument { param: String },

    /// A parameter value could not be converted
    #[error("Bad argument `{param}`: {message}")]
    BadArgument { param: String, message: String },

    /// The concurrency limit for this command is exhausted
    #[error("Command `{command}` is already running at its limit of {limit}")]
    MaxConcurrencyReached { command: String, limit: usize },

    /// Error raised explicitly by a handler
    #[error("{message}")]
    Custom { message: String },

    /// A handler failed with something that was not a command error
    #[error("Command `{command}` raised an exception: {cause}")]
    Invoke {
        command: String,
        cause: Arc<anyhow::Error>,
    },
}

impl CommandError {
    /// Short code for programmatic handling and log fields
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::CheckFailure { .. } => "check_failure",
            Self::MissingArgument { .. } => "missing_argument",
            Self::BadArgument { .. } => "bad_argument",
            Self::MaxConcurrencyReached { .. } => "max_concurrency",
            Self::Custom { .. } => "custom",
            Self::Invoke { .. } => "invoke",
        }
    }

    /// Whether this error wraps an unexpected failure
    pub fn is_invoke_error(&self) -> bool {
        matches!(self, Self::Invoke { .. })
    }

    /// The original failure behind an [`CommandError::Invoke`] wrapper
    pub fn cause(&self) -> Option<&anyhow::Error> {
        match self {
            Self::Invoke { cause, .. } => Some(cause.as_ref()),
            _ => None,
        }
    }

    /// Message suitable for showing to the invoking user
    pub fn user_message(&self) -> String {
        match self {
            Self::CheckFailure { .. } => "You can't use this command here.".to_string(),
            Self::MissingArgument { param } => format!("Missing value for `{}`.", param),
            Self::BadArgument { param, .. } => format!("Invalid value for `{}`.", param),
            Self::MaxConcurrencyReached { .. } => {
                "This command is busy, try again in a moment.".to_string()
            }
            Self::Custom { message } => message.clone(),
            Self::Invoke { .. } => "Something went wrong running this command.".to_string(),
        }
    }
}

/// Marker error for a handler that aborted cooperatively.
///
/// Returning `Err(Cancelled.into())` from a handler body is treated the same
/// as the interaction's cancellation token firing.
#[derive(Error, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[error("Invocation was cancelled")]
pub struct Cancelled;

/// Error returned across the dispatcher boundary
#[derive(Error, Debug, Clone)]
pub enum DispatchError {
    #[error(transparent)]
    Routing(#[from] RoutingError),

    #[error(transparent)]
    Command(#[from] CommandError),
}

impl DispatchError {
    /// Whether this is a structural routing failure
    pub fn is_routing(&self) -> bool {
        matches!(self, Self::Routing(_))
    }

    /// The domain error, if this is one
    pub fn as_command_error(&self) -> Option<&CommandError> {
        match self {
            Self::Command(err) => Some(err),
            Self::Routing(_) => None,
        }
    }
}

/// Failure loading a dispatcher configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {message}")]
    Parse { message: String },

    #[error("Invalid config value for `{field}`: {message}")]
    Invalid { field: String, message: String },
}
