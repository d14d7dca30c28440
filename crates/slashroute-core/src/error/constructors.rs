//! Constructor methods for error types

use std::sync::Arc;

use super::types::{Cancelled, CommandError, DispatchError, RoutingError};

impl CommandError {
    /// Create a check failure error
    pub fn check_failure(message: impl Into<String>) -> Self {
        Self::CheckFailure {
            message: message.into(),
        }
    }

    /// Create a missing argument error
    pub fn missing_argument(param: impl Into<String>) -> Self {
        Self::MissingArgument {
            param: param.into(),
        }
    }

    /// Create a bad argument error
    pub fn bad_argument(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadArgument {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Create a max concurrency error
    pub fn max_concurrency(command: impl Into<String>, limit: usize) -> Self {
        Self::MaxConcurrencyReached {
            command: command.into(),
            limit,
        }
    }

    /// Create a custom handler error
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom {
            message: message.into(),
        }
    }

    /// Wrap an unexpected failure raised while running `command`
    pub fn invoke(command: impl Into<String>, cause: anyhow::Error) -> Self {
        Self::Invoke {
            command: command.into(),
            cause: Arc::new(cause),
        }
    }
}

impl RoutingError {
    /// Create a chain-too-long error
    pub fn chain_too_long(depth: usize) -> Self {
        Self::ChainTooLong { depth }
    }

    /// Create a not-a-group error
    pub fn not_a_group(name: impl Into<String>) -> Self {
        Self::NotAGroup { name: name.into() }
    }

    /// Create an unknown command error
    pub fn unknown_command(name: impl Into<String>) -> Self {
        Self::UnknownCommand { name: name.into() }
    }
}

/// How a failed handler result should be treated
#[derive(Debug)]
pub(crate) enum Failure {
    Command(CommandError),
    Cancelled,
    Unexpected(anyhow::Error),
}

impl Failure {
    /// Sort an `anyhow::Error` returned by user code into the taxonomy
    pub(crate) fn classify(error: anyhow::Error) -> Self {
        if error.is::<Cancelled>() {
            return Self::Cancelled;
        }
        match error.downcast::<CommandError>() {
            Ok(command_error) => Self::Command(command_error),
            Err(other) => match other.downcast::<DispatchError>() {
                Ok(DispatchError::Command(command_error)) => Self::Command(command_error),
                Ok(DispatchError::Routing(routing)) => Self::Unexpected(routing.into()),
                Err(other) => Self::Unexpected(other),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_error_display() {
        let err = CommandError::missing_argument("user");
        assert_eq!(err.to_string(), "Missing required argument: user");
        assert_eq!(err.error_code(), "missing_argument");

        let err = CommandError::bad_argument("count", "expected integer");
        assert_eq!(err.to_string(), "Bad argument `count`: expected integer");

        let err = CommandError::max_concurrency("tag", 1);
        assert!(err.to_string().contains("limit of 1"));
    }

    #[test]
    fn test_invoke_error_keeps_cause() {
        let err = CommandError::invoke("tag create", anyhow::anyhow!("db down"));
        assert!(err.is_invoke_error());
        assert_eq!(err.cause().map(|c| c.to_string()), Some("db down".to_string()));
        assert!(err.to_string().contains("tag create"));
        assert!(err.to_string().contains("db down"));
    }

    #[test]
    fn test_routing_error_display() {
        assert_eq!(
            RoutingError::chain_too_long(3).to_string(),
            "Command chain is too long: 3 nested levels (max 2)"
        );
        assert_eq!(
            RoutingError::not_a_group("ping").to_string(),
            "`ping` is not a sub-command group"
        );
    }

    #[test]
    fn test_classify_command_error() {
        let err: anyhow::Error = CommandError::custom("nope").into();
        assert!(matches!(
            Failure::classify(err),
            Failure::Command(CommandError::Custom { .. })
        ));
    }

    #[test]
    fn test_classify_cancelled() {
        let err: anyhow::Error = Cancelled.into();
        assert!(matches!(Failure::classify(err), Failure::Cancelled));
    }

    #[test]
    fn test_classify_unexpected() {
        let err = anyhow::anyhow!("boom");
        match Failure::classify(err) {
            Failure::Unexpected(e) => assert_eq!(e.to_string(), "boom"),
            other => panic!("Expected unexpected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_nested_dispatch_error() {
        let err: anyhow::Error = DispatchError::from(CommandError::check_failure("x")).into();
        assert!(matches!(
            Failure::classify(err),
            Failure::Command(CommandError::CheckFailure { .. })
        ));
    }

    #[test]
    fn test_user_message() {
        assert_eq!(
            CommandError::custom("Tag not found").user_message(),
            "Tag not found"
        );
        assert!(CommandError::invoke("x", anyhow::anyhow!("secret"))
            .user_message()
            .contains("Something went wrong"));
    }
}
