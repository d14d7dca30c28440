//! Error types for slashroute
//!
//! Errors fall into three groups that callers can tell apart:
//! - [`RoutingError`]: the option tree or handler tree is structurally wrong.
//!   Fatal, no handler is invoked and no error handler is notified.
//! - [`CommandError`]: a domain failure raised by a check, limiter, binder or
//!   handler body. Delivered to local error handlers and the global sink.
//!   Unexpected failures are wrapped in [`CommandError::Invoke`].
//! - [`Cancelled`]: a marker a handler body may return to abort cleanly.

mod constructors;
mod types;

pub use types::{
    Cancelled, CommandError, ConfigError, DispatchError, DispatchResult, RoutingError,
};
pub(crate) use constructors::Failure;
