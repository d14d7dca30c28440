//! Handler-side traits
//!
//! Everything user code plugs into the dispatcher: command bodies, local
//! error handlers, and the process-wide error sink. Each trait has a closure
//! adapter so simple handlers don't need a named type.

mod body;
mod error_handler;
mod sink;

pub use body::{CommandBody, FnBody};
pub use error_handler::{ErrorHandler, FnErrorHandler};
pub use sink::{ChannelErrorSink, ErrorReport, ErrorSink, LoggingErrorSink};
