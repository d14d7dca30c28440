//! Slashroute Core Library
//!
//! Resolves slash-command interactions against a registered handler tree:
//! route extraction from the nested option tree, per-level argument renaming
//! and binding, invocation with checks, concurrency limits and hooks, error
//! propagation from sub-command to group to command to a global sink, and
//! autocomplete routing for the focused option.

pub mod autocomplete;
pub mod binding;
pub mod concurrency;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod handlers;
pub mod hooks;
pub mod interaction;
pub mod nodes;
pub mod registry;
pub mod routing;

// Re-export commonly used types
pub use autocomplete::{Autocompleter, Autocompleters};
pub use binding::{BoundArgs, Connectors, ParamResolver, ParamSchema, ParamSpec, SchemaResolver};
pub use concurrency::{BucketType, ConcurrencyLimiter, ConcurrencySlot, MaxConcurrency};
pub use config::DispatcherConfig;
pub use dispatcher::{Dispatcher, Outcome};
pub use error::{Cancelled, CommandError, ConfigError, DispatchError, DispatchResult, RoutingError};
pub use handlers::{
    ChannelErrorSink, CommandBody, ErrorHandler, ErrorReport, ErrorSink, FnBody, FnErrorHandler,
    LoggingErrorSink,
};
pub use hooks::{Check, FnCheck, FnHook, InvokeHook, InvokeHooks};
pub use interaction::{
    Choice, CommandPayload, FocusedOption, Interaction, InteractionBuilder, InteractionResponder,
    NoopResponder, OptionTree,
};
pub use nodes::{
    Child, CommandNode, NodeKind, SlashCommand, SubCommand, SubCommandGroup,
};
pub use registry::CommandRegistry;
pub use routing::{extract_route, options_as_route, Route};
