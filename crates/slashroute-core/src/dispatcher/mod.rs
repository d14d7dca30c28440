//! Dispatcher
//!
//! Walks a handler tree for one interaction: guild-only gate, preparation
//! (checks, concurrency slot, before-hooks), the routed call steps, error
//! translation, then slot release and after-hooks. [`Dispatcher::dispatch`]
//! adds the top-level error chain: the root's local handler, then the global
//! [`ErrorSink`], exactly once per failed invocation.
//!
//! The dispatcher holds no per-invocation state and can be shared across
//! tasks.

mod autocomplete;
mod invoke;


use std::fmt;
use std::sync::Arc;
use tracing::{debug, error};

use crate::binding::{ParamResolver, SchemaResolver};
use crate::config::DispatcherConfig;
use crate::error::{CommandError, DispatchError, DispatchResult, RoutingError};
use crate::handlers::{ErrorSink, LoggingErrorSink};
use crate::hooks::{InvokeHook, InvokeHooks};
use crate::interaction::Interaction;
use crate::nodes::{CommandNode, SlashCommand};
use crate::registry::CommandRegistry;

/// How an invocation ended
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Every routed body ran to completion
    Completed,
    /// Refused before anything ran (guild-only command outside a guild)
    Rejected,
    /// Aborted by cancellation; nothing is reported
    Cancelled,
    /// Failed with a domain error that has been delivered to the handlers
    Failed(CommandError),
}

impl Outcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    pub fn error(&self) -> Option<&CommandError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::Rejected => write!(f, "rejected"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::Failed(err) => write!(f, "failed: {}", err),
        }
    }
}

/// Routes interactions through handler trees
#[derive(Clone)]
pub struct Dispatcher {
    config: DispatcherConfig,
    hooks: InvokeHooks,
    resolver: Arc<dyn ParamResolver>,
    sink: Arc<dyn ErrorSink>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(DispatcherConfig::default())
    }
}

impl Dispatcher {
    pub fn new(config: DispatcherConfig) -> Self {
        Self {
            config,
            hooks: InvokeHooks::new(),
            resolver: Arc::new(SchemaResolver),
            sink: Arc::new(LoggingErrorSink),
        }
    }

    /// Replace the process-wide error sink
    pub fn with_error_sink(mut self, sink: Arc<dyn ErrorSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Replace the argument binder
    pub fn with_resolver(mut self, resolver: Arc<dyn ParamResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Global hook run after every node's own before-hooks
    pub fn before_invoke(mut self, hook: impl InvokeHook + 'static) -> Self {
        self.hooks.add_before(Arc::new(hook));
        self
    }

    /// Global hook run after every node's own after-hooks
    pub fn after_invoke(mut self, hook: impl InvokeHook + 'static) -> Self {
        self.hooks.add_after(Arc::new(hook));
        self
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Invoke `command` and run the top-level error chain.
    ///
    /// Domain errors come back as [`Outcome::Failed`] after the root's local
    /// handler and the error sink have both seen them. Routing errors are
    /// returned as `Err` without touching either.
    pub async fn dispatch(
        &self,
        command: &SlashCommand,
        interaction: &Interaction,
    ) -> DispatchResult<Outcome> {
        match self.invoke(command, interaction).await {
            Ok(outcome) => {
                debug!("Slash command '{}' {}", command.qualified_name(), outcome);
                Ok(outcome)
            }
            Err(DispatchError::Command(err)) => {
                self.call_local_handler(command.core(), interaction, &err).await;
                self.sink.report(interaction, &err).await;
                Ok(Outcome::Failed(err))
            }
            Err(DispatchError::Routing(err)) => {
                error!(
                    "Routing failed for slash command '{}': {}",
                    command.qualified_name(),
                    err
                );
                Err(err.into())
            }
        }
    }

    /// Look up the interaction's command and dispatch it, or route it as
    /// autocomplete when a focused option is present
    pub async fn process_interaction(
        &self,
        registry: &CommandRegistry,
        interaction: &Interaction,
    ) -> DispatchResult<Outcome> {
        let command = registry
            .get(interaction.command_name())
            .ok_or_else(|| RoutingError::unknown_command(interaction.command_name()))?;

        if interaction.is_autocomplete() {
            self.route_autocomplete(command, interaction).await?;
            return Ok(Outcome::Completed);
        }
        self.dispatch(command, interaction).await
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("config", &self.config)
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}
