//! Local error handlers

use async_trait::async_trait;
use futures::future::BoxFuture;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::error::CommandError;
use crate::interaction::Interaction;

/// Error handler scoped to a single node.
///
/// Runs before the error propagates to the enclosing scope; it cannot stop
/// the propagation.
#[async_trait]
pub trait ErrorHandler: Send + Sync {
    async fn on_error(&self, interaction: &Interaction, error: &CommandError) -> anyhow::Result<()>;
}

type HandlerFn =
    dyn Fn(Interaction, CommandError) -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync;

/// Closure-backed [`ErrorHandler`]
#[derive(Clone)]
pub struct FnErrorHandler {
    f: Arc<HandlerFn>,
}

impl FnErrorHandler {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(Interaction, CommandError) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self {
            f: Arc::new(move |interaction, error| Box::pin(f(interaction, error))),
        }
    }
}

#[async_trait]
impl ErrorHandler for FnErrorHandler {
    async fn on_error(&self, interaction: &Interaction, error: &CommandError) -> anyhow::Result<()> {
        (self.f)(interaction.clone(), error.clone()).await
    }
}

impl fmt::Debug for FnErrorHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnErrorHandler").finish_non_exhaustive()
    }
}
