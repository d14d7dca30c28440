//! Before/after invocation hooks

use async_trait::async_trait;
use futures::future::BoxFuture;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::interaction::Interaction;

#[async_trait]
pub trait InvokeHook: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str;

    async fn call(&self, interaction: &Interaction) -> anyhow::Result<()>;
}

type HookFn = dyn Fn(Interaction) -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync;

/// Closure-backed [`InvokeHook`]
#[derive(Clone)]
pub struct FnHook {
    name: String,
    f: Arc<HookFn>,
}

impl FnHook {
    pub fn new<F, Fut>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(Interaction) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self {
            name: name.into(),
            f: Arc::new(move |interaction| Box::pin(f(interaction))),
        }
    }
}

#[async_trait]
impl InvokeHook for FnHook {
    fn name(&self) -> &str {
        &self.name
    }

    async fn call(&self, interaction: &Interaction) -> anyhow::Result<()> {
        (self.f)(interaction.clone()).await
    }
}

impl fmt::Debug for FnHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHook").field("name", &self.name).finish()
    }
}

/// Ordered before/after hook lists for one scope
#[derive(Clone, Default)]
pub struct InvokeHooks {
    before: Vec<Arc<dyn InvokeHook>>,
    after: Vec<Arc<dyn InvokeHook>>,
}

impl InvokeHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_before(&mut self, hook: Arc<dyn InvokeHook>) {
        self.before.push(hook);
    }

    pub fn add_after(&mut self, hook: Arc<dyn InvokeHook>) {
        self.after.push(hook);
    }

    pub fn before_count(&self) -> usize {
        self.before.len()
    }

    pub fn after_count(&self) -> usize {
        self.after.len()
    }

    pub fn is_empty(&self) -> bool {
        self.before.is_empty() && self.after.is_empty()
    }

    /// Run before-hooks in order, stopping at the first failure
    pub async fn run_before(&self, interaction: &Interaction) -> anyhow::Result<()> {
        for hook in &self.before {
            debug!("Running before hook '{}'", hook.name());
            hook.call(interaction).await?;
        }
        Ok(())
    }

    /// Run every after-hook; failures are logged and never propagated
    pub async fn run_after(&self, interaction: &Interaction) {
        for hook in &self.after {
            debug!("Running after hook '{}'", hook.name());
            if let Err(e) = hook.call(interaction).await {
                warn!(
                    "After hook '{}' failed for '{}': {}",
                    hook.name(),
                    interaction.command_name(),
                    e
                );
            }
        }
    }
}

impl fmt::Debug for InvokeHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let before: Vec<_> = self.before.iter().map(|h| h.name()).collect();
        let after: Vec<_> = self.after.iter().map(|h| h.name()).collect();
        f.debug_struct("InvokeHooks")
            .field("before", &before)
            .field("after", &after)
            .finish()
    }
}
