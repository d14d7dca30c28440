//! Pre-invocation checks

use async_trait::async_trait;
use futures::future::BoxFuture;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::interaction::Interaction;

/// Predicate gating an invocation.
///
/// `Ok(false)` becomes a check failure; an `Err` carrying a
/// [`CommandError`](crate::error::CommandError) is propagated as-is.
#[async_trait]
pub trait Check: Send + Sync {
    fn name(&self) -> &str;

    async fn check(&self, interaction: &Interaction) -> anyhow::Result<bool>;
}

type CheckFn = dyn Fn(Interaction) -> BoxFuture<'static, anyhow::Result<bool>> + Send + Sync;

/// Closure-backed [`Check`]
#[derive(Clone)]
pub struct FnCheck {
    name: String,
    f: Arc<CheckFn>,
}

impl FnCheck {
    pub fn new<F, Fut>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(Interaction) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<bool>> + Send + 'static,
    {
        Self {
            name: name.into(),
            f: Arc::new(move |interaction| Box::pin(f(interaction))),
        }
    }

    /// Check from a synchronous predicate
    pub fn sync<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Interaction) -> bool + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        Self::new(name, move |interaction| {
            let f = f.clone();
            async move { Ok(f(&interaction)) }
        })
    }
}

#[async_trait]
impl Check for FnCheck {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check(&self, interaction: &Interaction) -> anyhow::Result<bool> {
        (self.f)(interaction.clone()).await
    }
}

impl fmt::Debug for FnCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCheck").field("name", &self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sync_check() {
        let check = FnCheck::sync("in_guild", |i| i.guild_id().is_some());
        assert_eq!(check.name(), "in_guild");

        let in_guild = Interaction::builder("t").guild(1).build();
        let in_dm = Interaction::builder("t").build();
        assert!(check.check(&in_guild).await.unwrap());
        assert!(!check.check(&in_dm).await.unwrap());
    }
}
