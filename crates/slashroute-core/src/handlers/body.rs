//! Command bodies

use async_trait::async_trait;
use futures::future::BoxFuture;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::binding::BoundArgs;
use crate::interaction::Interaction;

/// The invocable body of a command, group, or sub-command.
///
/// Return a [`CommandError`](crate::error::CommandError) (converted into
/// `anyhow::Error`) for domain failures; any other error is wrapped as an
/// invoke error. Return [`Cancelled`](crate::error::Cancelled) to abort
/// without reporting.
#[async_trait]
pub trait CommandBody: Send + Sync {
    async fn call(&self, interaction: &Interaction, args: BoundArgs) -> anyhow::Result<()>;
}

type BodyFn = dyn Fn(Interaction, BoundArgs) -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync;

/// Closure-backed [`CommandBody`]
#[derive(Clone)]
pub struct FnBody {
    f: Arc<BodyFn>,
}

impl FnBody {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(Interaction, BoundArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self {
            f: Arc::new(move |interaction, args| Box::pin(f(interaction, args))),
        }
    }
}

#[async_trait]
impl CommandBody for FnBody {
    async fn call(&self, interaction: &Interaction, args: BoundArgs) -> anyhow::Result<()> {
        (self.f)(interaction.clone(), args).await
    }
}

impl fmt::Debug for FnBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnBody").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CommandError;
    use serde_json::json;

    #[tokio::test]
    async fn test_fn_body_receives_args() {
        let body = FnBody::new(|_inter, args: BoundArgs| async move {
            let value: i64 = args.require("value")?;
            anyhow::ensure!(value == 5, "unexpected value {}", value);
            Ok(())
        });
        let args = BoundArgs::from_map(json!({"value": 5}).as_object().cloned().unwrap());
        let inter = Interaction::builder("t").build();
        body.call(&inter, args).await.unwrap();
    }

    #[tokio::test]
    async fn test_fn_body_command_error_survives_anyhow() {
        let body = FnBody::new(|_inter, _args| async move {
            Err(CommandError::custom("Tag not found").into())
        });
        let inter = Interaction::builder("t").build();
        let err = body.call(&inter, BoundArgs::new()).await.unwrap_err();
        assert!(err.downcast_ref::<CommandError>().is_some());
    }
}
