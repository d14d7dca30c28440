//! Command invocation protocol

use std::future::Future;
use tracing::{debug, info, warn};

use super::{Dispatcher, Outcome};
use crate::binding::BoundArgs;
use crate::concurrency::ConcurrencySlot;
use crate::error::{Cancelled, CommandError, DispatchResult, Failure, RoutingError};
use crate::interaction::{Interaction, OptionTree};
use crate::nodes::{Child, CommandNode, NodeCore, SlashCommand, SubCommand, SubCommandGroup};
use crate::routing::{extract_route, Route};

/// Child walk resolved up front, before any body runs
#[derive(Debug)]
enum ChildRoute<'a> {
    /// Bare command call, no child selected
    Bare,
    /// A group named directly: its body runs and the walk stops
    GroupOnly(&'a SubCommandGroup),
    Leaf(&'a SubCommand, OptionTree),
    Nested(&'a SubCommandGroup, Option<&'a SubCommand>, OptionTree),
    Unmatched(String),
}

fn resolve_children<'a>(
    command: &'a SlashCommand,
    options: &OptionTree,
) -> Result<ChildRoute<'a>, RoutingError> {
    match extract_route(options)? {
        Route::Flat(_) => Ok(ChildRoute::Bare),
        Route::Grouped { name, args } => Ok(match command.child(&name) {
            Some(Child::Group(group)) => ChildRoute::GroupOnly(group),
            Some(Child::Leaf(leaf)) => ChildRoute::Leaf(leaf, args),
            None => ChildRoute::Unmatched(name),
        }),
        Route::Nested {
            group: group_name,
            sub,
            args,
        } => {
            let group = command
                .child(&group_name)
                .and_then(Child::as_group)
                .ok_or_else(|| RoutingError::not_a_group(&group_name))?;
            let leaf = group.child(&sub);
            if leaf.is_none() {
                debug!(
                    "No sub-command '{}' in group '{}'",
                    sub,
                    group.qualified_name()
                );
            }
            Ok(ChildRoute::Nested(group, leaf, args))
        }
    }
}

/// Run `work` unless the interaction is cancelled first
async fn until_cancelled<T, F>(interaction: &Interaction, work: F) -> anyhow::Result<T>
where
    F: Future<Output = anyhow::Result<T>>,
{
    tokio::select! {
        biased;
        _ = interaction.cancellation_token().cancelled() => Err(anyhow::Error::from(Cancelled)),
        result = work => result,
    }
}

impl Dispatcher {
    /// Invoke `command` for one interaction.
    ///
    /// The route is resolved before anything runs, so a malformed option tree
    /// fails with a [`RoutingError`] without invoking any body or hook. Domain
    /// errors come back unchanged; unexpected failures are wrapped in
    /// [`CommandError::Invoke`]. Error handlers are not called here, see
    /// [`Dispatcher::dispatch`].
    pub async fn invoke(
        &self,
        command: &SlashCommand,
        interaction: &Interaction,
    ) -> DispatchResult<Outcome> {
        if self.reject_outside_guild(command.core(), interaction).await {
            return Ok(Outcome::Rejected);
        }

        let core = command.core();
        let outcome = if command.has_children() {
            let route = resolve_children(command, interaction.options())?;
            self.run_wrapped(core, interaction, async move {
                until_cancelled(
                    interaction,
                    self.call_body(core, interaction, BoundArgs::new()),
                )
                .await?;
                self.invoke_children(route, interaction).await
            })
            .await?
        } else {
            extract_route(interaction.options())?;
            let args = interaction.options().clone();
            self.run_wrapped(core, interaction, async move {
                until_cancelled(interaction, async {
                    let args = self.bind(core, interaction, args).await?;
                    self.call_body(core, interaction, args).await
                })
                .await
            })
            .await?
        };
        Ok(outcome)
    }

    async fn invoke_children(
        &self,
        route: ChildRoute<'_>,
        interaction: &Interaction,
    ) -> anyhow::Result<()> {
        match route {
            ChildRoute::Bare => Ok(()),
            ChildRoute::GroupOnly(group) => {
                debug!(
                    "Group '{}' invoked without a sub-command",
                    group.qualified_name()
                );
                self.call_step(group.core(), interaction, OptionTree::new())
                    .await
            }
            ChildRoute::Leaf(leaf, args) => self.call_step(leaf.core(), interaction, args).await,
            ChildRoute::Nested(group, leaf, args) => {
                self.call_step(group.core(), interaction, OptionTree::new())
                    .await?;
                if let Some(leaf) = leaf {
                    self.call_step(leaf.core(), interaction, args).await?;
                }
                Ok(())
            }
            ChildRoute::Unmatched(name) => {
                warn!(
                    "No child '{}' registered on '{}'",
                    name,
                    interaction.command_name()
                );
                Ok(())
            }
        }
    }

    /// One nested scope: invoke the node, give a domain error to its local
    /// handler, then hand it on to the enclosing scope
    async fn call_step(
        &self,
        core: &NodeCore,
        interaction: &Interaction,
        args: OptionTree,
    ) -> anyhow::Result<()> {
        let result = if self.reject_outside_guild(core, interaction).await {
            Ok(Outcome::Rejected)
        } else {
            self.run_wrapped(core, interaction, async move {
                until_cancelled(interaction, async {
                    let args = self.bind(core, interaction, args).await?;
                    self.call_body(core, interaction, args).await
                })
                .await
            })
            .await
        };

        match result {
            Ok(Outcome::Cancelled) => Err(Cancelled.into()),
            Ok(_) => Ok(()),
            Err(err) => {
                self.call_local_handler(core, interaction, &err).await;
                Err(err.into())
            }
        }
    }

    /// Prepare, run `step`, translate its failure, then release the slot and
    /// run after-hooks.
    ///
    /// `step` races only this node's own work against the cancellation token,
    /// so nested scopes unwind through their own release and after-hooks.
    async fn run_wrapped<F>(
        &self,
        core: &NodeCore,
        interaction: &Interaction,
        step: F,
    ) -> Result<Outcome, CommandError>
    where
        F: Future<Output = anyhow::Result<()>> + Send,
    {
        let mut slot = match self.prepare(core, interaction).await {
            Ok(slot) => slot,
            Err(e) => return self.translate(core, interaction, e),
        };

        let result = step.await;
        let outcome = match result {
            Ok(()) => Ok(Outcome::Completed),
            Err(e) => self.translate(core, interaction, e),
        };

        slot.release();
        core.hooks().run_after(interaction).await;
        self.hooks.run_after(interaction).await;

        outcome
    }

    /// Checks, concurrency slot, node then global before-hooks.
    ///
    /// A failure after the slot is taken releases it before returning.
    async fn prepare(
        &self,
        core: &NodeCore,
        interaction: &Interaction,
    ) -> anyhow::Result<ConcurrencySlot> {
        for check in core.checks() {
            if !check.check(interaction).await? {
                debug!(
                    "Check '{}' failed for '{}'",
                    check.name(),
                    core.qualified_name()
                );
                return Err(CommandError::check_failure(format!(
                    "The check functions for command '{}' failed.",
                    core.qualified_name()
                ))
                .into());
            }
        }

        let acquire = ConcurrencySlot::acquire(core.limiter(), interaction);
        let mut slot = until_cancelled(interaction, async {
            acquire.await.map_err(anyhow::Error::from)
        })
        .await?;

        let hooks = async {
            core.hooks().run_before(interaction).await?;
            self.hooks.run_before(interaction).await
        };
        if let Err(e) = hooks.await {
            slot.release();
            return Err(e);
        }

        Ok(slot)
    }

    fn translate(
        &self,
        core: &NodeCore,
        interaction: &Interaction,
        error: anyhow::Error,
    ) -> Result<Outcome, CommandError> {
        interaction.mark_failed();
        match Failure::classify(error) {
            Failure::Command(err) => Err(err),
            Failure::Cancelled => {
                info!("Invocation of '{}' was cancelled", core.qualified_name());
                Ok(Outcome::Cancelled)
            }
            Failure::Unexpected(cause) => {
                warn!(
                    "Unexpected failure in '{}': {:#}",
                    core.qualified_name(),
                    cause
                );
                Err(CommandError::invoke(core.qualified_name(), cause))
            }
        }
    }

    /// Apply this node's connectors, then bind against its schema
    async fn bind(
        &self,
        core: &NodeCore,
        interaction: &Interaction,
        mut args: OptionTree,
    ) -> Result<BoundArgs, CommandError> {
        core.connectors().apply(&mut args);
        self.resolver.resolve(core.schema(), interaction, args).await
    }

    async fn call_body(
        &self,
        core: &NodeCore,
        interaction: &Interaction,
        args: BoundArgs,
    ) -> anyhow::Result<()> {
        match core.body() {
            Some(body) => body.call(interaction, args).await,
            None => {
                debug!("'{}' has no body", core.qualified_name());
                Ok(())
            }
        }
    }

    pub(super) async fn call_local_handler(
        &self,
        core: &NodeCore,
        interaction: &Interaction,
        err: &CommandError,
    ) {
        if let Some(handler) = core.error_handler() {
            if let Err(e) = handler.on_error(interaction, err).await {
                warn!(
                    "Error handler of '{}' failed: {}",
                    core.qualified_name(),
                    e
                );
            }
        }
    }

    /// Send the rejection reply when a guild-only node is used outside a guild
    async fn reject_outside_guild(&self, core: &NodeCore, interaction: &Interaction) -> bool {
        if !core.guild_only() || interaction.guild_id().is_some() {
            return false;
        }

        info!(
            "Rejecting guild-only command '{}' outside a guild",
            core.qualified_name()
        );
        if let Err(e) = interaction
            .response()
            .send_message(
                &self.config.dm_rejection_message,
                self.config.dm_rejection_ephemeral,
            )
            .await
        {
            warn!("Failed to send guild-only rejection: {}", e);
        }
        true
    }
}
