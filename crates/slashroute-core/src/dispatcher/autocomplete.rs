//! Autocomplete routing

use tracing::{debug, warn};

use super::Dispatcher;
use crate::autocomplete::Autocompleter;
use crate::error::{CommandError, DispatchResult, Failure, RoutingError};
use crate::interaction::{Choice, Interaction};
use crate::nodes::{Child, CommandNode, NodeCore, SlashCommand};
use crate::routing::options_as_route;

/// Tables to search for an autocompleter, most specific first.
///
/// Unknown or partial paths fall back to the command itself.
fn lookup_chain<'a>(command: &'a SlashCommand, path: &[String]) -> Vec<&'a NodeCore> {
    let root = command.core();
    match path {
        [name] => match command.child(name) {
            Some(Child::Leaf(leaf)) => vec![leaf.core()],
            Some(Child::Group(group)) => vec![group.core(), root],
            None => vec![root],
        },
        [group, sub] => match command
            .child(group)
            .and_then(Child::as_group)
            .and_then(|group| group.child(sub))
        {
            Some(leaf) => vec![leaf.core()],
            None => vec![root],
        },
        _ => vec![root],
    }
}

impl Dispatcher {
    /// Find the autocompleter for the focused option and send its choices.
    ///
    /// Returns the choices that were sent, or `None` when nothing is
    /// registered for the option or the autocompleter produced nothing.
    pub async fn route_autocomplete(
        &self,
        command: &SlashCommand,
        interaction: &Interaction,
    ) -> DispatchResult<Option<Vec<Choice>>> {
        let focused = interaction
            .focused_option()
            .ok_or(RoutingError::NoFocusedOption)?;
        let (path, _) = options_as_route(interaction.options())?;

        let found = lookup_chain(command, &path)
            .into_iter()
            .find_map(|core| core.autocompleters().get(&focused.name).map(|ac| (core, ac)));
        let Some((owner, autocompleter)) = found else {
            debug!(
                "No autocompleter for option '{}' on '{}'",
                focused.name,
                command.qualified_name()
            );
            return Ok(None);
        };

        let Some(mut choices) = self
            .suggest(owner, autocompleter, interaction, &focused.value)
            .await?
        else {
            return Ok(None);
        };

        let limit = self.config.autocomplete_choice_limit;
        if choices.len() > limit {
            debug!(
                "Truncating {} autocomplete choices to {}",
                choices.len(),
                limit
            );
            choices.truncate(limit);
        }

        if let Err(e) = interaction.response().send_autocomplete(choices.clone()).await {
            warn!(
                "Failed to send autocomplete choices for '{}': {}",
                owner.qualified_name(),
                e
            );
        }
        Ok(Some(choices))
    }

    async fn suggest(
        &self,
        owner: &NodeCore,
        autocompleter: &Autocompleter,
        interaction: &Interaction,
        partial: &str,
    ) -> Result<Option<Vec<Choice>>, CommandError> {
        match autocompleter.suggest(interaction, partial).await {
            Ok(choices) => Ok(choices),
            Err(e) => match Failure::classify(e) {
                Failure::Command(err) => Err(err),
                Failure::Cancelled => {
                    debug!("Autocomplete for '{}' cancelled", owner.qualified_name());
                    Ok(None)
                }
                Failure::Unexpected(cause) => {
                    Err(CommandError::invoke(owner.qualified_name(), cause))
                }
            },
        }
    }
}
