//! Demo handler tree used by the replay tool
//!
//! `/tag show <name>`, `/tag edit title <name> <new-title>`, `/tag create`,
//! and a guild-only `/ping` limited to one run per guild.

use parking_lot::Mutex;
use slashroute_core::{
    Autocompleter, BoundArgs, BucketType, Choice, CommandError, CommandRegistry, FnBody,
    FnErrorHandler, Interaction, MaxConcurrency, ParamSchema, ParamSpec, SlashCommand,
    SubCommand, SubCommandGroup,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

type TagStore = Arc<Mutex<BTreeMap<String, String>>>;

fn seed() -> TagStore {
    let mut tags = BTreeMap::new();
    tags.insert("rust".to_string(), "A language empowering everyone.".to_string());
    tags.insert("ferris".to_string(), "The unofficial mascot.".to_string());
    tags.insert("help".to_string(), "Ask in #help with a minimal example.".to_string());
    Arc::new(Mutex::new(tags))
}

fn tag_names(store: &TagStore) -> Autocompleter {
    let store = store.clone();
    Autocompleter::sync(move |partial| {
        store
            .lock()
            .keys()
            .filter(|name| name.starts_with(partial))
            .map(|name| Choice::from(name.as_str()))
            .collect()
    })
}

fn show(store: &TagStore) -> SubCommand {
    let body_store = store.clone();
    SubCommand::builder("show")
        .schema(ParamSchema::new().param(ParamSpec::required("name")))
        .autocomplete("name", tag_names(store))
        .body(FnBody::new(move |inter: Interaction, args: BoundArgs| {
            let store = body_store.clone();
            async move {
                let name: String = args.require("name")?;
                let content = store
                    .lock()
                    .get(&name)
                    .cloned()
                    .ok_or_else(|| CommandError::custom(format!("Tag `{}` not found", name)))?;
                inter.response().send_message(&content, false).await
            }
        }))
        .build()
}

fn create(store: &TagStore) -> SubCommand {
    let store = store.clone();
    SubCommand::builder("create")
        .schema(
            ParamSchema::new()
                .param(ParamSpec::required("name"))
                .param(ParamSpec::required("content")),
        )
        .body(FnBody::new(move |inter: Interaction, args: BoundArgs| {
            let store = store.clone();
            async move {
                let name: String = args.require("name")?;
                let content: String = args.require("content")?;
                if store.lock().insert(name.clone(), content).is_some() {
                    return Err(CommandError::custom(format!("Tag `{}` already exists", name)).into());
                }
                inter
                    .response()
                    .send_message(&format!("Created tag `{}`", name), true)
                    .await
            }
        }))
        .build()
}

fn edit(store: &TagStore) -> SubCommandGroup {
    let body_store = store.clone();
    let title = SubCommand::builder("title")
        .connector("new-title", "title")
        .schema(
            ParamSchema::new()
                .param(ParamSpec::required("name"))
                .param(ParamSpec::required("title")),
        )
        .autocomplete("name", tag_names(store))
        .body(FnBody::new(move |inter: Interaction, args: BoundArgs| {
            let store = body_store.clone();
            async move {
                let name: String = args.require("name")?;
                let title: String = args.require("title")?;
                let content = store
                    .lock()
                    .remove(&name)
                    .ok_or_else(|| CommandError::custom(format!("Tag `{}` not found", name)))?;
                store.lock().insert(title.clone(), content);
                inter
                    .response()
                    .send_message(&format!("Renamed `{}` to `{}`", name, title), true)
                    .await
            }
        }))
        .build();

    SubCommandGroup::builder("edit")
        .body(FnBody::new(|inter: Interaction, _| async move {
            info!("Tag edit requested by user {}", inter.user_id());
            Ok(())
        }))
        .sub_command(title)
        .build()
}

fn ping() -> SlashCommand {
    SlashCommand::builder("ping")
        .guild_only(true)
        .max_concurrency(Arc::new(MaxConcurrency::new(1, BucketType::Guild)))
        .body(FnBody::new(|inter: Interaction, _| async move {
            inter.response().send_message("Pong!", false).await
        }))
        .build()
}

/// Build the demo registry
pub fn registry() -> CommandRegistry {
    let store = seed();
    let tag = SlashCommand::builder("tag")
        .group(edit(&store))
        .sub_command(show(&store))
        .sub_command(create(&store))
        .on_error(FnErrorHandler::new(|inter: Interaction, err: CommandError| async move {
            inter.response().send_message(&err.user_message(), true).await
        }))
        .build();

    let mut registry = CommandRegistry::new();
    registry.register(tag);
    registry.register(ping());
    registry
}
