//! Command routing logic for the CLI

use anyhow::Context;
use slashroute_core::{
    CommandNode, CommandPayload, CommandRegistry, Dispatcher, DispatcherConfig, Outcome,
};
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::args::{Cli, Commands};
use crate::console::ConsoleResponder;
use crate::demo;

/// Route CLI commands to their respective handlers
pub async fn route(cli: Cli) -> anyhow::Result<()> {
    let mut config = DispatcherConfig::load(&cli.config)
        .with_context(|| format!("Loading configuration from '{}'", cli.config.display()))?;
    config.merge(cli_overrides(&config, &cli));
    config
        .validate()
        .context("Applying command-line overrides")?;
    init_logging(&config.log_level);

    let registry = demo::registry();
    match cli.command {
        Commands::Replay {
            payload,
            guild,
            cancel_after_ms,
        } => replay(config, &registry, &payload, guild, cancel_after_ms).await,
        Commands::Commands => {
            list_commands(&registry);
            Ok(())
        }
    }
}

/// Flag values as a config layer; empty strings and a zero limit leave the
/// loaded values in place
fn cli_overrides(base: &DispatcherConfig, cli: &Cli) -> DispatcherConfig {
    DispatcherConfig {
        dm_rejection_message: String::new(),
        dm_rejection_ephemeral: base.dm_rejection_ephemeral,
        autocomplete_choice_limit: cli.choice_limit.unwrap_or(0),
        log_level: cli.log_level.clone().unwrap_or_default(),
    }
}

fn init_logging(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn read_payload(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Reading payload from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("Reading payload from '{}'", path.display()))
}

async fn replay(
    config: DispatcherConfig,
    registry: &CommandRegistry,
    path: &Path,
    guild: Option<u64>,
    cancel_after_ms: Option<u64>,
) -> anyhow::Result<()> {
    let payload = CommandPayload::from_json(&read_payload(path)?).context("Parsing payload")?;
    debug!("Replaying payload for '/{}'", payload.name);

    let mut builder = payload.to_interaction().responder(Arc::new(ConsoleResponder));
    if let (None, Some(guild)) = (payload.guild_id, guild) {
        builder = builder.guild(guild);
    }
    let interaction = builder.build();

    if let Some(ms) = cancel_after_ms {
        let token = interaction.cancellation_token().clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(ms)).await;
            token.cancel();
        });
    }

    let dispatcher = Dispatcher::new(config);
    let outcome = dispatcher.process_interaction(registry, &interaction).await?;
    info!("Interaction {} {}", interaction.id(), outcome);

    match outcome {
        Outcome::Failed(err) => anyhow::bail!("/{} failed: {}", payload.name, err),
        _ => {
            println!("-> {}", outcome);
            Ok(())
        }
    }
}

fn list_commands(registry: &CommandRegistry) {
    for name in registry.names() {
        let Some(command) = registry.get(name) else {
            continue;
        };
        let flags = if command.core().guild_only() {
            " (guild only)"
        } else {
            ""
        };
        println!("/{}{}", command.qualified_name(), flags);

        let mut children: Vec<_> = command.children().collect();
        children.sort_by(|a, b| a.name().cmp(b.name()));
        for child in children {
            println!("  {}", child.node().qualified_name());
            if let Some(group) = child.as_group() {
                let mut leaves: Vec<_> = group.children().map(|c| c.qualified_name()).collect();
                leaves.sort_unstable();
                for leaf in leaves {
                    println!("    {}", leaf);
                }
            }
        }
    }
}
