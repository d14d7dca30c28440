//! Top-level command registry

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::nodes::{CommandNode, SlashCommand};

/// Registered top-level commands, keyed by name
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Arc<SlashCommand>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command, replacing any previous one with the same name
    pub fn register(&mut self, command: SlashCommand) -> Option<Arc<SlashCommand>> {
        let name = command.name().to_string();
        debug!("Registering slash command '{}'", name);
        let previous = self.commands.insert(name.clone(), Arc::new(command));
        if previous.is_some() {
            warn!("Slash command '{}' was already registered; replaced", name);
        }
        previous
    }

    pub fn unregister(&mut self, name: &str) -> Option<Arc<SlashCommand>> {
        self.commands.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&Arc<SlashCommand>> {
        self.commands.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Registered names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
