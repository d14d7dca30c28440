//! Handler tree
//!
//! A [`SlashCommand`] owns either [`SubCommandGroup`]s or [`SubCommand`]s; a
//! group owns sub-commands. Trees are assembled with builders once at
//! registration and only read afterwards. Qualified names ("root group leaf")
//! are fixed when a node is attached to its parent.

mod command;
mod group;
mod leaf;
mod node_core;

#[cfg(test)]
mod tests;

pub use command::{Child, SlashCommand, SlashCommandBuilder};
pub use group::{SubCommandGroup, SubCommandGroupBuilder};
pub use leaf::{SubCommand, SubCommandBuilder};
pub use node_core::NodeCore;

/// Variant of a node in the handler tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Command,
    Group,
    Leaf,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Command => write!(f, "command"),
            Self::Group => write!(f, "group"),
            Self::Leaf => write!(f, "sub-command"),
        }
    }
}

/// Behaviour shared by every node kind
pub trait CommandNode: Send + Sync {
    fn core(&self) -> &NodeCore;

    fn kind(&self) -> NodeKind;

    fn name(&self) -> &str {
        self.core().name()
    }

    fn qualified_name(&self) -> &str {
        self.core().qualified_name()
    }
}
