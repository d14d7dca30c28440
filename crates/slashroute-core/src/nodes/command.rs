//! Top-level slash commands

use std::collections::HashMap;
use tracing::warn;

use super::group::SubCommandGroup;
use super::leaf::SubCommand;
use super::node_core::node_builder_setters;
use super::{CommandNode, NodeCore, NodeKind};

/// Direct child of a [`SlashCommand`]
#[derive(Debug, Clone)]
pub enum Child {
    Group(SubCommandGroup),
    Leaf(SubCommand),
}

impl Child {
    pub fn name(&self) -> &str {
        self.node().name()
    }

    pub fn node(&self) -> &dyn CommandNode {
        match self {
            Self::Group(group) => group as &dyn CommandNode,
            Self::Leaf(leaf) => leaf as &dyn CommandNode,
        }
    }

    pub fn as_group(&self) -> Option<&SubCommandGroup> {
        match self {
            Self::Group(group) => Some(group),
            Self::Leaf(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&SubCommand> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            Self::Group(_) => None,
        }
    }

    fn set_parent(&mut self, parent_qualified_name: &str) {
        match self {
            Self::Group(group) => group.set_parent(parent_qualified_name),
            Self::Leaf(leaf) => leaf.set_parent(parent_qualified_name),
        }
    }
}

/// Root of a handler tree.
///
/// With children, its body (if any) runs as shared setup before the routed
/// child; without children, its body receives the bound arguments directly.
#[derive(Debug, Clone)]
pub struct SlashCommand {
    core: NodeCore,
    children: HashMap<String, Child>,
}

impl SlashCommand {
    pub fn builder(name: impl Into<String>) -> SlashCommandBuilder {
        SlashCommandBuilder {
            core: NodeCore::new(name),
            children: HashMap::new(),
        }
    }

    pub fn child(&self, name: &str) -> Option<&Child> {
        self.children.get(name)
    }

    pub fn children(&self) -> impl Iterator<Item = &Child> {
        self.children.values()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

impl CommandNode for SlashCommand {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Command
    }
}

/// Builder for [`SlashCommand`]
#[derive(Debug)]
pub struct SlashCommandBuilder {
    core: NodeCore,
    children: HashMap<String, Child>,
}

node_builder_setters!(SlashCommandBuilder);

impl SlashCommandBuilder {
    pub fn group(self, group: SubCommandGroup) -> Self {
        self.child(Child::Group(group))
    }

    pub fn sub_command(self, sub_command: SubCommand) -> Self {
        self.child(Child::Leaf(sub_command))
    }

    fn child(mut self, mut child: Child) -> Self {
        child.set_parent(self.core.qualified_name());
        let name = child.name().to_string();
        if self.children.insert(name.clone(), child).is_some() {
            warn!(
                "Child '{}' registered twice on command '{}'; keeping the last one",
                name,
                self.core.name()
            );
        }
        self
    }

    pub fn build(self) -> SlashCommand {
        SlashCommand {
            core: self.core,
            children: self.children,
        }
    }
}
