//! Sub-commands

use super::node_core::node_builder_setters;
use super::{CommandNode, NodeCore, NodeKind};

/// Terminal node holding a handler body
#[derive(Debug, Clone)]
pub struct SubCommand {
    core: NodeCore,
}

impl SubCommand {
    pub fn builder(name: impl Into<String>) -> SubCommandBuilder {
        SubCommandBuilder {
            core: NodeCore::new(name),
        }
    }

    pub(crate) fn set_parent(&mut self, parent_qualified_name: &str) {
        self.core.set_parent(parent_qualified_name);
    }
}

impl CommandNode for SubCommand {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Leaf
    }
}

/// Builder for [`SubCommand`]
#[derive(Debug)]
pub struct SubCommandBuilder {
    core: NodeCore,
}

node_builder_setters!(SubCommandBuilder);

impl SubCommandBuilder {
    pub fn build(self) -> SubCommand {
        SubCommand { core: self.core }
    }
}
