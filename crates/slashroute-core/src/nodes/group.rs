//! Sub-command groups

use std::collections::HashMap;
use tracing::warn;

use super::leaf::SubCommand;
use super::node_core::node_builder_setters;
use super::{CommandNode, NodeCore, NodeKind};

/// Intermediate node owning sub-commands.
///
/// Its own body, if any, runs before the matched sub-command as shared setup.
#[derive(Debug, Clone)]
pub struct SubCommandGroup {
    core: NodeCore,
    children: HashMap<String, SubCommand>,
}

impl SubCommandGroup {
    pub fn builder(name: impl Into<String>) -> SubCommandGroupBuilder {
        SubCommandGroupBuilder {
            core: NodeCore::new(name),
            children: HashMap::new(),
        }
    }

    /// Sub-command registered under `name`
    pub fn child(&self, name: &str) -> Option<&SubCommand> {
        self.children.get(name)
    }

    pub fn children(&self) -> impl Iterator<Item = &SubCommand> {
        self.children.values()
    }

    pub(crate) fn set_parent(&mut self, parent_qualified_name: &str) {
        self.core.set_parent(parent_qualified_name);
        let qualified = self.core.qualified_name().to_string();
        for child in self.children.values_mut() {
            child.set_parent(&qualified);
        }
    }
}

impl CommandNode for SubCommandGroup {
    fn core(&self) -> &NodeCore {
        &self.core
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Group
    }
}

/// Builder for [`SubCommandGroup`]
#[derive(Debug)]
pub struct SubCommandGroupBuilder {
    core: NodeCore,
    children: HashMap<String, SubCommand>,
}

node_builder_setters!(SubCommandGroupBuilder);

impl SubCommandGroupBuilder {
    /// Attach a sub-command; a later one with the same name replaces it
    pub fn sub_command(mut self, mut sub_command: SubCommand) -> Self {
        sub_command.set_parent(self.core.qualified_name());
        let name = sub_command.name().to_string();
        if self.children.insert(name.clone(), sub_command).is_some() {
            warn!(
                "Sub-command '{}' registered twice in group '{}'; keeping the last one",
                name,
                self.core.name()
            );
        }
        self
    }

    pub fn build(self) -> SubCommandGroup {
        SubCommandGroup {
            core: self.core,
            children: self.children,
        }
    }
}
