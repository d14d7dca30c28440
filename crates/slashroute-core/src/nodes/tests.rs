//! Tests for handler tree construction

use super::*;
use crate::autocomplete::Autocompleter;
use crate::binding::{Connectors, ParamSchema, ParamSpec};
use crate::handlers::FnBody;

fn leaf(name: &str) -> SubCommand {
    SubCommand::builder(name)
        .body(FnBody::new(|_, _| async { Ok(()) }))
        .build()
}

#[test]
fn test_qualified_names_assigned_on_attach() {
    let group = SubCommandGroup::builder("edit")
        .sub_command(leaf("title"))
        .build();
    assert_eq!(group.qualified_name(), "edit");
    assert_eq!(group.child("title").unwrap().qualified_name(), "edit title");

    let root = SlashCommand::builder("tag")
        .group(group)
        .sub_command(leaf("show"))
        .build();

    let edit = root.child("edit").and_then(Child::as_group).unwrap();
    assert_eq!(edit.qualified_name(), "tag edit");
    assert_eq!(edit.child("title").unwrap().qualified_name(), "tag edit title");

    let show = root.child("show").and_then(Child::as_leaf).unwrap();
    assert_eq!(show.qualified_name(), "tag show");
    assert_eq!(root.qualified_name(), "tag");
}

#[test]
fn test_child_kinds() {
    let root = SlashCommand::builder("tag")
        .group(SubCommandGroup::builder("edit").build())
        .sub_command(leaf("show"))
        .build();

    assert!(root.has_children());
    assert_eq!(root.children().count(), 2);
    assert_eq!(root.kind(), NodeKind::Command);
    assert_eq!(root.child("edit").unwrap().node().kind(), NodeKind::Group);
    assert_eq!(root.child("show").unwrap().node().kind(), NodeKind::Leaf);
    assert!(root.child("show").unwrap().as_group().is_none());
    assert!(root.child("missing").is_none());
}

#[test]
fn test_duplicate_child_keeps_last() {
    let first = SubCommand::builder("show").guild_only(false).build();
    let second = SubCommand::builder("show").guild_only(true).build();
    let root = SlashCommand::builder("tag")
        .sub_command(first)
        .sub_command(second)
        .build();

    assert_eq!(root.children().count(), 1);
    assert!(root.child("show").unwrap().node().core().guild_only());
}

#[test]
fn test_builder_setters_populate_core() {
    let node = SubCommand::builder("show")
        .connector("x", "value")
        .connectors(Connectors::new().with("x", "value").with("y", "other"))
        .schema(ParamSchema::new().param(ParamSpec::required("value")))
        .autocomplete("value", Autocompleter::choices(["a"]))
        .guild_only(true)
        .build();

    let core = node.core();
    assert_eq!(core.connectors().len(), 2);
    assert_eq!(core.connectors().get("y"), Some("other"));
    assert!(core.schema().get("value").is_some());
    assert!(core.autocompleters().contains("value"));
    assert!(core.guild_only());
    assert!(core.body().is_none());
    assert!(!core.has_error_handler());
    assert!(core.limiter().is_none());
}

#[test]
fn test_node_kind_display() {
    assert_eq!(NodeKind::Command.to_string(), "command");
    assert_eq!(NodeKind::Group.to_string(), "group");
    assert_eq!(NodeKind::Leaf.to_string(), "sub-command");
}
