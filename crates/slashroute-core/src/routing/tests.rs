//! Tests for route extraction

use super::*;
use crate::error::RoutingError;
use crate::interaction::OptionTree;
use serde_json::{json, Value};

fn tree(value: Value) -> OptionTree {
    match value {
        Value::Object(map) => map,
        _ => panic!("test tree must be an object"),
    }
}

#[test]
fn test_empty_tree_is_flat() {
    let route = extract_route(&OptionTree::new()).unwrap();
    assert_eq!(route, Route::Flat(OptionTree::new()));
    assert!(route.path().is_empty());

    let (path, args) = options_as_route(&OptionTree::new()).unwrap();
    assert!(path.is_empty());
    assert!(args.is_empty());
}

#[test]
fn test_flat_arguments() {
    let input = tree(json!({"x": 5, "y": "hi"}));
    let route = extract_route(&input).unwrap();
    assert_eq!(route.depth(), 0);
    assert_eq!(route.args(), &input);
}

#[test]
fn test_single_hop() {
    let input = tree(json!({"sub1": {"x": 5}}));
    let (path, args) = options_as_route(&input).unwrap();
    assert_eq!(path, vec!["sub1"]);
    assert_eq!(args, tree(json!({"x": 5})));
}

#[test]
fn test_two_hops() {
    let input = tree(json!({"group1": {"sub1": {"x": 5}}}));
    let route = extract_route(&input).unwrap();
    assert_eq!(
        route,
        Route::Nested {
            group: "group1".into(),
            sub: "sub1".into(),
            args: tree(json!({"x": 5})),
        }
    );
    assert_eq!(route.path(), vec!["group1", "sub1"]);
}

#[test]
fn test_sub_command_without_arguments() {
    let input = tree(json!({"group1": {"sub1": {}}}));
    let (path, args) = options_as_route(&input).unwrap();
    assert_eq!(path, vec!["group1", "sub1"]);
    assert!(args.is_empty());
}

#[test]
fn test_three_hops_is_too_long() {
    let input = tree(json!({"a": {"b": {"c": {"x": 1}}}}));
    assert_eq!(
        extract_route(&input),
        Err(RoutingError::ChainTooLong { depth: 3 })
    );
}

#[test]
fn test_input_is_not_mutated() {
    let input = tree(json!({"group1": {"sub1": {"x": 5}}}));
    let before = input.clone();
    let _ = extract_route(&input).unwrap();
    let _ = options_as_route(&input).unwrap();
    assert_eq!(input, before);
}

#[test]
fn test_only_first_entry_decides_the_branch() {
    // A scalar first entry means the level is the leaf map, even if a later
    // value happens to be an object.
    let input = tree(json!({"x": 1, "meta": {"k": "v"}}));
    let route = extract_route(&input).unwrap();
    assert_eq!(route.depth(), 0);
    assert_eq!(route.args().len(), 2);
}

#[test]
fn test_depth_never_exceeds_max() {
    let samples = [
        json!({}),
        json!({"a": 1}),
        json!({"a": {}}),
        json!({"a": {"b": 1}}),
        json!({"a": {"b": {}}}),
        json!({"a": {"b": {"c": 1, "d": 2}}}),
    ];
    for sample in samples {
        let route = extract_route(&tree(sample)).unwrap();
        assert!(route.path().len() <= MAX_ROUTE_DEPTH);
    }
}
