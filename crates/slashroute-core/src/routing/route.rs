//! Bounded-depth route walk

use serde_json::Value;

use crate::error::RoutingError;
use crate::interaction::OptionTree;

/// Deepest supported nesting: command → group → sub-command
pub const MAX_ROUTE_DEPTH: usize = 2;

/// Resolved route through a command's handler tree
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    /// No sub-structure; the tree is the leaf argument map
    Flat(OptionTree),
    /// One hop: a direct child of the command
    Grouped { name: String, args: OptionTree },
    /// Two hops: group, then sub-command inside it
    Nested {
        group: String,
        sub: String,
        args: OptionTree,
    },
}

impl Route {
    /// Names along the route, outermost first
    pub fn path(&self) -> Vec<&str> {
        match self {
            Route::Flat(_) => Vec::new(),
            Route::Grouped { name, .. } => vec![name.as_str()],
            Route::Nested { group, sub, .. } => vec![group.as_str(), sub.as_str()],
        }
    }

    /// Leaf argument map at the end of the route
    pub fn args(&self) -> &OptionTree {
        match self {
            Route::Flat(args) | Route::Grouped { args, .. } | Route::Nested { args, .. } => args,
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            Route::Flat(_) => 0,
            Route::Grouped { .. } => 1,
            Route::Nested { .. } => 2,
        }
    }

    /// Consume the route, keeping only the leaf arguments
    pub fn into_args(self) -> OptionTree {
        match self {
            Route::Flat(args) | Route::Grouped { args, .. } | Route::Nested { args, .. } => args,
        }
    }
}

/// The next hop of a level: its first entry, if that entry is an object
fn next_hop(level: &OptionTree) -> Option<(&String, &OptionTree)> {
    match level.iter().next()? {
        (name, Value::Object(inner)) => Some((name, inner)),
        _ => None,
    }
}

/// Walk the option tree and return the typed route.
///
/// The input is borrowed and never modified; the leaf arguments are cloned
/// out of it.
pub fn extract_route(tree: &OptionTree) -> Result<Route, RoutingError> {
    let mut path: Vec<&String> = Vec::with_capacity(MAX_ROUTE_DEPTH);
    let mut level = tree;

    while let Some((name, inner)) = next_hop(level) {
        if path.len() == MAX_ROUTE_DEPTH {
            return Err(RoutingError::chain_too_long(path.len() + 1));
        }
        path.push(name);
        level = inner;
    }

    let args = level.clone();
    Ok(match path.as_slice() {
        [] => Route::Flat(args),
        [name] => Route::Grouped {
            name: (*name).clone(),
            args,
        },
        [group, sub] => Route::Nested {
            group: (*group).clone(),
            sub: (*sub).clone(),
            args,
        },
        _ => unreachable!("path length is bounded by MAX_ROUTE_DEPTH"),
    })
}

/// `(path, leaf_args)` view of [`extract_route`]
pub fn options_as_route(tree: &OptionTree) -> Result<(Vec<String>, OptionTree), RoutingError> {
    let route = extract_route(tree)?;
    let path = route.path().into_iter().map(String::from).collect();
    Ok((path, route.into_args()))
}
