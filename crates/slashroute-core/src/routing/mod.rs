//! Route extraction
//!
//! Turns a nested option tree into a typed [`Route`]. The tree is a singly
//! branching structure: at each level at most one entry holds a nested
//! object, and that entry names the next hop (group, then sub-command).
//!
//! ```text
//! {"x": 1}                          -> Flat({"x": 1})
//! {"sub": {"x": 1}}                 -> Grouped("sub", {"x": 1})
//! {"group": {"sub": {"x": 1}}}      -> Nested("group", "sub", {"x": 1})
//! {"a": {"b": {"c": {"x": 1}}}}     -> RoutingError::ChainTooLong
//! ```

mod route;

pub use route::{extract_route, options_as_route, Route, MAX_ROUTE_DEPTH};

#[cfg(test)]
mod tests;
