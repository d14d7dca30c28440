//! Argument binding
//!
//! Raw leaf arguments go through two steps before reaching a handler body:
//!
//! 1. [`Connectors`] rename platform option names to parameter names, using
//!    only the table of the node being invoked.
//! 2. A [`ParamResolver`] turns the renamed map into [`BoundArgs`] according
//!    to the node's [`ParamSchema`] (defaults, required checks, extras).

mod args;
mod connectors;
mod params;

pub use args::BoundArgs;
pub use connectors::Connectors;
pub use params::{ParamResolver, ParamSchema, ParamSpec, SchemaResolver};
