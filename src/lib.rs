//! Slashroute
//!
//! Facade over [`slashroute_core`]: slash-command routing, argument binding,
//! and invocation for interaction bots.

pub use slashroute_core::*;
