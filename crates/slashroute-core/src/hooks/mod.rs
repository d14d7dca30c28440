//! Invocation hooks and checks
//!
//! Hooks run around an invocation: before-hooks during preparation, after-hooks
//! once the outcome is known. Node hooks run first, then the dispatcher-wide
//! ones. Checks are predicates evaluated before anything else is prepared.

mod checks;
mod invoke_hook;

pub use checks::{Check, FnCheck};
pub use invoke_hook::{FnHook, InvokeHook, InvokeHooks};
