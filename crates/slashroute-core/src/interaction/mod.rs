//! Interaction context
//!
//! An [`Interaction`] is the per-call context handed to every handler, hook,
//! check and error handler. It is a cheap clonable handle: clones share the
//! same failed flag and cancellation token.

mod payload;
mod responder;

pub use payload::{CommandPayload, OptionType, PayloadOption};
pub use responder::{Choice, InteractionResponder, NoopResponder};

#[cfg(test)]
pub use responder::MockInteractionResponder;

use serde_json::{Map, Value};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Nested option-value tree carried by a command interaction
pub type OptionTree = Map<String, Value>;

static NEXT_INTERACTION_ID: AtomicU64 = AtomicU64::new(1);

/// The option the user is currently typing during autocomplete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusedOption {
    /// Option name as sent by the platform
    pub name: String,
    /// Partial value typed so far
    pub value: String,
}

impl FocusedOption {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

struct InteractionInner {
    id: u64,
    command_name: String,
    options: OptionTree,
    guild_id: Option<u64>,
    channel_id: Option<u64>,
    user_id: u64,
    focused: Option<FocusedOption>,
    responder: Arc<dyn InteractionResponder>,
    command_failed: AtomicBool,
    cancel: CancellationToken,
}

/// A single slash-command or autocomplete interaction
#[derive(Clone)]
pub struct Interaction {
    inner: Arc<InteractionInner>,
}

impl Interaction {
    /// Start building an interaction for the named top-level command
    pub fn builder(command_name: impl Into<String>) -> InteractionBuilder {
        InteractionBuilder::new(command_name)
    }

    /// Unique interaction id, used to correlate limiter slots
    pub fn id(&self) -> u64 {
        self.inner.id
    }

    /// Name of the top-level command
    pub fn command_name(&self) -> &str {
        &self.inner.command_name
    }

    /// Raw option tree
    pub fn options(&self) -> &OptionTree {
        &self.inner.options
    }

    /// Guild the interaction came from, `None` in direct messages
    pub fn guild_id(&self) -> Option<u64> {
        self.inner.guild_id
    }

    pub fn channel_id(&self) -> Option<u64> {
        self.inner.channel_id
    }

    pub fn user_id(&self) -> u64 {
        self.inner.user_id
    }

    /// Focused option, only present on autocomplete interactions
    pub fn focused_option(&self) -> Option<&FocusedOption> {
        self.inner.focused.as_ref()
    }

    /// Whether this is an autocomplete interaction
    pub fn is_autocomplete(&self) -> bool {
        self.inner.focused.is_some()
    }

    /// Response channel
    pub fn response(&self) -> &dyn InteractionResponder {
        self.inner.responder.as_ref()
    }

    /// Whether the dispatcher recorded a failure for this interaction
    pub fn command_failed(&self) -> bool {
        self.inner.command_failed.load(Ordering::SeqCst)
    }

    /// Record that the invocation failed
    pub fn mark_failed(&self) {
        self.inner.command_failed.store(true, Ordering::SeqCst);
    }

    /// Token that aborts a suspended handler when cancelled
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.inner.cancel
    }

    /// Cancel the running invocation
    pub fn cancel(&self) {
        self.inner.cancel.cancel();
    }
}

impl fmt::Debug for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interaction")
            .field("id", &self.inner.id)
            .field("command_name", &self.inner.command_name)
            .field("guild_id", &self.inner.guild_id)
            .field("user_id", &self.inner.user_id)
            .field("focused", &self.inner.focused)
            .field("command_failed", &self.command_failed())
            .finish_non_exhaustive()
    }
}

/// Builder for [`Interaction`]
pub struct InteractionBuilder {
    id: Option<u64>,
    command_name: String,
    options: OptionTree,
    guild_id: Option<u64>,
    channel_id: Option<u64>,
    user_id: u64,
    focused: Option<FocusedOption>,
    responder: Option<Arc<dyn InteractionResponder>>,
    cancel: Option<CancellationToken>,
}

impl InteractionBuilder {
    fn new(command_name: impl Into<String>) -> Self {
        Self {
            id: None,
            command_name: command_name.into(),
            options: OptionTree::new(),
            guild_id: None,
            channel_id: None,
            user_id: 0,
            focused: None,
            responder: None,
            cancel: None,
        }
    }

    pub fn id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the option tree
    pub fn options(mut self, options: OptionTree) -> Self {
        self.options = options;
        self
    }

    /// Set the option tree from a JSON object; non-objects give an empty tree
    pub fn options_json(mut self, options: Value) -> Self {
        self.options = match options {
            Value::Object(map) => map,
            _ => OptionTree::new(),
        };
        self
    }

    pub fn guild(mut self, guild_id: u64) -> Self {
        self.guild_id = Some(guild_id);
        self
    }

    pub fn channel(mut self, channel_id: u64) -> Self {
        self.channel_id = Some(channel_id);
        self
    }

    pub fn user(mut self, user_id: u64) -> Self {
        self.user_id = user_id;
        self
    }

    /// Mark the interaction as an autocomplete request for `name`
    pub fn focused(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.focused = Some(FocusedOption::new(name, value));
        self
    }

    pub fn responder(mut self, responder: Arc<dyn InteractionResponder>) -> Self {
        self.responder = Some(responder);
        self
    }

    /// Use an externally owned cancellation token
    pub fn cancellation_token(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn build(self) -> Interaction {
        let id = self
            .id
            .unwrap_or_else(|| NEXT_INTERACTION_ID.fetch_add(1, Ordering::Relaxed));
        Interaction {
            inner: Arc::new(InteractionInner {
                id,
                command_name: self.command_name,
                options: self.options,
                guild_id: self.guild_id,
                channel_id: self.channel_id,
                user_id: self.user_id,
                focused: self.focused,
                responder: self.responder.unwrap_or_else(|| Arc::new(NoopResponder)),
                command_failed: AtomicBool::new(false),
                cancel: self.cancel.unwrap_or_default(),
            }),
        }
    }
}
