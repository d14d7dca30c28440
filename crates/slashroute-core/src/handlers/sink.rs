//! Process-wide error sink
//!
//! The sink is the last stop for a failed dispatch. It is injected into the
//! dispatcher rather than looked up globally, and is notified exactly once
//! per failed top-level invocation.

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{error, warn};

use crate::error::CommandError;
use crate::interaction::Interaction;

#[async_trait]
pub trait ErrorSink: Send + Sync {
    async fn report(&self, interaction: &Interaction, error: &CommandError);
}

/// Sink that logs every error
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingErrorSink;

#[async_trait]
impl ErrorSink for LoggingErrorSink {
    async fn report(&self, interaction: &Interaction, err: &CommandError) {
        error!(
            "Ignoring error in slash command {} (interaction {}): [{}] {}",
            interaction.command_name(),
            interaction.id(),
            err.error_code(),
            err
        );
    }
}

/// A failed invocation as delivered by [`ChannelErrorSink`]
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub interaction_id: u64,
    pub command_name: String,
    pub guild_id: Option<u64>,
    pub error: CommandError,
}

/// Sink that forwards reports over an unbounded channel
#[derive(Debug, Clone)]
pub struct ChannelErrorSink {
    sender: mpsc::UnboundedSender<ErrorReport>,
}

impl ChannelErrorSink {
    /// Create a sink and the receiver that observes it
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ErrorReport>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl ErrorSink for ChannelErrorSink {
    async fn report(&self, interaction: &Interaction, err: &CommandError) {
        let report = ErrorReport {
            interaction_id: interaction.id(),
            command_name: interaction.command_name().to_string(),
            guild_id: interaction.guild_id(),
            error: err.clone(),
        };
        if self.sender.send(report).is_err() {
            warn!("Error sink receiver dropped; report lost: {}", err);
        }
    }
}
