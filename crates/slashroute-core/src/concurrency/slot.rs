//! RAII guard for an acquired concurrency slot

use std::fmt;
use std::sync::Arc;
use tracing::debug;

use super::ConcurrencyLimiter;
use crate::error::CommandError;
use crate::interaction::Interaction;

/// A held concurrency slot.
///
/// Call [`release`](Self::release) on the normal path; dropping the guard
/// releases anything still held.
pub struct ConcurrencySlot {
    limiter: Option<Arc<dyn ConcurrencyLimiter>>,
    interaction: Interaction,
    released: bool,
}

impl ConcurrencySlot {
    /// Acquire a slot from `limiter`, or an inert guard when there is none
    pub async fn acquire(
        limiter: Option<&Arc<dyn ConcurrencyLimiter>>,
        interaction: &Interaction,
    ) -> Result<Self, CommandError> {
        if let Some(limiter) = limiter {
            limiter.acquire(interaction).await?;
        }
        Ok(Self {
            limiter: limiter.cloned(),
            interaction: interaction.clone(),
            released: false,
        })
    }

    /// Whether the guard still owns a slot
    pub fn is_held(&self) -> bool {
        self.limiter.is_some() && !self.released
    }

    /// Release the slot; later calls do nothing
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Some(limiter) = &self.limiter {
            debug!(
                "Releasing concurrency slot for '{}' (interaction {})",
                self.interaction.command_name(),
                self.interaction.id()
            );
            limiter.release(&self.interaction);
        }
    }
}

impl Drop for ConcurrencySlot {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for ConcurrencySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcurrencySlot")
            .field("interaction", &self.interaction.id())
            .field("limited", &self.limiter.is_some())
            .field("released", &self.released)
            .finish()
    }
}
