//! Concurrency limiting
//!
//! A node may carry a [`ConcurrencyLimiter`]. The dispatcher acquires a slot
//! during preparation and holds it as a [`ConcurrencySlot`], which releases
//! exactly once whether the invocation completes, fails, is cancelled, or the
//! dispatch future is dropped mid-flight.

mod max_concurrency;
mod slot;

pub use max_concurrency::{BucketType, MaxConcurrency};
pub use slot::ConcurrencySlot;

use async_trait::async_trait;

use crate::error::CommandError;
use crate::interaction::Interaction;

#[async_trait]
pub trait ConcurrencyLimiter: Send + Sync {
    /// Take a slot for this interaction, or fail with
    /// [`CommandError::MaxConcurrencyReached`]
    async fn acquire(&self, interaction: &Interaction) -> Result<(), CommandError>;

    /// Give back the slot taken for this interaction.
    ///
    /// Synchronous so it can run from `Drop`.
    fn release(&self, interaction: &Interaction);
}
