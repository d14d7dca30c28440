//! Semaphore-backed concurrency limit

use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::{debug, trace};

use super::ConcurrencyLimiter;
use crate::error::CommandError;
use crate::interaction::Interaction;

/// What a concurrency limit is counted against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketType {
    /// One bucket shared by every invocation
    #[default]
    Global,
    /// Per user
    User,
    /// Per guild; direct messages count per user
    Guild,
    /// Per channel; falls back to the user when there is no channel
    Channel,
    /// Per user within a guild
    Member,
}

impl BucketType {
    /// Bucket key for an interaction
    pub fn key(&self, interaction: &Interaction) -> (u64, u64) {
        let user = interaction.user_id();
        match self {
            Self::Global => (0, 0),
            Self::User => (0, user),
            Self::Guild => (interaction.guild_id().unwrap_or(user), 0),
            Self::Channel => (interaction.channel_id().unwrap_or(user), 0),
            Self::Member => (interaction.guild_id().unwrap_or(0), user),
        }
    }
}

/// Limit of `limit` simultaneous invocations per bucket.
///
/// With `wait` unset a full bucket rejects immediately; with it set the
/// invocation waits for a slot.
#[derive(Debug)]
pub struct MaxConcurrency {
    limit: usize,
    bucket: BucketType,
    wait: bool,
    semaphores: DashMap<(u64, u64), Arc<Semaphore>>,
    held: DashMap<u64, OwnedSemaphorePermit>,
}

impl MaxConcurrency {
    /// Create a limiter. A limit of zero is treated as one.
    pub fn new(limit: usize, bucket: BucketType) -> Self {
        Self {
            limit: limit.max(1),
            bucket,
            wait: false,
            semaphores: DashMap::new(),
            held: DashMap::new(),
        }
    }

    pub fn with_wait(mut self, wait: bool) -> Self {
        self.wait = wait;
        self
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn bucket(&self) -> BucketType {
        self.bucket
    }

    /// Slots still free in the interaction's bucket
    pub fn available(&self, interaction: &Interaction) -> usize {
        self.semaphores
            .get(&self.bucket.key(interaction))
            .map(|s| s.available_permits())
            .unwrap_or(self.limit)
    }

    fn semaphore_for(&self, interaction: &Interaction) -> Arc<Semaphore> {
        let key = self.bucket.key(interaction);
        let entry = self
            .semaphores
            .entry(key)
            .or_insert_with(|| Arc::new(Semaphore::new(self.limit)));
        Arc::clone(entry.value())
    }
}

#[async_trait]
impl ConcurrencyLimiter for MaxConcurrency {
    async fn acquire(&self, interaction: &Interaction) -> Result<(), CommandError> {
        let semaphore = self.semaphore_for(interaction);
        let rejected = || CommandError::max_concurrency(interaction.command_name(), self.limit);

        let permit = if self.wait {
            Arc::clone(&semaphore)
                .acquire_owned()
                .await
                .map_err(|_| rejected())?
        } else {
            Arc::clone(&semaphore)
                .try_acquire_owned()
                .map_err(|_| rejected())?
        };

        debug!(
            "Acquired concurrency slot for '{}' ({:?} bucket, {} left)",
            interaction.command_name(),
            self.bucket,
            semaphore.available_permits()
        );
        self.held.insert(interaction.id(), permit);
        Ok(())
    }

    fn release(&self, interaction: &Interaction) {
        if self.held.remove(&interaction.id()).is_none() {
            return;
        }
        // Only the map still references an idle bucket; waiters and permits
        // hold clones of the Arc.
        let key = self.bucket.key(interaction);
        if self
            .semaphores
            .remove_if(&key, |_, semaphore| Arc::strong_count(semaphore) == 1)
            .is_some()
        {
            trace!("Dropped idle {:?} bucket {:?}", self.bucket, key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_rejects_when_full() {
        let limiter = MaxConcurrency::new(1, BucketType::Global);
        let first = Interaction::builder("tag").build();
        let second = Interaction::builder("tag").build();

        limiter.acquire(&first).await.unwrap();
        let err = limiter.acquire(&second).await.unwrap_err();
        assert!(matches!(
            err,
            CommandError::MaxConcurrencyReached { limit: 1, .. }
        ));

        limiter.release(&first);
        limiter.acquire(&second).await.unwrap();
    }

    #[tokio::test]
    async fn test_release_is_idempotent() {
        let limiter = MaxConcurrency::new(2, BucketType::Global);
        let a = Interaction::builder("tag").build();
        let b = Interaction::builder("tag").build();

        limiter.acquire(&a).await.unwrap();
        limiter.acquire(&b).await.unwrap();
        assert_eq!(limiter.available(&a), 0);

        limiter.release(&a);
        limiter.release(&a);
        assert_eq!(limiter.available(&a), 1);
    }

    #[tokio::test]
    async fn test_buckets_are_independent() {
        let limiter = MaxConcurrency::new(1, BucketType::Guild);
        let one = Interaction::builder("tag").guild(1).build();
        let two = Interaction::builder("tag").guild(2).build();

        limiter.acquire(&one).await.unwrap();
        limiter.acquire(&two).await.unwrap();
        assert_eq!(limiter.available(&one), 0);
        assert_eq!(limiter.available(&two), 0);
    }

    #[tokio::test]
    async fn test_idle_buckets_are_dropped() {
        let limiter = MaxConcurrency::new(2, BucketType::User);
        let a = Interaction::builder("tag").user(1).build();
        let b = Interaction::builder("tag").user(1).build();
        let other = Interaction::builder("tag").user(2).build();

        limiter.acquire(&a).await.unwrap();
        limiter.acquire(&b).await.unwrap();
        limiter.acquire(&other).await.unwrap();
        assert_eq!(limiter.semaphores.len(), 2);

        limiter.release(&a);
        assert_eq!(limiter.semaphores.len(), 2);
        limiter.release(&other);
        assert_eq!(limiter.semaphores.len(), 1);
        limiter.release(&b);
        assert!(limiter.semaphores.is_empty());
        assert_eq!(limiter.available(&a), 2);
    }

    #[tokio::test]
    async fn test_bucket_with_waiter_is_kept() {
        let limiter = Arc::new(MaxConcurrency::new(1, BucketType::Global).with_wait(true));
        let first = Interaction::builder("tag").build();
        let second = Interaction::builder("tag").build();
        limiter.acquire(&first).await.unwrap();

        let waiter = {
            let limiter = limiter.clone();
            let second = second.clone();
            tokio::spawn(async move { limiter.acquire(&second).await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        limiter.release(&first);
        waiter.await.unwrap().unwrap();
        assert_eq!(limiter.semaphores.len(), 1);
        assert_eq!(limiter.available(&second), 0);

        limiter.release(&second);
        assert!(limiter.semaphores.is_empty());
    }

    #[tokio::test]
    async fn test_wait_blocks_until_release() {
        let limiter = Arc::new(MaxConcurrency::new(1, BucketType::Global).with_wait(true));
        let first = Interaction::builder("tag").build();
        let second = Interaction::builder("tag").build();
        limiter.acquire(&first).await.unwrap();

        let waiter = {
            let limiter = limiter.clone();
            let second = second.clone();
            tokio::spawn(async move { limiter.acquire(&second).await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        limiter.release(&first);
        waiter.await.unwrap().unwrap();
    }

    #[test]
    fn test_bucket_keys() {
        let dm = Interaction::builder("t").user(7).build();
        let guild = Interaction::builder("t").user(7).guild(3).channel(5).build();

        assert_eq!(BucketType::Global.key(&dm), (0, 0));
        assert_eq!(BucketType::User.key(&dm), (0, 7));
        assert_eq!(BucketType::Guild.key(&dm), (7, 0));
        assert_eq!(BucketType::Guild.key(&guild), (3, 0));
        assert_eq!(BucketType::Channel.key(&guild), (5, 0));
        assert_eq!(BucketType::Member.key(&guild), (3, 7));
    }
}
