//! Provisioning Tracker Module
//!
//! Records whether a node has completed its post-deployment provisioning.
//! A key that was never set is reported as not provisioned; absence is
//! never an error.

mod kv;
mod memory;
mod redis_store;

use async_trait::async_trait;

use crate::config::Backend;
use crate::error::Result;

pub use kv::{KeyValueTracker, KvStore};
pub use memory::MemoryTracker;
pub use redis_store::RedisStore;

/// Provisioned-flag storage keyed by node identity
#[async_trait]
pub trait Tracker: Send + Sync {
    /// Whether `key` has been marked provisioned
    async fn get(&self, key: &str) -> Result<bool>;

    /// Mark `key` as provisioned. Idempotent.
    async fn set(&self, key: &str) -> Result<()>;

    /// Forget the flag for `key`. Clearing an absent key succeeds.
    async fn clear(&self, key: &str) -> Result<()>;
}

/// Tracker chosen once at startup by [`crate::factory::build_tracker`]
#[derive(Debug)]
pub enum AnyTracker {
    /// Flags held in Redis
    Redis(KeyValueTracker<RedisStore>),
    /// Flags held in process memory
    Memory(MemoryTracker),
}

impl AnyTracker {
    /// Backend backing this tracker
    pub fn backend(&self) -> Backend {
        match self {
            AnyTracker::Redis(_) => Backend::Redis,
            AnyTracker::Memory(_) => Backend::Memory,
        }
    }
}

#[async_trait]
impl Tracker for AnyTracker {
    async fn get(&self, key: &str) -> Result<bool> {
        match self {
            AnyTracker::Redis(t) => t.get(key).await,
            AnyTracker::Memory(t) => t.get(key).await,
        }
    }

    async fn set(&self, key: &str) -> Result<()> {
        match self {
            AnyTracker::Redis(t) => t.set(key).await,
            AnyTracker::Memory(t) => t.set(key).await,
        }
    }

    async fn clear(&self, key: &str) -> Result<()> {
        match self {
            AnyTracker::Redis(t) => t.clear(key).await,
            AnyTracker::Memory(t) => t.clear(key).await,
        }
    }
}
