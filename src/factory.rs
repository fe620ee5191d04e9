//! Tracker Factory
//!
//! Builds the tracker selected by configuration. The choice is made once;
//! the returned [`AnyTracker`] keeps its backend for its whole lifetime.

use crate::config::{Backend, StoreConfig};
use crate::error::{Error, Result};
use crate::tracker::{AnyTracker, KeyValueTracker, MemoryTracker, RedisStore};

/// Build the tracker described by `config`, connecting to Redis if needed
pub async fn build_tracker(config: &StoreConfig) -> Result<AnyTracker> {
    match config.backend {
        Backend::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .filter(|u| !u.is_empty())
                .ok_or_else(|| {
                    Error::Config("looks like we are configured for Redis, but no URL is set".into())
                })?;

            let store = match RedisStore::connect(url).await {
                Ok(s) => s,
                Err(e) => {
                    tracing::error!("Unable to connect to Redis database: {}", e);
                    return Err(e);
                }
            };

            tracing::info!(address = %store.address(), "Using REDIS to track provisioning status of nodes");
            Ok(AnyTracker::Redis(KeyValueTracker::new(store)))
        }
        Backend::Memory => {
            tracing::info!("Using memory based structures to track provisioning status of nodes");
            Ok(AnyTracker::Memory(MemoryTracker::new()))
        }
    }
}
