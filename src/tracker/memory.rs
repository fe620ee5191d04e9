//! In-memory tracker
//!
//! Transient flag storage for deployments without a Redis instance, and for
//! tests. Nothing survives a process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::Tracker;
use crate::error::Result;

/// Tracker backed by a process-local map
#[derive(Debug, Default)]
pub struct MemoryTracker {
    data: RwLock<HashMap<String, bool>>,
}

impl MemoryTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Tracker for MemoryTracker {
    async fn get(&self, key: &str) -> Result<bool> {
        let data = self.data.read().await;
        Ok(data.get(key).copied().unwrap_or(false))
    }

    async fn set(&self, key: &str) -> Result<()> {
        tracing::debug!(key, "Marking node provisioned");
        self.data.write().await.insert(key.to_string(), true);
        Ok(())
    }

    async fn clear(&self, key: &str) -> Result<()> {
        tracing::debug!(key, "Clearing node provisioned flag");
        self.data.write().await.remove(key);
        Ok(())
    }
}
