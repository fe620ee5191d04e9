//! Key-value tracker
//!
//! Translates tracker operations into three point commands against an
//! external key-value store. The connection is owned by whoever built the
//! store; the tracker never opens, closes or retries it.

use async_trait::async_trait;

use super::Tracker;
use crate::error::{Error, Result};

/// Value written for a provisioned key
const FLAG_SET: &str = "1";

/// Point commands a key-value store must support
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Read `key`. `Ok(None)` when the store has no value for it.
    async fn lookup(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing anything already there
    async fn put(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key succeeds.
    async fn delete(&self, key: &str) -> Result<()>;
}

/// Tracker backed by an external key-value store
#[derive(Debug)]
pub struct KeyValueTracker<S> {
    store: S,
}

impl<S: KvStore> KeyValueTracker<S> {
    /// Wrap an already connected store
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[async_trait]
impl<S: KvStore> Tracker for KeyValueTracker<S> {
    async fn get(&self, key: &str) -> Result<bool> {
        match self.store.lookup(key).await? {
            Some(value) => decode_flag(key, &value),
            None => Ok(false),
        }
    }

    async fn set(&self, key: &str) -> Result<()> {
        tracing::debug!(key, "Marking node provisioned");
        self.store.put(key, FLAG_SET).await
    }

    async fn clear(&self, key: &str) -> Result<()> {
        tracing::debug!(key, "Clearing node provisioned flag");
        self.store.delete(key).await
    }
}

/// Interpret a stored value as a provisioned flag
fn decode_flag(key: &str, value: &str) -> Result<bool> {
    match value {
        "1" => Ok(true),
        "0" => Ok(false),
        v if v.eq_ignore_ascii_case("true") => Ok(true),
        v if v.eq_ignore_ascii_case("false") => Ok(false),
        _ => Err(Error::InvalidFlag {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
