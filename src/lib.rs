//! Provtrack - Post-Deployment Provisioning Tracker
//!
//! Tracks whether each node in a deployment has completed its one-time
//! post-deployment provisioning step.
//!
//! # Backends
//!
//! - Redis, for flags that must survive restarts and be shared between
//!   processes
//! - An in-process map, used when no Redis instance is configured
//!
//! Both implement [`Tracker`] and behave identically: a node that was
//! never marked is simply not provisioned.

pub mod config;
pub mod error;
pub mod factory;
pub mod tracker;

pub use config::TrackerConfig;
pub use error::{Error, Result};
pub use factory::build_tracker;
pub use tracker::{AnyTracker, Tracker};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Backend, StoreConfig, TrackerConfig};
    pub use crate::error::{Error, Result};
    pub use crate::factory::build_tracker;
    pub use crate::tracker::{AnyTracker, KeyValueTracker, KvStore, MemoryTracker, RedisStore, Tracker};
}
