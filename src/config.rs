//! Provtrack Configuration
//!
//! Configuration structures for selecting and wiring the tracker backend.
//! Configuration is loaded once at startup, either from a TOML file or from
//! the legacy container-link environment variables, and then handed to
//! [`crate::factory::build_tracker`].

use serde::{Deserialize, Serialize};

/// Environment variable whose presence signals a linked Redis container
pub const ENV_REDIS_VERSION: &str = "AUTODB_ENV_REDIS_VERSION";

/// Environment variable holding the linked Redis address (`tcp://host:port`)
pub const ENV_REDIS_PORT: &str = "AUTODB_PORT";

/// Main tracker configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Backend store configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Storage backend used to hold provisioned flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Transient in-process map
    #[default]
    Memory,
    /// Durable Redis store
    Redis,
}

impl Backend {
    /// Whether flags outlive the process that wrote them
    pub fn is_durable(&self) -> bool {
        matches!(self, Backend::Redis)
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::Memory => write!(f, "memory"),
            Backend::Redis => write!(f, "redis"),
        }
    }
}

/// Backend store configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Which backend to use
    #[serde(default)]
    pub backend: Backend,

    /// Redis connection URL, required when `backend = "redis"`
    #[serde(default)]
    pub redis_url: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl TrackerConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &std::path::Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_str(content: &str) -> crate::Result<Self> {
        let config: TrackerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the process environment
    pub fn from_env() -> crate::Result<Self> {
        Self::from_env_with(|name| std::env::var(name).ok())
    }

    /// Load configuration from container-link style variables.
    ///
    /// A non-empty [`ENV_REDIS_VERSION`] selects Redis, in which case
    /// [`ENV_REDIS_PORT`] must carry the linked address. Otherwise the
    /// memory backend is used.
    pub fn from_env_with<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let linked = lookup(ENV_REDIS_VERSION).is_some_and(|v| !v.is_empty());
        if !linked {
            return Ok(Self::default());
        }

        let port = lookup(ENV_REDIS_PORT)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                crate::Error::Config(format!(
                    "looks like we are configured for Redis, but {} is not defined",
                    ENV_REDIS_PORT
                ))
            })?;

        let config = Self {
            store: StoreConfig {
                backend: Backend::Redis,
                redis_url: Some(link_to_redis_url(&port)?),
            },
            logging: LoggingConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> crate::Result<()> {
        if self.store.backend == Backend::Redis
            && self.store.redis_url.as_deref().map_or(true, str::is_empty)
        {
            return Err(crate::Error::Config(
                "store.redis_url cannot be empty when backend is redis".into(),
            ));
        }

        Ok(())
    }
}

/// Translate a container link address (`tcp://host:port`) into a Redis URL
fn link_to_redis_url(link: &str) -> crate::Result<String> {
    let (scheme, host) = link.split_once("://").ok_or_else(|| {
        crate::Error::Config(format!("unable to parse Redis link address '{}'", link))
    })?;

    if scheme != "tcp" {
        return Err(crate::Error::Config(format!(
            "unsupported Redis link scheme '{}' in '{}'",
            scheme, link
        )));
    }

    let host = host.trim_end_matches('/');
    if host.is_empty() {
        return Err(crate::Error::Config(format!(
            "Redis link address '{}' has no host",
            link
        )));
    }

    Ok(format!("redis://{}", host))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[store]
backend = "redis"
redis_url = "redis://10.0.0.5:6379"

[logging]
level = "debug"
"#;

        let config = TrackerConfig::from_str(toml).unwrap();
        assert_eq!(config.store.backend, Backend::Redis);
        assert_eq!(config.store.redis_url.as_deref(), Some("redis://10.0.0.5:6379"));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_backend_durability() {
        assert!(Backend::Redis.is_durable());
        assert!(!Backend::Memory.is_durable());
        assert!(!Backend::default().is_durable());
    }

    #[test]
    fn test_empty_config_defaults_to_memory() {
        let config = TrackerConfig::from_str("").unwrap();
        assert_eq!(config.store.backend, Backend::Memory);
        assert!(config.store.redis_url.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_redis_without_url_is_rejected() {
        let toml = r#"
[store]
backend = "redis"
"#;
        let err = TrackerConfig::from_str(toml).unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_unknown_backend_is_parse_error() {
        let toml = r#"
[store]
backend = "etcd"
"#;
        let err = TrackerConfig::from_str(toml).unwrap_err();
        assert!(matches!(err, crate::Error::ConfigParse(_)));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("provtrack.toml");
        std::fs::write(&path, "[store]\nbackend = \"memory\"\n").unwrap();

        let config = TrackerConfig::from_file(&path).unwrap();
        assert_eq!(config.store.backend, Backend::Memory);

        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            TrackerConfig::from_file(&missing).unwrap_err(),
            crate::Error::Io(_)
        ));
    }

    #[test]
    fn test_env_without_link_uses_memory() {
        let config = TrackerConfig::from_env_with(env(&[])).unwrap();
        assert_eq!(config.store.backend, Backend::Memory);

        let config =
            TrackerConfig::from_env_with(env(&[(ENV_REDIS_VERSION, "")])).unwrap();
        assert_eq!(config.store.backend, Backend::Memory);
    }

    #[test]
    fn test_env_link_selects_redis() {
        let config = TrackerConfig::from_env_with(env(&[
            (ENV_REDIS_VERSION, "7.2.4"),
            (ENV_REDIS_PORT, "tcp://172.17.0.2:6379"),
        ]))
        .unwrap();
        assert_eq!(config.store.backend, Backend::Redis);
        assert_eq!(config.store.redis_url.as_deref(), Some("redis://172.17.0.2:6379"));
    }

    #[test]
    fn test_env_link_without_port_is_rejected() {
        let err = TrackerConfig::from_env_with(env(&[(ENV_REDIS_VERSION, "7.2.4")]))
            .unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_env_link_with_bad_address_is_rejected() {
        for bad in ["172.17.0.2:6379", "udp://172.17.0.2:6379", "tcp://"] {
            let err = TrackerConfig::from_env_with(env(&[
                (ENV_REDIS_VERSION, "7.2.4"),
                (ENV_REDIS_PORT, bad),
            ]))
            .unwrap_err();
            assert!(matches!(err, crate::Error::Config(_)), "accepted {}", bad);
        }
    }
}
