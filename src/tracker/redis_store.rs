//! Redis key-value store
//!
//! [`KvStore`] over a Redis connection. Commands go out as `GET`, `SET`
//! and `DEL`; replies and errors come back unmodified. Connecting is a
//! single attempt and a dropped connection is not re-established.

use async_trait::async_trait;
use redis::aio::{ConnectionLike, MultiplexedConnection};

use super::KvStore;
use crate::error::{Error, Result};

/// Connected Redis store
#[derive(Clone)]
pub struct RedisStore<C = MultiplexedConnection> {
    conn: C,
    address: String,
}

impl RedisStore {
    /// Connect to the Redis instance at `url`
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(|e| Error::ConnectionFailed {
            address: url.to_string(),
            reason: e.to_string(),
        })?;

        let conn = client
            .get_multiplexed_tokio_connection()
            .await
            .map_err(|e| Error::ConnectionFailed {
                address: url.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self::from_connection(conn, url))
    }
}

impl<C> RedisStore<C> {
    /// Wrap a connection the caller already established
    pub fn from_connection(conn: C, address: impl Into<String>) -> Self {
        Self {
            conn,
            address: address.into(),
        }
    }

    /// Address this store is connected to
    pub fn address(&self) -> &str {
        &self.address
    }
}

impl<C> std::fmt::Debug for RedisStore<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<C> KvStore for RedisStore<C>
where
    C: ConnectionLike + Clone + Send + Sync,
{
    async fn lookup(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = redis::cmd("GET").arg(key).query_async(&mut conn).await?;
        Ok(value)
    }

    async fn put(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        redis::cmd("SET")
            .arg(key)
            .arg(value)
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        redis::cmd("DEL")
            .arg(key)
            .query_async::<_, i64>(&mut conn)
            .await?;
        Ok(())
    }
}
