//! Redis connection management for the remote analysis store.

use redis::aio::ConnectionManager;
use thiserror::Error;
use tracing::debug;

/// Errors raised by the remote store.
#[derive(Error, Debug)]
pub enum RedisError {
    #[error("Redis connection error: {0}")]
    Connection(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unsupported schema version {found} (expected {expected})")]
    SchemaVersion { found: u32, expected: u32 },
}

/// Result type for remote store operations.
pub type RedisResult<T> = Result<T, RedisError>;

/// Multiplexed connection. Cheap to clone; each operation takes its own clone.
pub type RedisPool = ConnectionManager;

/// Connect to Redis at `redis_url` (e.g. `redis://127.0.0.1:6379`).
pub async fn init_pool(redis_url: &str) -> RedisResult<RedisPool> {
    debug!(url = %redis_url, "Connecting to remote store");
    let client = redis::Client::open(redis_url)?;
    let manager = ConnectionManager::new(client).await?;
    Ok(manager)
}
