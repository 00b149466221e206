//! Singleton strategic analysis record stored in Redis.
//!
//! One hash per record id: `strata:strategic_data:<id>` with fields
//! `data` (the full analysis document), `schema_version` and `updated_at`.

use crate::client::{RedisError, RedisPool, RedisResult};
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};

/// Schema version written alongside every document.
pub const SCHEMA_VERSION: u32 = 1;

/// Stored record as read back from Redis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategicDataRow {
    pub id: i64,
    pub data: String,
    pub schema_version: u32,
    pub updated_at: String,
}

fn record_key(id: i64) -> String {
    format!("strata:strategic_data:{}", id)
}

/// Insert or replace the document stored under `id`.
pub async fn upsert_strategic_data(pool: &RedisPool, id: i64, data_json: &str) -> RedisResult<()> {
    let mut conn = pool.clone();
    let key = record_key(id);
    let now = chrono::Utc::now().to_rfc3339();
    let fields: [(&str, String); 3] = [
        ("data", data_json.to_string()),
        ("schema_version", SCHEMA_VERSION.to_string()),
        ("updated_at", now),
    ];
    conn.hset_multiple::<_, _, _, ()>(&key, &fields).await?;
    Ok(())
}

/// Fetch the document stored under `id`, if any.
pub async fn get_strategic_data(pool: &RedisPool, id: i64) -> RedisResult<Option<StrategicDataRow>> {
    let mut conn = pool.clone();
    let key = record_key(id);
    let data: Option<String> = conn.hget(&key, "data").await?;
    let Some(data) = data else {
        return Ok(None);
    };

    let version: Option<u32> = conn.hget(&key, "schema_version").await?;
    // Records written before versioning carry no version field.
    let schema_version = version.unwrap_or(SCHEMA_VERSION);
    if schema_version > SCHEMA_VERSION {
        return Err(RedisError::SchemaVersion {
            found: schema_version,
            expected: SCHEMA_VERSION,
        });
    }

    let updated_at: Option<String> = conn.hget(&key, "updated_at").await?;
    Ok(Some(StrategicDataRow {
        id,
        data,
        schema_version,
        updated_at: updated_at.unwrap_or_default(),
    }))
}

/// Remove the record stored under `id`.
pub async fn delete_strategic_data(pool: &RedisPool, id: i64) -> RedisResult<bool> {
    let mut conn = pool.clone();
    let removed: i64 = conn.del(record_key(id)).await?;
    Ok(removed > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_key_is_stable() {
        assert_eq!(record_key(1), "strata:strategic_data:1");
        assert_eq!(record_key(42), "strata:strategic_data:42");
    }
}
