//! Key-value queries.

use crate::pool::{DbError, DbPool, DbResult};
use rusqlite::{params, OptionalExtension};

/// Key-value row from database.
#[derive(Debug, Clone)]
pub struct KvRow {
    pub key: String,
    pub value: String,
    pub updated_at: String,
}

/// Get the value stored under `key`.
pub fn get_value(pool: &DbPool, key: &str) -> DbResult<Option<String>> {
    pool.with_conn(|conn| {
        conn.query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
            row.get(0)
        })
        .optional()
        .map_err(DbError::from)
    })
}

/// Insert or replace the value stored under `key`.
pub fn set_value(pool: &DbPool, key: &str, value: &str) -> DbResult<()> {
    pool.with_conn(|conn| {
        conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value],
        )?;
        Ok(())
    })
}

/// Write several entries in one transaction.
pub fn set_values(pool: &DbPool, entries: &[(&str, String)]) -> DbResult<()> {
    pool.with_conn_mut(|conn| {
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            )?;
            for (key, value) in entries {
                stmt.execute(params![key, value])?;
            }
        }
        tx.commit()?;
        Ok(())
    })
}

/// Delete `key`. Returns whether a row was removed.
pub fn delete_value(pool: &DbPool, key: &str) -> DbResult<bool> {
    pool.with_conn(|conn| {
        let affected = conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(affected > 0)
    })
}

/// List all entries ordered by key.
pub fn list_values(pool: &DbPool) -> DbResult<Vec<KvRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare("SELECT key, value, updated_at FROM kv ORDER BY key")?;

        let rows = stmt.query_map([], |row| {
            Ok(KvRow {
                key: row.get(0)?,
                value: row.get(1)?,
                updated_at: row.get(2)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init_memory_pool;

    #[test]
    fn test_missing_key_is_none() {
        let pool = init_memory_pool().unwrap();
        assert_eq!(get_value(&pool, "ifeFactors").unwrap(), None);
    }

    #[test]
    fn test_set_then_overwrite() {
        let pool = init_memory_pool().unwrap();
        set_value(&pool, "strengths", "[]").unwrap();
        set_value(&pool, "strengths", "[{\"id\":\"a\",\"description\":\"x\"}]").unwrap();

        let value = get_value(&pool, "strengths").unwrap().unwrap();
        assert!(value.contains("\"a\""));
        assert_eq!(list_values(&pool).unwrap().len(), 1);
    }

    #[test]
    fn test_set_values_writes_every_key() {
        let pool = init_memory_pool().unwrap();
        set_values(
            &pool,
            &[("threats", "[]".to_string()), ("ksfItems", "[]".to_string())],
        )
        .unwrap();

        let keys: Vec<String> = list_values(&pool).unwrap().into_iter().map(|r| r.key).collect();
        assert_eq!(keys, vec!["ksfItems".to_string(), "threats".to_string()]);
    }

    #[test]
    fn test_delete_value() {
        let pool = init_memory_pool().unwrap();
        set_value(&pool, "activeFile", "/tmp/a.json").unwrap();
        assert!(delete_value(&pool, "activeFile").unwrap());
        assert!(!delete_value(&pool, "activeFile").unwrap());
    }

    #[test]
    fn test_file_backed_pool_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".strata/strata.db");

        let pool = crate::init_pool(&path).unwrap();
        set_value(&pool, "opportunities", "[]").unwrap();
        drop(pool);

        let reopened = crate::init_pool(&path).unwrap();
        assert_eq!(get_value(&reopened, "opportunities").unwrap().as_deref(), Some("[]"));
    }
}
