//! Persistent settings backed by SQLite.
//!
//! Only non-secret settings live here. The API token is held in memory for
//! the lifetime of a [`Session`](crate::session::Session) and never stored.

use anyhow::{Context, Result, bail};
use rusqlite::Connection;
use std::sync::Mutex;
use tracing::warn;

use crate::consts::DEFAULT_BASE_URL;
use crate::review::ProductType;

pub const BASE_URL_KEY: &str = "base_url";
pub const PRODUCT_TYPE_KEY: &str = "product_type";

/// Keys `set` accepts.
pub const KNOWN_KEYS: &[&str] = &[BASE_URL_KEY, PRODUCT_TYPE_KEY];

pub struct Config {
    conn: Mutex<Connection>,
}

impl Config {
    /// Open or create the config table in the given database.
    /// Use `":memory:"` for tests.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path).context("failed to open config database")?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS config (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
        )
        .context("failed to create config table")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT value FROM config WHERE key = ?1")?;
        let mut rows = stmt.query([key])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    /// Validate and upsert a setting. Product types are stored by slug.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        let value = match key {
            BASE_URL_KEY => {
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    bail!("base_url must start with http:// or https://");
                }
                value.trim_end_matches('/').to_string()
            }
            PRODUCT_TYPE_KEY => value.parse::<ProductType>()?.slug().to_string(),
            other => bail!(
                "unknown config key: {other} (known: {})",
                KNOWN_KEYS.join(", ")
            ),
        };

        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO config (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [key, value.as_str()],
        )?;
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM config WHERE key = ?1", [key])?;
        Ok(())
    }

    /// All stored settings, sorted by key.
    pub fn entries(&self) -> Result<Vec<(String, String)>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT key, value FROM config ORDER BY key")?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
        let entries = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(entries)
    }

    /// Base URL: explicit override, then stored value, then the default.
    pub fn base_url(&self, override_url: Option<&str>) -> Result<String> {
        if let Some(url) = override_url.map(str::trim).filter(|u| !u.is_empty()) {
            return Ok(url.to_string());
        }
        Ok(self
            .get(BASE_URL_KEY)?
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()))
    }

    /// The stored default product type, if any. A value that no longer
    /// parses is logged and treated as unset so it can still be fixed.
    pub fn default_product_type(&self) -> Result<Option<ProductType>> {
        let Some(raw) = self.get(PRODUCT_TYPE_KEY)? else {
            return Ok(None);
        };
        match raw.parse() {
            Ok(product_type) => Ok(Some(product_type)),
            Err(e) => {
                warn!(value = %raw, error = %e, "ignoring stored product_type");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mem_config() -> Config {
        Config::open(":memory:").unwrap()
    }

    #[test]
    fn get_returns_none_for_missing_key() {
        let config = mem_config();
        assert!(config.get(BASE_URL_KEY).unwrap().is_none());
    }

    #[test]
    fn base_url_defaults() {
        let config = mem_config();
        assert_eq!(config.base_url(None).unwrap(), DEFAULT_BASE_URL);
    }

    #[test]
    fn base_url_precedence() {
        let config = mem_config();
        config.set(BASE_URL_KEY, "http://localhost:9000/").unwrap();
        assert_eq!(config.base_url(None).unwrap(), "http://localhost:9000");
        assert_eq!(
            config.base_url(Some("https://override.test")).unwrap(),
            "https://override.test"
        );
        assert_eq!(config.base_url(Some("  ")).unwrap(), "http://localhost:9000");
    }

    #[test]
    fn rejects_non_http_base_url() {
        let config = mem_config();
        assert!(config.set(BASE_URL_KEY, "ftp://example").is_err());
        assert!(config.get(BASE_URL_KEY).unwrap().is_none());
    }

    #[test]
    fn product_type_stored_as_slug() {
        let config = mem_config();
        config.set(PRODUCT_TYPE_KEY, "保健食品").unwrap();
        assert_eq!(config.get(PRODUCT_TYPE_KEY).unwrap().unwrap(), "health-food");
        assert_eq!(
            config.default_product_type().unwrap(),
            Some(ProductType::HealthFood)
        );
    }

    #[test]
    fn bad_stored_product_type_is_ignored_and_removable() {
        let config = mem_config();
        config
            .conn
            .lock()
            .unwrap()
            .execute(
                "INSERT INTO config (key, value) VALUES (?1, ?2)",
                [PRODUCT_TYPE_KEY, "cosmetics"],
            )
            .unwrap();

        assert_eq!(config.default_product_type().unwrap(), None);
        config.remove(PRODUCT_TYPE_KEY).unwrap();
        assert!(config.get(PRODUCT_TYPE_KEY).unwrap().is_none());
        config.set(PRODUCT_TYPE_KEY, "alcohol").unwrap();
        assert_eq!(
            config.default_product_type().unwrap(),
            Some(ProductType::Alcohol)
        );
    }

    #[test]
    fn rejects_unknown_product_type() {
        let config = mem_config();
        let err = config.set(PRODUCT_TYPE_KEY, "cosmetics").unwrap_err();
        assert!(err.to_string().contains("invalid product type"));
    }

    #[test]
    fn rejects_unknown_key() {
        let config = mem_config();
        let err = config.set("token", "tok1").unwrap_err();
        assert!(err.to_string().contains("unknown config key"));
        assert!(config.entries().unwrap().is_empty());
    }

    #[test]
    fn set_overwrites_existing() {
        let config = mem_config();
        config.set(PRODUCT_TYPE_KEY, "alcohol").unwrap();
        config.set(PRODUCT_TYPE_KEY, "ordinary-food").unwrap();
        assert_eq!(
            config.get(PRODUCT_TYPE_KEY).unwrap().unwrap(),
            "ordinary-food"
        );
    }

    #[test]
    fn remove_deletes_key() {
        let config = mem_config();
        config.set(PRODUCT_TYPE_KEY, "alcohol").unwrap();
        config.remove(PRODUCT_TYPE_KEY).unwrap();
        assert!(config.default_product_type().unwrap().is_none());
        config.remove(PRODUCT_TYPE_KEY).unwrap();
    }

    #[test]
    fn entries_are_sorted() {
        let config = mem_config();
        config.set(PRODUCT_TYPE_KEY, "alcohol").unwrap();
        config.set(BASE_URL_KEY, "https://a.test").unwrap();
        let entries = config.entries().unwrap();
        assert_eq!(
            entries,
            vec![
                ("base_url".to_string(), "https://a.test".to_string()),
                ("product_type".to_string(), "alcohol".to_string()),
            ]
        );
    }

    #[test]
    fn persists_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config-test.db");
        let path_str = path.to_str().unwrap();

        {
            let config = Config::open(path_str).unwrap();
            config.set(BASE_URL_KEY, "https://persisted.test").unwrap();
        }

        {
            let config = Config::open(path_str).unwrap();
            assert_eq!(config.base_url(None).unwrap(), "https://persisted.test");
        }
    }
}
