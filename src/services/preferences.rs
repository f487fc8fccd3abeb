use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use rusqlite::Connection;

use crate::db::queries;

/// Durable client-local key-value storage.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
}

pub struct SqlitePreferences {
    db: Arc<Mutex<Connection>>,
}

impl SqlitePreferences {
    pub fn new(db: Arc<Mutex<Connection>>) -> Self {
        Self { db }
    }
}

impl PreferenceStore for SqlitePreferences {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let db = self.db.lock().unwrap_or_else(PoisonError::into_inner);
        queries::get_preference(&db, key)
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let db = self.db.lock().unwrap_or_else(PoisonError::into_inner);
        queries::set_preference(&db, key, value)
    }
}

/// Non-durable store for tests and for running without a preferences file.
#[derive(Default)]
pub struct MemoryPreferences {
    values: Mutex<HashMap<String, String>>,
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    #[test]
    fn test_sqlite_preferences_survive_new_handle() {
        let conn = Arc::new(Mutex::new(db::init_db(":memory:").unwrap()));
        SqlitePreferences::new(Arc::clone(&conn))
            .set("currency", "EUR")
            .unwrap();

        let reopened = SqlitePreferences::new(conn);
        assert_eq!(reopened.get("currency").unwrap().as_deref(), Some("EUR"));
    }

    #[test]
    fn test_memory_preferences() {
        let prefs = MemoryPreferences::default();
        assert!(prefs.get("currency").unwrap().is_none());
        prefs.set("currency", "USD").unwrap();
        assert_eq!(prefs.get("currency").unwrap().as_deref(), Some("USD"));
    }
}
