//! Shared fixtures for unit tests

use std::sync::Arc;

use crate::adapters::Database;
use crate::config::{DatabaseSettings, Settings};
use crate::AppState;

/// Fresh, migrated in-memory SQLite database
///
/// The pool holds a single connection: every pooled connection to
/// `sqlite::memory:` would otherwise open its own empty database.
pub async fn memory_database() -> Database {
    let settings = DatabaseSettings {
        url: "sqlite::memory:".to_string(),
        echo: false,
        max_connections: 1,
    };
    let db = Database::connect(&settings).await.unwrap();
    db.migrate().await.unwrap();
    db
}

pub fn test_settings(api_key: Option<&str>) -> Settings {
    let mut settings = Settings::from_lookup(|key| match key {
        "DATABASE_URL" => Some("sqlite::memory:".to_string()),
        "DB_MAX_CONNECTIONS" => Some("1".to_string()),
        _ => None,
    })
    .unwrap();
    settings.api_key = api_key.map(str::to_string);
    settings
}

pub async fn test_state(api_key: Option<&str>) -> AppState {
    AppState {
        db: Arc::new(memory_database().await),
        settings: Arc::new(test_settings(api_key)),
    }
}
