//! Application configuration.
//!
//! Database location resolves config.toml > environment > default, the way
//! a deploy overrides a local checkout. Bot API settings come from the
//! environment only (the token is a secret and never lands in a file).

use serde::Deserialize;
use std::path::PathBuf;

// ==================== Database Configuration ====================

/// Configuration file structure for config.toml
#[derive(Debug, Deserialize)]
struct AppConfig {
    database: Option<DatabaseConfig>,
}

#[derive(Debug, Deserialize)]
struct DatabaseConfig {
    path: Option<String>,
}

/// Load database path with priority: config.toml > .env > default
pub fn load_database_path() -> PathBuf {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Priority 1: config.toml
    if let Ok(contents) = std::fs::read_to_string("config.toml") {
        if let Ok(config) = toml::from_str::<AppConfig>(&contents) {
            if let Some(db) = config.database {
                if let Some(path) = db.path {
                    tracing::info!("Using database from config.toml: {}", path);
                    return PathBuf::from(path);
                }
            }
        }
    }

    // Priority 2: .env DATABASE_PATH
    if let Ok(path) = std::env::var("DATABASE_PATH") {
        tracing::info!("Using database from DATABASE_PATH env: {}", path);
        return PathBuf::from(path);
    }

    // Default
    let default = PathBuf::from("data/courses.db");
    tracing::info!("Using default database path: {}", default.display());
    default
}

// ==================== Server Configuration ====================

/// Server address to bind to
pub const SERVER_ADDR: &str = "0.0.0.0";

/// Default server port, overridable via PORT
pub const SERVER_PORT: u16 = 4444;

/// Get the full server bind address
pub fn server_bind_addr() -> String {
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(SERVER_PORT);
    format!("{}:{}", SERVER_ADDR, port)
}

// ==================== Bot API Configuration ====================

/// Default messaging bot API base URL
pub const DEFAULT_BOT_API_BASE: &str = "https://api.telegram.org";

/// Reminder text sent when a user's paid access has lapsed
pub const PAYMENT_REMINDER_TEXT: &str =
    "Your course access has expired. Renew your subscription to keep learning!";

/// Bot API base URL, overridable for tests and staging
pub fn bot_api_base() -> String {
    std::env::var("BOT_API_BASE").unwrap_or_else(|_| DEFAULT_BOT_API_BASE.to_string())
}

/// Bot token. None disables outbound reminders entirely.
pub fn bot_token() -> Option<String> {
    std::env::var("BOT_TOKEN").ok().filter(|t| !t.is_empty())
}
