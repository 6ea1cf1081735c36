// src/config.rs

use std::env;
use std::str::FromStr;

use dotenvy::dotenv;

/// Where the fan wall document is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Sqlite,
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub storage: StorageBackend,
    pub gemini_api_key: Option<String>,
    pub gemini_text_model: String,
    pub gemini_image_model: String,
    pub ai_timeout_secs: u64,
    pub public_url: String,
    pub static_dir: String,
    pub quiz_advance_delay_ms: u64,
    pub max_quiz_sessions: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://fanportal.db?mode=rwc".to_string(),
            storage: StorageBackend::Sqlite,
            gemini_api_key: None,
            gemini_text_model: "gemini-3-flash-preview".to_string(),
            gemini_image_model: "gemini-2.5-flash-image".to_string(),
            ai_timeout_secs: 30,
            public_url: "http://localhost:3000".to_string(),
            static_dir: "static".to_string(),
            quiz_advance_delay_ms: 1000,
            max_quiz_sessions: 1024,
            port: 3000,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let defaults = Self::default();

        let storage = match env::var("STORAGE").as_deref() {
            Ok("memory") => StorageBackend::Memory,
            Ok("sqlite") | Err(_) => StorageBackend::Sqlite,
            Ok(other) => {
                eprintln!("Unknown STORAGE '{}', using sqlite", other);
                StorageBackend::Sqlite
            }
        };

        let gemini_api_key = env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("API_KEY"))
            .ok()
            .filter(|key| !key.trim().is_empty());

        Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            storage,
            gemini_api_key,
            gemini_text_model: env::var("GEMINI_TEXT_MODEL").unwrap_or(defaults.gemini_text_model),
            gemini_image_model: env::var("GEMINI_IMAGE_MODEL")
                .unwrap_or(defaults.gemini_image_model),
            ai_timeout_secs: parse_var("AI_TIMEOUT_SECS", defaults.ai_timeout_secs),
            public_url: env::var("PUBLIC_URL").unwrap_or(defaults.public_url),
            static_dir: env::var("STATIC_DIR").unwrap_or(defaults.static_dir),
            quiz_advance_delay_ms: parse_var("QUIZ_ADVANCE_DELAY_MS", defaults.quiz_advance_delay_ms),
            max_quiz_sessions: parse_var("MAX_QUIZ_SESSIONS", defaults.max_quiz_sessions),
            port: parse_var("PORT", defaults.port),
            rust_log: env::var("RUST_LOG").unwrap_or(defaults.rust_log),
        }
    }
}

/// Reads and parses a variable, keeping `default` when unset or invalid.
fn parse_var<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            eprintln!("Invalid value for {}: '{}', using default", name, raw);
            default
        }),
        Err(_) => default,
    }
}
