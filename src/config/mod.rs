//! Configuration module for the Converta backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pre-shared key gating the admin surface (required in production)
    pub admin_psk: Option<String>,
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Directory uploaded images are stored in and served from
    pub upload_dir: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// API key for the generative-text collaborator
    pub genai_api_key: Option<String>,
    /// Base URL of the generative-text collaborator
    pub genai_base_url: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let admin_psk = env::var("CONVERTA_ADMIN_PSK").ok();

        let db_path = env::var("CONVERTA_DB_PATH")
            .unwrap_or_else(|_| "./data/app.sqlite".to_string())
            .into();

        let upload_dir = env::var("CONVERTA_UPLOAD_DIR")
            .unwrap_or_else(|_| "./data/uploads".to_string())
            .into();

        let bind_addr = env::var("CONVERTA_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid CONVERTA_BIND_ADDR format");

        let genai_api_key = env::var("CONVERTA_GENAI_API_KEY").ok();

        let genai_base_url = env::var("CONVERTA_GENAI_BASE_URL").unwrap_or_else(|_| {
            "https://generativelanguage.googleapis.com/v1beta".to_string()
        });

        let log_level = env::var("CONVERTA_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            admin_psk,
            db_path,
            upload_dir,
            bind_addr,
            genai_api_key,
            genai_base_url,
            log_level,
        }
    }
}
