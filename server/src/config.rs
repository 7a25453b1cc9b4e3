//! Environment-driven configuration.
//!
//! The reference behavior hard-coded the API host and the database file;
//! here they are defaults that `OCTOLENS_*` variables override. A `.env`
//! file is honored when present (loaded by the binary before this runs).

use std::env;
use std::path::PathBuf;

const DEFAULT_BIND: &str = "127.0.0.1:8080";
const DEFAULT_API_BASE: &str = "https://api.github.com";
const DEFAULT_DB_PATH: &str = "search_history.db";

/// Runtime settings for the server binary.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP server binds to (`OCTOLENS_BIND`).
    pub bind_addr: String,
    /// Base URL of the GitHub REST API (`OCTOLENS_API_BASE`).
    pub api_base_url: String,
    /// Location of the SQLite history file (`OCTOLENS_DB`).
    pub db_path: PathBuf,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: env_or("OCTOLENS_BIND", DEFAULT_BIND),
            api_base_url: env_or("OCTOLENS_API_BASE", DEFAULT_API_BASE),
            db_path: PathBuf::from(env_or("OCTOLENS_DB", DEFAULT_DB_PATH)),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}
