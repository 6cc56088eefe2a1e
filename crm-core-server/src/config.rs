//! Server configuration
//!
//! Everything comes from environment variables (optionally seeded from a
//! `.env` file by the binary). [`ServerConfig::from_lookup`] takes the lookup
//! as a function so the parsing rules can be exercised without touching the
//! process environment.

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_JWT_EXPIRES_IN_SECS: i64 = 7 * 24 * 60 * 60;
pub const DEFAULT_MAX_FILE_SIZE_BYTES: usize = 10 * 1024 * 1024;
pub const DEFAULT_ALLOWED_MIME: &str = "image/*,application/pdf";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },

    #[error("Database configuration incomplete: set DATABASE_URL or all of DB_USER, DB_PASSWORD, DB_HOST, DB_PORT, DB_DATABASE (missing {0})")]
    IncompleteDatabase(&'static str),
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_expires_in_secs: i64,
    pub max_file_size_bytes: usize,
    /// MIME patterns; `type/*` matches every subtype
    pub allowed_mime: Vec<String>,
    pub storage_dir: PathBuf,
    pub public_base_url: String,
    pub db_max_connections: u32,
    pub db_connect_retries: u32,
    pub db_connect_retry_delay_ms: u64,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let database_url = match get("DATABASE_URL") {
            Some(url) => url,
            None => database_url_from_parts(&get)?,
        };

        let port = parse_or(&get, "PORT", DEFAULT_PORT)?;
        let jwt_secret = get("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let allowed_mime = get("ALLOWED_MIME")
            .unwrap_or_else(|| DEFAULT_ALLOWED_MIME.to_string())
            .split(',')
            .map(|pattern| pattern.trim().to_ascii_lowercase())
            .filter(|pattern| !pattern.is_empty())
            .collect();

        let public_base_url = get("PUBLIC_BASE_URL")
            .unwrap_or_else(|| format!("http://localhost:{port}/storage"))
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            database_url,
            host: "0.0.0.0".to_string(),
            port,
            jwt_secret,
            jwt_expires_in_secs: parse_or(&get, "JWT_EXPIRES_IN_SECS", DEFAULT_JWT_EXPIRES_IN_SECS)?,
            max_file_size_bytes: parse_or(&get, "MAX_FILE_SIZE_BYTES", DEFAULT_MAX_FILE_SIZE_BYTES)?,
            allowed_mime,
            storage_dir: PathBuf::from(get("STORAGE_DIR").unwrap_or_else(|| "./storage".to_string())),
            public_base_url,
            db_max_connections: parse_or(&get, "DB_MAX_CONNECTIONS", 10)?,
            db_connect_retries: parse_or(&get, "DB_CONNECT_RETRIES", 5)?,
            db_connect_retry_delay_ms: parse_or(&get, "DB_CONNECT_RETRY_DELAY_MS", 2000)?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn database_url_from_parts<G>(get: &G) -> Result<String, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    let part = |name: &'static str| get(name).ok_or(ConfigError::IncompleteDatabase(name));
    let user = part("DB_USER")?;
    let password = part("DB_PASSWORD")?;
    let host = part("DB_HOST")?;
    let port = part("DB_PORT")?;
    let database = part("DB_DATABASE")?;

    Ok(format!(
        "postgresql://{}:{}@{}:{}/{}",
        urlencoding::encode(&user),
        urlencoding::encode(&password),
        host,
        port,
        database
    ))
}

fn parse_or<G, T>(get: &G, name: &'static str, default: T) -> Result<T, ConfigError>
where
    G: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match get(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}
