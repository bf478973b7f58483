use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use shared::constants::DEFAULT_SOURCE;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_TABLE: &str = "emails";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_STATIC_DIR: &str = "../frontend/dist";

/// Where accepted submissions end up. Chosen once at deploy time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Write to the server log only.
    Log,
    /// In-process map, lost on restart.
    Memory,
    Postgres,
    /// Forward to a spreadsheet web-app webhook.
    Sheets,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "log" => Ok(Self::Log),
            "memory" => Ok(Self::Memory),
            "postgres" | "database" => Ok(Self::Postgres),
            "sheets" => Ok(Self::Sheets),
            other => Err(ConfigError::Invalid("STORAGE_BACKEND", other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" | "local" => Self::Development,
            _ => Self::Production,
        }
    }

    pub fn exposes_error_details(self) -> bool {
        self == Self::Development
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Invalid(&'static str, String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(key, value) => write!(f, "Invalid value for {}: {:?}", key, value),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub backend: StorageBackend,
    pub database_url: Option<String>,
    pub submissions_table: String,
    pub db_max_connections: u32,
    pub sheets_url: Option<String>,
    pub environment: Environment,
    pub static_dir: PathBuf,
    pub source: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values behave like unset ones
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_raw = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::Invalid("BIND_ADDR", bind_raw.clone()))?;

        let backend = match get("STORAGE_BACKEND") {
            Some(value) => value.parse()?,
            None => StorageBackend::Log,
        };

        let submissions_table = get("SUBMISSIONS_TABLE").unwrap_or_else(|| DEFAULT_TABLE.to_string());
        if !is_plain_identifier(&submissions_table) {
            return Err(ConfigError::Invalid("SUBMISSIONS_TABLE", submissions_table));
        }

        let db_max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(value) => value
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid("DB_MAX_CONNECTIONS", value))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let environment = get("APP_ENV")
            .or_else(|| get("NODE_ENV"))
            .map(|v| Environment::parse(&v))
            .unwrap_or(Environment::Production);

        Ok(Self {
            bind_addr,
            backend,
            database_url: get("DATABASE_URL"),
            submissions_table,
            db_max_connections,
            sheets_url: get("GOOGLE_SHEETS_URL"),
            environment,
            static_dir: get("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
            source: get("SUBMISSION_SOURCE").unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
        })
    }
}

// Table names end up inside SQL text, so only bare identifiers are accepted
fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    name.len() <= 63 && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.backend, StorageBackend::Log);
        assert_eq!(config.submissions_table, "emails");
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.source, "spin-wheel-promotion");
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_node_env_fallback_and_precedence() {
        let dev = config_from(&[("NODE_ENV", "development")]).unwrap();
        assert!(dev.environment.exposes_error_details());

        let prod = config_from(&[("APP_ENV", "production"), ("NODE_ENV", "development")]).unwrap();
        assert!(!prod.environment.exposes_error_details());
    }

    #[test]
    fn test_backend_selection() {
        let config = config_from(&[("STORAGE_BACKEND", "Postgres"), ("DATABASE_URL", "postgres://x")]).unwrap();
        assert_eq!(config.backend, StorageBackend::Postgres);
        assert_eq!(config.database_url.as_deref(), Some("postgres://x"));

        assert!(config_from(&[("STORAGE_BACKEND", "mongodb")]).is_err());
    }

    #[test]
    fn test_rejects_unsafe_table_names() {
        assert!(config_from(&[("SUBMISSIONS_TABLE", "promo_emails")]).is_ok());
        assert!(config_from(&[("SUBMISSIONS_TABLE", "emails; drop table x")]).is_err());
        assert!(config_from(&[("SUBMISSIONS_TABLE", "1emails")]).is_err());
    }

    #[test]
    fn test_rejects_bad_numbers_and_addresses() {
        assert!(config_from(&[("DB_MAX_CONNECTIONS", "0")]).is_err());
        assert!(config_from(&[("BIND_ADDR", "localhost")]).is_err());
    }
}
