use dotenvy::dotenv;
use std::env;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} is not valid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// URL or file path of the catalog document.
    pub listings_source: String,
    pub bind_addr: SocketAddr,
    pub max_workers: usize,
    /// Tab shown to a new visitor.
    pub default_category: String,
    pub fetch_timeout: Duration,
    pub session_idle: chrono::Duration,
    /// Live visitor views kept at once; the least recently seen is evicted.
    pub max_sessions: usize,
    /// Prefix for reservation fee, down payment and TCP figures.
    pub currency_symbol: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listings_source: "data/listings.json".to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            max_workers: 8,
            default_category: "house-lot".to_string(),
            fetch_timeout: Duration::from_secs(30),
            session_idle: chrono::Duration::minutes(60),
            max_sessions: 10_000,
            currency_symbol: "₱".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        let _ = dotenv();
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            listings_source: lookup("LISTINGS_SOURCE").unwrap_or(defaults.listings_source),
            bind_addr: parse_or(&lookup, "BIND_ADDR", defaults.bind_addr)?,
            max_workers: parse_or(&lookup, "MAX_WORKERS", defaults.max_workers)?,
            default_category: lookup("DEFAULT_CATEGORY").unwrap_or(defaults.default_category),
            fetch_timeout: parse_or(&lookup, "FETCH_TIMEOUT_SECS", defaults.fetch_timeout.as_secs())
                .map(Duration::from_secs)?,
            session_idle: parse_or(&lookup, "SESSION_IDLE_MINUTES", defaults.session_idle.num_minutes())
                .map(chrono::Duration::minutes)?,
            max_sessions: parse_or(&lookup, "MAX_SESSIONS", defaults.max_sessions)?,
            currency_symbol: lookup("CURRENCY_SYMBOL").unwrap_or(defaults.currency_symbol),
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: format!("`{raw}`: {e}"),
        }),
    }
}
