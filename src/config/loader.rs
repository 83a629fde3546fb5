//! Load server config from the process environment (after an optional `.env`).

use crate::config::types::*;
use crate::error::StartupError;
use std::str::FromStr;

impl ServerConfig {
    /// Read `DATABASE_URL`, `BIND_ADDR`, `DATABASE_MAX_CONNECTIONS` and `BODY_LIMIT_BYTES`.
    /// Unset variables fall back to defaults; unparseable ones are errors.
    pub fn from_env() -> Result<Self, StartupError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!(error = %e, "ignoring unreadable .env file");
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from any key lookup. Used by `from_env` and tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, StartupError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        let bind_addr = parse_or(&lookup, "BIND_ADDR", DEFAULT_BIND_ADDR)?;
        let max_connections = parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", &DEFAULT_MAX_CONNECTIONS.to_string())?;
        let body_limit_bytes = parse_or(&lookup, "BODY_LIMIT_BYTES", &DEFAULT_BODY_LIMIT_BYTES.to_string())?;
        Ok(ServerConfig {
            database_url,
            bind_addr,
            max_connections,
            body_limit_bytes,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: &str) -> Result<T, StartupError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = lookup(key).unwrap_or_else(|| default.to_string());
    raw.trim()
        .parse()
        .map_err(|e| StartupError::Config(format!("{} '{}': {}", key, raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_addr.port(), 5555);
    }

    #[test]
    fn reads_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("BIND_ADDR", "0.0.0.0:8080"),
            ("DATABASE_MAX_CONNECTIONS", "10"),
            ("BODY_LIMIT_BYTES", "1024"),
        ]))
        .unwrap();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:8080");
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.body_limit_bytes, 1024);
    }

    #[test]
    fn rejects_unparseable_values() {
        let err = ServerConfig::from_lookup(lookup(&[("BIND_ADDR", "not-an-address")])).unwrap_err();
        assert!(matches!(err, StartupError::Config(m) if m.starts_with("BIND_ADDR")));
        assert!(ServerConfig::from_lookup(lookup(&[("DATABASE_MAX_CONNECTIONS", "many")])).is_err());
    }
}
