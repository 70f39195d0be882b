use std::{env, net::SocketAddr, str::FromStr, time::Duration};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Process configuration, built once at startup and handed to the components that need it
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    /// Upper bound for each store call made while registering
    pub timeout: Duration,
    pub sql_logging: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // .env is optional
        let _ = dotenvy::dotenv();

        Ok(Config {
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
        })
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_var("PORT", 8080)?,
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                name: "HOST",
                reason: e.to_string(),
            })
    }
}

impl DatabaseConfig {
    const DEFAULT_URL: &'static str = "sqlite://forum.db?mode=rwc";

    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("DATABASE_URL").unwrap_or_else(|_| Self::DEFAULT_URL.to_string()),
            max_connections: parse_var("DB_MAX_CONNECTIONS", 10)?,
            timeout: Duration::from_secs(parse_var("STORE_TIMEOUT_SECS", 5)?),
            sql_logging: parse_var("SQL_LOGGING", false)?,
        })
    }
}

fn parse_var<T>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => parse_value(name, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(name: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
        name,
        reason: format!("{raw:?}: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_values() {
        assert_eq!(parse_value::<u16>("PORT", "3000").unwrap(), 3000);
        assert_eq!(parse_value::<u64>("STORE_TIMEOUT_SECS", " 7 ").unwrap(), 7);
        assert!(parse_value::<bool>("SQL_LOGGING", "true").unwrap());
    }

    #[test]
    fn rejects_garbage_values() {
        let err = parse_value::<u16>("PORT", "eighty").unwrap_err();
        assert!(err.to_string().starts_with("Invalid PORT"));
        assert!(parse_value::<u16>("PORT", "70000").is_err());
    }

    #[test]
    fn builds_socket_addr() {
        let server = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
        };
        assert_eq!(server.socket_addr().unwrap().port(), 8080);

        let server = ServerConfig {
            host: "not a host".to_string(),
            port: 8080,
        };
        assert!(server.socket_addr().is_err());
    }
}
