//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use galaxy_oracle::OpenAiConfig;
use galaxy_oracle::openai::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT};

use crate::error::AppError;

/// Everything the server needs at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// `None` keeps sessions in memory.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub oracle: OpenAiConfig,
    /// OTLP gRPC collector; `None` disables span export.
    pub otlp_endpoint: Option<String>,
}

impl Config {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`. Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let timeout_secs: Option<u64> = parse(&var, "ORACLE_TIMEOUT_SECS")?;

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_owned()),
            port: parse(&var, "PORT")?.unwrap_or(3000),
            database_url: var("DATABASE_URL"),
            database_max_connections: parse(&var, "DATABASE_MAX_CONNECTIONS")?.unwrap_or(10),
            oracle: OpenAiConfig {
                base_url: var("ORACLE_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
                api_key: var("ORACLE_API_KEY").or_else(|| var("OPENAI_API_KEY")),
                model: var("ORACLE_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_owned()),
                timeout: timeout_secs.map_or(DEFAULT_TIMEOUT, Duration::from_secs),
                temperature: parse(&var, "ORACLE_TEMPERATURE")?,
            },
            otlp_endpoint: var("OTEL_EXPORTER_OTLP_ENDPOINT"),
        })
    }

    /// The socket address to listen on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `HOST:PORT` is not a valid address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

fn parse<T>(var: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    var(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|e| AppError::Config(format!("{key} is invalid: {e}")))
        })
        .transpose()
}
