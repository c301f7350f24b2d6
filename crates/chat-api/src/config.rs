//! Configuration loaded from environment variables.

use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

/// Runtime environment selecting which `.env.<name>` file is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnv {
    Dev,
    Prod,
}

impl RuntimeEnv {
    /// Parse an `APP_ENV` value. `test` runs with the dev settings.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value {
            "dev" | "test" => Ok(RuntimeEnv::Dev),
            "prod" => Ok(RuntimeEnv::Prod),
            other => Err(ConfigError::InvalidRuntimeEnv(other.to_string())),
        }
    }

    /// Read `APP_ENV`, defaulting to `dev`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::parse(&env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string()))
    }

    /// Name of the env file for this environment.
    pub fn env_file(&self) -> String {
        format!(".env.{self}")
    }
}

impl fmt::Display for RuntimeEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeEnv::Dev => f.write_str("dev"),
            RuntimeEnv::Prod => f.write_str("prod"),
        }
    }
}

/// Load `.env.<env>` and then `.env`. Variables already set win; missing
/// files are skipped.
pub fn load_env_files(runtime_env: RuntimeEnv) {
    let _ = dotenvy::from_filename(runtime_env.env_file());
    let _ = dotenvy::dotenv();
}

/// Chat API server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Runtime environment.
    pub runtime_env: RuntimeEnv,
    /// Server bind address.
    pub addr: SocketAddr,
    /// Shared secret expected in the `x-api-key` header.
    pub api_secret_key: String,
    /// SQLite database URL; the in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Bound on each storage call.
    pub store_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `APP_ENV` | `dev`, `test` or `prod` | `dev` |
    /// | `HOST` | Bind host | `0.0.0.0` |
    /// | `PORT` | Bind port | `5001` |
    /// | `API_SECRET_KEY` | Shared API secret | (required) |
    /// | `DATABASE_URL` | SQLite URL, e.g. `sqlite:chat.db?mode=rwc` | (in-memory) |
    /// | `STORE_TIMEOUT_MS` | Storage call timeout | `5000` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let runtime_env = RuntimeEnv::parse(&lookup("APP_ENV").unwrap_or_else(|| "dev".to_string()))?;

        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("PORT").unwrap_or_else(|| "5001".to_string());
        let addr = format!("{host}:{port}")
            .parse()
            .map_err(|_| ConfigError::InvalidAddr(format!("{host}:{port}")))?;

        let api_secret_key = lookup("API_SECRET_KEY")
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiSecretKey)?;

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let store_timeout = match lookup("STORE_TIMEOUT_MS") {
            Some(value) => value
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis)
                .ok_or(ConfigError::InvalidStoreTimeout(value))?,
            None => message_log::DEFAULT_STORE_TIMEOUT,
        };

        Ok(Self {
            runtime_env,
            addr,
            api_secret_key,
            database_url,
            store_timeout,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("APP_ENV must be one of dev, test or prod (got '{0}')")]
    InvalidRuntimeEnv(String),

    #[error("Invalid bind address: {0}")]
    InvalidAddr(String),

    #[error("API_SECRET_KEY environment variable is required")]
    MissingApiSecretKey,

    #[error("STORE_TIMEOUT_MS must be a positive integer (got '{0}')")]
    InvalidStoreTimeout(String),
}
