use std::str::FromStr;

/// Errors raised while reading [`ServerConfig`] from the environment.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be set")]
    Missing { var: &'static str },

    #[error("{var} has an invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Which [`NoteRepository`](notekeeper_core::repository::NoteRepository)
/// implementation backs the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

impl FromStr for StoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown store '{other}', expected 'postgres' or 'memory'")),
        }
    }
}

impl StoreKind {
    /// Lowercase name, as accepted by `NOTES_STORE`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Memory => "memory",
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development against the Vite
/// dev server. In production, set `CORS_ORIGINS` to the real frontend origin.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Note store backend (default: `postgres`).
    pub store: StoreKind,
    /// PostgreSQL connection string; required when `store` is `Postgres`.
    pub database_url: Option<String>,
    /// Pool size (default: `10`).
    pub database_max_connections: u32,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                 |
    /// |----------------------------|-------------------------|
    /// | `HOST`                     | `0.0.0.0`               |
    /// | `PORT`                     | `8080`                  |
    /// | `CORS_ORIGINS`             | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                    |
    /// | `NOTES_STORE`              | `postgres`              |
    /// | `DATABASE_URL`             | (none)                  |
    /// | `DATABASE_MAX_CONNECTIONS` | `10`                    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or(&lookup, "PORT", 8080u16)?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30u64)?;
        let store = parse_or(&lookup, "NOTES_STORE", StoreKind::Postgres)?;

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        if store == StoreKind::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing {
                var: "DATABASE_URL",
            });
        }

        let database_max_connections = parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10u32)?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            store,
            database_url,
            database_max_connections,
        })
    }
}

fn parse_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
            value,
        }),
    }
}
