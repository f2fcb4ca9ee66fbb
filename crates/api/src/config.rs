//! Environment-driven configuration.

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
        }
    }
}

/// Which repository implementation backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Durable PostgreSQL storage (requires `DATABASE_URL`).
    Postgres,
    /// Volatile in-memory storage; records do not survive a restart.
    Memory,
}

impl StorageBackend {
    /// Parse a backend name; `None` for anything unknown.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "postgres" => Some(Self::Postgres),
            "memory" => Some(Self::Memory),
            _ => None,
        }
    }

    /// Read `STORAGE_BACKEND` (default: `postgres`).
    pub fn from_env() -> Self {
        let name = std::env::var("STORAGE_BACKEND").unwrap_or_else(|_| "postgres".into());
        Self::parse(&name)
            .unwrap_or_else(|| panic!("STORAGE_BACKEND must be 'postgres' or 'memory', got '{name}'"))
    }
}

/// Outbound event delivery configuration.
#[derive(Debug, Clone, Default)]
pub struct EventConfig {
    /// Endpoint for `vehicle.created` envelopes. Absent means delivery is
    /// disabled and the no-op publisher is assembled instead.
    pub webhook_url: Option<String>,
}

impl EventConfig {
    /// Read `EVENT_WEBHOOK_URL` (optional).
    pub fn from_env() -> Self {
        Self {
            webhook_url: std::env::var("EVENT_WEBHOOK_URL")
                .ok()
                .filter(|s| !s.trim().is_empty()),
        }
    }
}
