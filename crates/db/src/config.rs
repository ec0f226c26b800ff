/// Default pool size when `DB_MAX_CONNECTIONS` is unset or invalid.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 20;

/// Database configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub database_url: String,
    pub max_connections: u32,
}

impl DbConfig {
    /// Load configuration from the environment.
    ///
    /// | Env Var              | Default  |
    /// |----------------------|----------|
    /// | `DATABASE_URL`       | (none)   |
    /// | `DB_MAX_CONNECTIONS` | `20`     |
    ///
    /// Returns `None` when `DATABASE_URL` is not set.
    pub fn from_env() -> Option<Self> {
        let database_url = std::env::var("DATABASE_URL").ok()?;
        let max_connections = std::env::var("DB_MAX_CONNECTIONS").ok();
        Some(Self::from_parts(database_url, max_connections.as_deref()))
    }

    fn from_parts(database_url: String, max_connections: Option<&str>) -> Self {
        let max_connections = max_connections
            .and_then(|raw| raw.trim().parse().ok())
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);
        Self {
            database_url,
            max_connections,
        }
    }
}
