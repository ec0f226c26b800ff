/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var | Default   |
    /// |---------|-----------|
    /// | `HOST`  | `0.0.0.0` |
    /// | `PORT`  | `3000`    |
    ///
    /// An unparsable `PORT` falls back to the default with a warning.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = parse_port(std::env::var("PORT").ok().as_deref());
        Self { host, port }
    }
}

fn parse_port(raw: Option<&str>) -> u16 {
    match raw {
        None => 3000,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(port = raw, "PORT is not a valid u16, using 3000");
            3000
        }),
    }
}
