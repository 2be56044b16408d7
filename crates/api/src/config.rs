/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3001`).
    pub port: u16,
    /// Database URL (default: a SQLite file in the working directory).
    pub database_url: String,
    /// Root directory for uploaded assets (default: `uploads`).
    pub upload_dir: String,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Rate limit: requests allowed per window (default: `100`).
    pub rate_limit_max: u32,
    /// Rate limit: window length in seconds (default: `900`).
    pub rate_limit_window_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                             |
    /// |--------------------------|-------------------------------------|
    /// | `HOST`                   | `0.0.0.0`                           |
    /// | `PORT`                   | `3001`                              |
    /// | `DATABASE_URL`           | `sqlite://toyshop.db?mode=rwc`      |
    /// | `UPLOAD_DIR`             | `uploads`                           |
    /// | `CORS_ORIGINS`           | `http://localhost:5173,http://127.0.0.1:5173` |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                                |
    /// | `RATE_LIMIT_MAX`         | `100`                               |
    /// | `RATE_LIMIT_WINDOW_SECS` | `900`                               |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3001".into())
            .parse()
            .expect("PORT must be a valid u16");

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://toyshop.db?mode=rwc".into());

        let upload_dir = std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".into());

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173,http://127.0.0.1:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let rate_limit_max: u32 = std::env::var("RATE_LIMIT_MAX")
            .unwrap_or_else(|_| "100".into())
            .parse()
            .expect("RATE_LIMIT_MAX must be a valid u32");

        let rate_limit_window_secs: u64 = std::env::var("RATE_LIMIT_WINDOW_SECS")
            .unwrap_or_else(|_| "900".into())
            .parse()
            .expect("RATE_LIMIT_WINDOW_SECS must be a valid u64");

        Self {
            host,
            port,
            database_url,
            upload_dir,
            cors_origins,
            request_timeout_secs,
            rate_limit_max,
            rate_limit_window_secs,
        }
    }
}
