use std::path::PathBuf;
use std::time::Duration;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Whether generation runs against the mock backend (default: `true`).
    pub mock_mode: bool,
    /// Pause between simulated pipeline steps, in milliseconds (default: `800`).
    pub step_delay_ms: u64,
    /// How long finished job records stay readable before eviction (default: `3600`).
    pub job_ttl_secs: u64,
    /// Directory served under `/mock` for the canned result assets.
    pub mock_assets_dir: PathBuf,
    /// Path to the prompt template JSON file.
    pub prompts_path: PathBuf,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `8000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `MOCK_MODE`            | `true`                     |
    /// | `STEP_DELAY_MS`        | `800`                      |
    /// | `JOB_TTL_SECS`         | `3600`                     |
    /// | `MOCK_ASSETS_DIR`      | `mock_assets`              |
    /// | `PROMPTS_PATH`         | `blueflame_prompts.json`   |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
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

        let mock_mode = std::env::var("MOCK_MODE")
            .unwrap_or_else(|_| "true".into())
            .to_lowercase()
            == "true";

        let step_delay_ms: u64 = std::env::var("STEP_DELAY_MS")
            .unwrap_or_else(|_| "800".into())
            .parse()
            .expect("STEP_DELAY_MS must be a valid u64");

        let job_ttl_secs: u64 = std::env::var("JOB_TTL_SECS")
            .unwrap_or_else(|_| "3600".into())
            .parse()
            .expect("JOB_TTL_SECS must be a valid u64");

        let mock_assets_dir =
            PathBuf::from(std::env::var("MOCK_ASSETS_DIR").unwrap_or_else(|_| "mock_assets".into()));

        let prompts_path = PathBuf::from(
            std::env::var("PROMPTS_PATH").unwrap_or_else(|_| "blueflame_prompts.json".into()),
        );

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            mock_mode,
            step_delay_ms,
            job_ttl_secs,
            mock_assets_dir,
            prompts_path,
        }
    }

    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    pub fn job_ttl(&self) -> Duration {
        Duration::from_secs(self.job_ttl_secs)
    }
}
