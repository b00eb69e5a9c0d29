use crate::errors::{EngineError, EngineResult};

/// Which origins the CORS layer lets through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    pub cors_origins: CorsOrigins,
    /// Upper bound on n_shocks accepted by the grid endpoints
    pub max_shocks: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 8000,
            cors_origins: CorsOrigins::List(vec!["http://localhost:3000".to_string()]),
            max_shocks: 250,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> EngineResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup (env in production).
    pub fn from_lookup<F>(lookup: F) -> EngineResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let server_port = var_or("SERVER_PORT", "8000")
            .parse::<u16>()
            .map_err(|e| EngineError::Config(format!("SERVER_PORT: {e}")))?;

        let max_shocks = var_or("MAX_SHOCKS", "250")
            .parse::<usize>()
            .map_err(|e| EngineError::Config(format!("MAX_SHOCKS: {e}")))?;
        if max_shocks == 0 {
            return Err(EngineError::Config("MAX_SHOCKS: must be at least 1".into()));
        }

        let cors_origins = parse_origins(&var_or("CORS_ALLOWED_ORIGINS", "http://localhost:3000"))?;

        Ok(Self {
            server_host: var_or("SERVER_HOST", "0.0.0.0"),
            server_port,
            cors_origins,
            max_shocks,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_origins(raw: &str) -> EngineResult<CorsOrigins> {
    let raw = raw.trim();
    if raw == "*" {
        return Ok(CorsOrigins::Any);
    }
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if origins.is_empty() {
        return Err(EngineError::Config("CORS_ALLOWED_ORIGINS: empty".into()));
    }
    Ok(CorsOrigins::List(origins))
}
