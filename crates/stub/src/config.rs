use std::env;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a valid {expected}")]
    Invalid {
        var: &'static str,
        expected: &'static str,
    },
}

/// Stub server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct StubConfig {
    /// Server host to bind to.
    pub host: String,
    /// Server port to bind to.
    pub port: u16,
    /// Secret used to sign login tokens.
    pub jwt_secret: String,
    /// Lifetime of issued tokens, in seconds.
    pub session_ttl_secs: i64,
    /// The single account accepted by `/api/auth/login`.
    pub admin_email: String,
    pub admin_password: String,
    pub admin_user_id: String,
    /// Largest accepted request body (album uploads), in bytes.
    pub max_body_bytes: usize,
    /// Log level (e.g., "info", "debug", "trace").
    pub log_level: String,
}

impl Default for StubConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3030,
            jwt_secret: "dev-secret-change-me".to_string(),
            session_ttl_secs: 8 * 60 * 60,
            admin_email: "admin@studio.local".to_string(),
            admin_password: "admin".to_string(),
            admin_user_id: "admin".to_string(),
            max_body_bytes: 25 * 1024 * 1024,
            log_level: "info".to_string(),
        }
    }
}

impl StubConfig {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parsed("PORT", "u16", defaults.port)?,
            jwt_secret: env::var("JWT_SECRET").unwrap_or(defaults.jwt_secret),
            session_ttl_secs: parsed("SESSION_TTL_SECS", "i64", defaults.session_ttl_secs)?,
            admin_email: env::var("ADMIN_EMAIL").unwrap_or(defaults.admin_email),
            admin_password: env::var("ADMIN_PASSWORD").unwrap_or(defaults.admin_password),
            admin_user_id: env::var("ADMIN_USER_ID").unwrap_or(defaults.admin_user_id),
            max_body_bytes: parsed("MAX_BODY_BYTES", "usize", defaults.max_body_bytes)?,
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
        })
    }

    /// Build the socket address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parsed<T: FromStr>(var: &'static str, expected: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid { var, expected }),
        Err(_) => Ok(default),
    }
}
