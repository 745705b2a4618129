use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
    pub auth: AuthenticationSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection string. When absent the in-memory store is used.
    #[serde(skip_serializing)]
    pub url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
    pub seed_on_startup: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub enable_request_logging: bool,
    pub slow_request_threshold_ms: u64,
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

/// Token signing settings. The issuer doubles as the audience.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthenticationSettings {
    #[serde(skip_serializing)]
    pub jwt_key: String,
    pub jwt_issuer: String,
    pub jwt_expire_days: i64,
}

impl std::fmt::Debug for AuthenticationSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticationSettings")
            .field("jwt_key", &"<redacted>")
            .field("jwt_issuer", &self.jwt_issuer)
            .field("jwt_expire_days", &self.jwt_expire_days)
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            if !v.trim().is_empty() {
                self.database.url = Some(v);
            }
        }
        self.database.max_connections = env_or("DATABASE_MAX_CONNECTIONS", self.database.max_connections);
        self.database.connection_timeout = env_or("DATABASE_CONNECTION_TIMEOUT", self.database.connection_timeout);
        self.database.seed_on_startup = env_or("DATABASE_SEED", self.database.seed_on_startup);

        // API overrides
        self.api.enable_request_logging = env_or("API_ENABLE_REQUEST_LOGGING", self.api.enable_request_logging);
        self.api.slow_request_threshold_ms = env_or("API_SLOW_REQUEST_THRESHOLD_MS", self.api.slow_request_threshold_ms);
        self.api.max_request_size_bytes = env_or("API_MAX_REQUEST_SIZE_BYTES", self.api.max_request_size_bytes);

        // Security overrides
        self.security.enable_cors = env_or("SECURITY_ENABLE_CORS", self.security.enable_cors);
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = parse_origins(&v);
        }

        // Authentication overrides
        if let Ok(v) = env::var("AUTH_JWT_KEY") {
            self.auth.jwt_key = v;
        }
        if let Ok(v) = env::var("AUTH_JWT_ISSUER") {
            self.auth.jwt_issuer = v;
        }
        self.auth.jwt_expire_days = env_or("AUTH_JWT_EXPIRE_DAYS", self.auth.jwt_expire_days);

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                connection_timeout: 30,
                seed_on_startup: true,
            },
            api: ApiConfig {
                enable_request_logging: true,
                slow_request_threshold_ms: 4000,
                max_request_size_bytes: 10 * 1024 * 1024, // 10MB
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["http://localhost:8080".to_string(), "http://localhost:5173".to_string()],
            },
            auth: AuthenticationSettings {
                jwt_key: "PRIVATE_KEY_DONT_SHARE_DEVELOPMENT_ONLY".to_string(),
                jwt_issuer: "http://restaurantapi.com".to_string(),
                jwt_expire_days: 15,
            },
        }
    }

    pub fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                url: None,
                max_connections: 20,
                connection_timeout: 10,
                seed_on_startup: true,
            },
            api: ApiConfig {
                enable_request_logging: true,
                slow_request_threshold_ms: 2000,
                max_request_size_bytes: 5 * 1024 * 1024, // 5MB
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
            auth: AuthenticationSettings {
                jwt_key: String::new(),
                jwt_issuer: "https://staging.restaurantapi.com".to_string(),
                jwt_expire_days: 2,
            },
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                url: None,
                max_connections: 50,
                connection_timeout: 5,
                seed_on_startup: false,
            },
            api: ApiConfig {
                enable_request_logging: false,
                slow_request_threshold_ms: 1000,
                max_request_size_bytes: 2 * 1024 * 1024, // 2MB
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://app.example.com".to_string()],
            },
            auth: AuthenticationSettings {
                jwt_key: String::new(),
                jwt_issuer: "https://restaurantapi.com".to_string(),
                jwt_expire_days: 1,
            },
        }
    }

    /// Checks the settings a server cannot run without.
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.auth.jwt_key.trim().is_empty() {
            return Err(ConfigError::Missing("AUTH_JWT_KEY"));
        }
        if self.auth.jwt_expire_days <= 0 {
            return Err(ConfigError::Invalid("AUTH_JWT_EXPIRE_DAYS must be positive"));
        }
        if self.environment == Environment::Production && self.database.url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid configuration: {0}")]
    Invalid(&'static str),
}

fn env_or<T: FromStr>(key: &str, current: T) -> T {
    match env::var(key) {
        Ok(v) => v.trim().parse().unwrap_or(current),
        Err(_) => current,
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
