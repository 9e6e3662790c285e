use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub payout: PayoutConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    pub connection_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Secret for user-session JWTs issued by the identity provider.
    pub jwt_secret: String,
    /// Shared secret presented by the external payout scheduler.
    pub trigger_secret: String,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoutConfig {
    /// How many implementer sub-runs the batch trigger executes at once.
    pub fanout_concurrency: usize,
    /// Overall budget for one batch run across all implementers.
    pub fanout_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout_secs =
                v.parse().unwrap_or(self.database.connection_timeout_secs);
        }

        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("PAYOUT_TRIGGER_SECRET") {
            self.security.trigger_secret = v;
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }

        if let Ok(v) = env::var("PAYOUT_FANOUT_CONCURRENCY") {
            self.payout.fanout_concurrency = v.parse().unwrap_or(self.payout.fanout_concurrency);
        }
        if let Ok(v) = env::var("PAYOUT_FANOUT_TIMEOUT_SECS") {
            self.payout.fanout_timeout_secs =
                v.parse().unwrap_or(self.payout.fanout_timeout_secs);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                max_connections: 10,
                connection_timeout_secs: 30,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                trigger_secret: String::new(),
                cors_origins: vec![
                    "http://localhost:3000".to_string(),
                    "http://localhost:5173".to_string(),
                ],
            },
            payout: PayoutConfig {
                fanout_concurrency: 4,
                fanout_timeout_secs: 300,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                max_connections: 20,
                connection_timeout_secs: 10,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                trigger_secret: String::new(),
                cors_origins: vec!["https://staging.shamiri.example".to_string()],
            },
            payout: PayoutConfig {
                fanout_concurrency: 4,
                fanout_timeout_secs: 240,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                max_connections: 50,
                connection_timeout_secs: 5,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                trigger_secret: String::new(),
                cors_origins: vec!["https://hub.shamiri.example".to_string()],
            },
            payout: PayoutConfig {
                fanout_concurrency: 8,
                fanout_timeout_secs: 180,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn development_defaults() {
        let config = AppConfig::development();
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.payout.fanout_concurrency, 4);
        assert!(config.security.trigger_secret.is_empty());
    }

    #[test]
    fn production_tightens_fanout_budget() {
        let config = AppConfig::production();
        assert_eq!(config.payout.fanout_concurrency, 8);
        assert!(config.payout.fanout_timeout_secs <= 300);
    }
}
