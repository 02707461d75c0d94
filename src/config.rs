// Application configuration
// Built once at startup from the environment and passed into constructors

use crate::db::TableName;

/// Default token validity: one hour
pub const DEFAULT_JWT_EXPIRATION_SECS: i64 = 3600;

/// Configuration errors raised while reading the environment
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set in environment")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Runtime configuration for the service
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    /// Token validity in seconds
    pub jwt_expiration_secs: i64,
    pub users_table: TableName,
}

impl AppConfig {
    /// Read configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                name: "PORT",
                reason: e.to_string(),
            })?,
            None => 8080,
        };

        let jwt_expiration_secs = match lookup("JWT_EXPIRATION_SECS") {
            Some(raw) => {
                let secs = raw.parse::<i64>().map_err(|e| ConfigError::Invalid {
                    name: "JWT_EXPIRATION_SECS",
                    reason: e.to_string(),
                })?;
                if secs <= 0 {
                    return Err(ConfigError::Invalid {
                        name: "JWT_EXPIRATION_SECS",
                        reason: "must be greater than zero".to_string(),
                    });
                }
                secs
            }
            None => DEFAULT_JWT_EXPIRATION_SECS,
        };

        let table = lookup("USERS_TABLE").unwrap_or_else(|| "users".to_string());
        let users_table = TableName::parse(&table).map_err(|reason| ConfigError::Invalid {
            name: "USERS_TABLE",
            reason,
        })?;

        Ok(Self {
            database_url,
            host,
            port,
            jwt_secret,
            jwt_expiration_secs,
            users_table,
        })
    }

    /// Socket address string the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
