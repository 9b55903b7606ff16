/// Configuration management for the API server
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct.
///
/// # Environment Variables
///
/// - `DB_URI`: MongoDB connection string (required)
/// - `DB_NAME`: database holding the collections (required)
/// - `JWT_SECRET`: secret key for token signing (required, at least 32 bytes)
/// - `API_HOST`: host to bind to (default: 0.0.0.0)
/// - `API_PORT`: port to bind to (default: 8080)
/// - `ENFORCE_MEMBERSHIP`: require list membership on list/item operations
///   (default: false, meaning any authenticated user may act on any list)
/// - `RUST_LOG`: log level (default: info)
///
/// # Example
///
/// ```no_run
/// use nitrocollab_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```
use serde::{Deserialize, Serialize};
use std::env;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Document database configuration
    pub database: DatabaseConfig,

    /// Token signing configuration
    pub jwt: JwtConfig,

    /// Access-control policy
    pub access: AccessPolicy,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

/// Document database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// MongoDB connection string
    pub uri: String,

    /// Database name
    pub name: String,
}

/// Token signing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Secret key for token signing
    ///
    /// IMPORTANT: This must be kept secret and should be at least 32 bytes.
    /// Generate with: `openssl rand -hex 32`
    pub secret: String,
}

/// Access-control policy for list and item operations
///
/// By default a request only has to be authenticated; whether the acting
/// user is a member of the affected list is not verified. With
/// `enforce_membership` enabled, reading, updating, or deleting a task list
/// (and touching its to-dos) additionally requires membership.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AccessPolicy {
    /// Require the acting user to be a member of the affected task list
    pub enforce_membership: bool,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// A `.env` file is loaded first if present (for development).
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing, a value fails to
    /// parse, or `JWT_SECRET` is shorter than 32 bytes.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let api_port = env::var("API_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()?;

        let db_uri = env::var("DB_URI")
            .map_err(|_| anyhow::anyhow!("DB_URI environment variable is required"))?;
        let db_name = env::var("DB_NAME")
            .map_err(|_| anyhow::anyhow!("DB_NAME environment variable is required"))?;

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable is required"))?;

        if jwt_secret.len() < 32 {
            anyhow::bail!("JWT_SECRET must be at least 32 characters long");
        }

        let enforce_membership = env::var("ENFORCE_MEMBERSHIP")
            .unwrap_or_else(|_| "false".to_string())
            .parse::<bool>()?;

        Ok(Self {
            api: ApiConfig {
                host: api_host,
                port: api_port,
            },
            database: DatabaseConfig {
                uri: db_uri,
                name: db_name,
            },
            jwt: JwtConfig { secret: jwt_secret },
            access: AccessPolicy { enforce_membership },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address() {
        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                uri: "mongodb://localhost:27017".to_string(),
                name: "nitrocollab".to_string(),
            },
            jwt: JwtConfig {
                secret: "test-secret-key-at-least-32-bytes-long".to_string(),
            },
            access: AccessPolicy::default(),
        };

        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_access_policy_defaults_open() {
        assert!(!AccessPolicy::default().enforce_membership);
    }
}
