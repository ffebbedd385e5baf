//! Service configuration loaded from the environment

use std::path::PathBuf;

use anyhow::Result;
use common::database::DatabaseConfig;

/// Deployment mode taken from `PLATFORM`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    /// Local development; unlocks the destructive reset endpoint
    Dev,
    /// Anything else, kept verbatim for logging
    Other(String),
}

impl Platform {
    pub fn parse(value: &str) -> Self {
        match value {
            "dev" => Platform::Dev,
            other => Platform::Other(other.to_string()),
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Platform::Dev)
    }
}

/// Chirpy configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Deployment mode
    pub platform: Platform,
    /// HMAC secret for session tokens
    pub jwt_secret: String,
    /// Shared key expected from the Polka webhook
    pub polka_key: String,
    /// Directory served under `/app`
    pub fileserver_root: PathBuf,
    /// TCP port to listen on
    pub port: u16,
}

impl ApiConfig {
    /// Create a new ApiConfig from environment variables
    ///
    /// # Environment Variables
    /// - `SECRET`: HMAC key for session tokens (required)
    /// - `POLKA_KEY`: Polka webhook API key (required)
    /// - `PLATFORM`: deployment mode, `dev` enables `/admin/reset` (default: empty)
    /// - `FILESERVER_ROOT`: directory served under `/app` (default: `.`)
    /// - `PORT`: listen port (default: 8080)
    pub fn from_env() -> Result<Self> {
        let jwt_secret = required_var("SECRET")?;
        let polka_key = required_var("POLKA_KEY")?;

        let platform = Platform::parse(&std::env::var("PLATFORM").unwrap_or_default());

        let fileserver_root = std::env::var("FILESERVER_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .unwrap_or(8080);

        Ok(ApiConfig {
            platform,
            jwt_secret,
            polka_key,
            fileserver_root,
            port,
        })
    }
}

/// Full configuration for the service process
#[derive(Debug, Clone)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub api: ApiConfig,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Ok(Settings {
            database: DatabaseConfig::from_env()?,
            api: ApiConfig::from_env()?,
        })
    }
}

fn required_var(name: &str) -> Result<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .ok_or_else(|| anyhow::anyhow!("{} environment variable not set", name))
}
