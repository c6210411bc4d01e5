//! Application configuration structs
//!
//! Loads configuration from environment variables (with `.env` support).

use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseConfig,
    pub gateway: GatewayConfig,
    pub bot: BotConfig,
    pub sweep: SweepConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite connection URL, e.g. `sqlite://roster.db`
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

/// Chat-gateway configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Base URL of the bot gateway
    pub url: String,
    /// Bot access token
    pub token: String,
}

/// Bot behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Fixed administrative recipient for sweep and count reports
    pub admin_user_id: i64,
    /// Chat synced once at process start; no auto-sync when unset
    #[serde(default)]
    pub auto_sync_chat_id: Option<i64>,
}

/// Deletion sweep configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SweepConfig {
    /// Delay between consecutive removal attempts, in milliseconds
    #[serde(default = "default_removal_delay_ms")]
    pub removal_delay_ms: u64,
    /// Classify members whose profile resolution fails as deleted
    #[serde(default = "default_treat_unresolvable_as_deleted")]
    pub treat_unresolvable_as_deleted: bool,
}

impl SweepConfig {
    /// The inter-removal delay as a Duration
    #[must_use]
    pub fn removal_delay(&self) -> Duration {
        Duration::from_millis(self.removal_delay_ms)
    }
}

// Default value functions
fn default_app_name() -> String {
    "roster-bot".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_max_connections() -> u32 {
    5
}

fn default_removal_delay_ms() -> u64 {
    500
}

fn default_treat_unresolvable_as_deleted() -> bool {
    true
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_max_connections),
            },
            gateway: GatewayConfig {
                url: env::var("GATEWAY_URL").map_err(|_| ConfigError::MissingVar("GATEWAY_URL"))?,
                token: env::var("GATEWAY_TOKEN")
                    .map_err(|_| ConfigError::MissingVar("GATEWAY_TOKEN"))?,
            },
            bot: BotConfig {
                admin_user_id: env::var("ADMIN_USER_ID")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .ok_or(ConfigError::MissingVar("ADMIN_USER_ID"))?,
                auto_sync_chat_id: env::var("AUTO_SYNC_CHAT_ID").ok().and_then(|s| s.parse().ok()),
            },
            sweep: SweepConfig {
                removal_delay_ms: env::var("SWEEP_REMOVAL_DELAY_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_removal_delay_ms),
                treat_unresolvable_as_deleted: env::var("SWEEP_TREAT_UNRESOLVABLE_AS_DELETED")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_treat_unresolvable_as_deleted),
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_is_production() {
        assert!(!Environment::Development.is_production());
        assert!(Environment::Production.is_production());
    }

    #[test]
    fn test_default_values() {
        assert_eq!(default_app_name(), "roster-bot");
        assert_eq!(default_max_connections(), 5);
        assert_eq!(default_removal_delay_ms(), 500);
        assert!(default_treat_unresolvable_as_deleted());
    }

    #[test]
    fn test_removal_delay_conversion() {
        let config = SweepConfig {
            removal_delay_ms: 250,
            treat_unresolvable_as_deleted: true,
        };
        assert_eq!(config.removal_delay(), Duration::from_millis(250));
    }
}
