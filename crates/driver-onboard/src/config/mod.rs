use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::workflows::onboarding::{SubmissionSettings, UploadPolicy};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub onboarding: OnboardingConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let json_logs = match env::var("APP_LOG_FORMAT") {
            Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
                "json" => true,
                "text" | "compact" => false,
                _ => return Err(ConfigError::InvalidLogFormat { value }),
            },
            Err(_) => false,
        };

        let wallet_currency = env::var("APP_WALLET_CURRENCY").unwrap_or_else(|_| "LKR".to_string());
        let wallet_currency = normalize_currency(&wallet_currency)
            .ok_or(ConfigError::InvalidCurrency { value: wallet_currency })?;

        let max_upload_mb = env::var("APP_MAX_UPLOAD_MB")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u64>()
            .ok()
            .filter(|mb| *mb > 0)
            .ok_or(ConfigError::InvalidUploadLimit)?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                json_logs,
            },
            onboarding: OnboardingConfig {
                wallet_currency,
                max_upload_mb,
            },
        })
    }
}

fn normalize_currency(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.len() == 3 && trimmed.bytes().all(|b| b.is_ascii_alphabetic()) {
        Some(trimmed.to_ascii_uppercase())
    } else {
        None
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub json_logs: bool,
}

/// Deployment-tunable knobs for the onboarding workflow itself.
#[derive(Debug, Clone)]
pub struct OnboardingConfig {
    /// ISO currency code used when initializing partner wallets.
    pub wallet_currency: String,
    /// Ceiling for staged document and capture uploads, in megabytes.
    pub max_upload_mb: u64,
}

impl OnboardingConfig {
    pub fn submission_settings(&self) -> SubmissionSettings {
        SubmissionSettings {
            wallet_currency: self.wallet_currency.clone(),
        }
    }

    pub fn upload_policy(&self) -> UploadPolicy {
        UploadPolicy {
            max_upload_bytes: self.max_upload_mb * 1024 * 1024,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidLogFormat { value: String },
    InvalidCurrency { value: String },
    InvalidUploadLimit,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidLogFormat { value } => {
                write!(f, "APP_LOG_FORMAT must be 'json' or 'text', got '{value}'")
            }
            ConfigError::InvalidCurrency { value } => {
                write!(
                    f,
                    "APP_WALLET_CURRENCY must be a three-letter ISO code, got '{value}'"
                )
            }
            ConfigError::InvalidUploadLimit => {
                write!(f, "APP_MAX_UPLOAD_MB must be a positive integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("APP_LOG_FORMAT");
        env::remove_var("APP_WALLET_CURRENCY");
        env::remove_var("APP_MAX_UPLOAD_MB");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert!(!config.telemetry.json_logs);
        assert_eq!(config.onboarding.wallet_currency, "LKR");
        assert_eq!(config.onboarding.max_upload_mb, 10);
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
    }

    #[test]
    fn rejects_invalid_port() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_PORT", "not-a-port");
        match AppConfig::load() {
            Err(ConfigError::InvalidPort) => {}
            other => panic!("expected invalid port error, got {other:?}"),
        }
        env::remove_var("APP_PORT");
    }

    #[test]
    fn normalizes_the_wallet_currency() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_WALLET_CURRENCY", " usd ");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.onboarding.wallet_currency, "USD");
        assert_eq!(
            config.onboarding.submission_settings().wallet_currency,
            "USD"
        );
        env::remove_var("APP_WALLET_CURRENCY");
    }

    #[test]
    fn rejects_a_malformed_currency_code() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_WALLET_CURRENCY", "rupees");
        match AppConfig::load() {
            Err(ConfigError::InvalidCurrency { value }) => assert_eq!(value, "rupees"),
            other => panic!("expected invalid currency error, got {other:?}"),
        }
        env::remove_var("APP_WALLET_CURRENCY");
    }

    #[test]
    fn rejects_a_zero_upload_limit() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_MAX_UPLOAD_MB", "0");
        match AppConfig::load() {
            Err(ConfigError::InvalidUploadLimit) => {}
            other => panic!("expected invalid upload limit error, got {other:?}"),
        }
        env::remove_var("APP_MAX_UPLOAD_MB");
    }

    #[test]
    fn upload_policy_converts_megabytes_to_bytes() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_MAX_UPLOAD_MB", "25");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(
            config.onboarding.upload_policy().max_upload_bytes,
            25 * 1024 * 1024
        );
        env::remove_var("APP_MAX_UPLOAD_MB");
    }

    #[test]
    fn parses_the_log_format() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_LOG_FORMAT", "json");
        let config = AppConfig::load().expect("config loads");
        assert!(config.telemetry.json_logs);

        env::set_var("APP_LOG_FORMAT", "yaml");
        match AppConfig::load() {
            Err(ConfigError::InvalidLogFormat { value }) => assert_eq!(value, "yaml"),
            other => panic!("expected invalid log format error, got {other:?}"),
        }
        env::remove_var("APP_LOG_FORMAT");
    }
}
