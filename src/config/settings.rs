//! Configuration settings structures for notifier-rs
//!
//! This module defines all configuration structures that can be loaded from
//! TOML files and environment variables.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::command::parse_duration;
use crate::config::error::ConfigError;
use crate::logger::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "notifier-rs".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_pool_max_idle_per_host() -> usize {
    10
}

fn default_pool_idle_timeout() -> u64 {
    90
}

fn default_user_agent() -> String {
    format!("notifier-rs/{}", crate::pkg_version())
}

fn default_interval() -> String {
    "5s".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_path() -> String {
    "logs/notifier.log".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Application basic information configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Application name
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Application version
    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

// ============================================================================
// HTTP Client Configuration
// ============================================================================

/// Outbound HTTP client configuration
///
/// TLS 1.2 is always the floor and is not configurable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpClientConfig {
    /// Whole-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,

    /// Idle connections kept per host
    #[serde(default = "default_pool_max_idle_per_host")]
    pub pool_max_idle_per_host: usize,

    /// Idle connection lifetime in seconds
    #[serde(default = "default_pool_idle_timeout")]
    pub pool_idle_timeout: u64,

    /// `User-Agent` header sent with every notification
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: default_request_timeout(),
            connect_timeout: default_connect_timeout(),
            pool_max_idle_per_host: default_pool_max_idle_per_host(),
            pool_idle_timeout: default_pool_idle_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

// ============================================================================
// Dispatch Configuration
// ============================================================================

/// Dispatch loop defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Interval used when a command has no `-i` flag (`5s`, `500ms`, `1m30s`)
    #[serde(default = "default_interval")]
    pub default_interval: String,

    /// Dump requests and successful responses to the log
    #[serde(default)]
    pub verbose: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            default_interval: default_interval(),
            verbose: false,
        }
    }
}

impl DispatchConfig {
    /// Parsed [`default_interval`](Self::default_interval)
    pub fn interval(&self) -> Result<Duration, ConfigError> {
        parse_duration(&self.default_interval).map_err(|e| ConfigError::ValidationError {
            field: "dispatch.default_interval".to_string(),
            message: e.to_string(),
        })
    }
}

// ============================================================================
// Logger Settings (compatible with LoggerConfig)
// ============================================================================

/// Console output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    /// Whether console output is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Whether to use colored output
    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            colored: default_true(),
        }
    }
}

/// File output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    /// Whether file output is enabled
    #[serde(default)]
    pub enabled: bool,

    /// Path to the log file
    #[serde(default = "default_log_path")]
    pub path: String,

    /// Whether to append to existing file
    #[serde(default = "default_true")]
    pub append: bool,

    /// Log format: "full", "compact", or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_log_path(),
            append: default_true(),
            format: default_log_format(),
        }
    }
}

/// Logger configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Console output settings
    #[serde(default)]
    pub console: ConsoleSettings,

    /// File output settings
    #[serde(default)]
    pub file: FileSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
        }
    }
}

impl LoggerSettings {
    /// Convert the file representation into the runtime LoggerConfig
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let console_config = self.console.into_console_config();
        let file_config = self.file.into_file_config()?;

        LoggerConfig::new(console_config, file_config, self.level).map_err(|e| {
            ConfigError::ValidationError {
                field: "logger".to_string(),
                message: e.to_string(),
            }
        })
    }
}

impl ConsoleSettings {
    pub fn into_console_config(self) -> ConsoleConfig {
        ConsoleConfig::new(self.enabled, self.colored)
    }
}

impl FileSettings {
    pub fn into_file_config(self) -> Result<FileConfig, ConfigError> {
        let format = self.parse_format()?;

        FileConfig::new(self.enabled, PathBuf::from(self.path), self.append, format).map_err(
            |e| ConfigError::ValidationError {
                field: "logger.file".to_string(),
                message: e.to_string(),
            },
        )
    }

    fn parse_format(&self) -> Result<LogFormat, ConfigError> {
        self.format
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: e.to_string(),
            })
    }
}

// ============================================================================
// Main Settings Structure
// ============================================================================

/// Complete application settings
///
/// This structure represents the entire configuration that can be loaded
/// from TOML files and environment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Application information
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Logger configuration
    #[serde(default)]
    pub logger: LoggerSettings,

    /// Outbound HTTP client configuration
    #[serde(default)]
    pub http: HttpClientConfig,

    /// Dispatch loop defaults
    #[serde(default)]
    pub dispatch: DispatchConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ========================================================================
    // Arbitrary implementations for property-based testing
    // ========================================================================

    fn arb_application_config() -> impl Strategy<Value = ApplicationConfig> {
        ("[a-z][a-z0-9-]{0,20}", "[0-9]{1,2}\\.[0-9]{1,2}\\.[0-9]{1,2}")
            .prop_map(|(name, version)| ApplicationConfig { name, version })
    }

    fn arb_http_config() -> impl Strategy<Value = HttpClientConfig> {
        (
            1u64..3600,
            1u64..600,
            0usize..100,
            1u64..3600,
            "[a-z][a-z0-9-]{0,20}/[0-9]\\.[0-9]",
        )
            .prop_map(
                |(
                    request_timeout,
                    connect_timeout,
                    pool_max_idle_per_host,
                    pool_idle_timeout,
                    user_agent,
                )| HttpClientConfig {
                    request_timeout,
                    connect_timeout,
                    pool_max_idle_per_host,
                    pool_idle_timeout,
                    user_agent,
                },
            )
    }

    fn arb_dispatch_config() -> impl Strategy<Value = DispatchConfig> {
        (1u64..10_000, prop::sample::select(vec!["ms", "s", "m", "h"]), any::<bool>()).prop_map(
            |(value, unit, verbose)| DispatchConfig {
                default_interval: format!("{value}{unit}"),
                verbose,
            },
        )
    }

    fn arb_logger_settings() -> impl Strategy<Value = LoggerSettings> {
        (
            prop::sample::select(vec!["trace", "debug", "info", "warn", "error"]),
            any::<bool>(),
            any::<bool>(),
            any::<bool>(),
            "[a-z]{1,10}/[a-z]{1,10}\\.log",
            any::<bool>(),
            prop::sample::select(vec!["full", "compact", "json"]),
        )
            .prop_map(
                |(level, console_enabled, colored, file_enabled, path, append, format)| {
                    LoggerSettings {
                        level: level.to_string(),
                        console: ConsoleSettings {
                            enabled: console_enabled,
                            colored,
                        },
                        file: FileSettings {
                            enabled: file_enabled,
                            path,
                            append,
                            format: format.to_string(),
                        },
                    }
                },
            )
    }

    fn arb_settings() -> impl Strategy<Value = Settings> {
        (
            arb_application_config(),
            arb_logger_settings(),
            arb_http_config(),
            arb_dispatch_config(),
        )
            .prop_map(|(application, logger, http, dispatch)| Settings {
                application,
                logger,
                http,
                dispatch,
            })
    }

    // ========================================================================
    // Property-based tests
    // ========================================================================

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_settings_round_trip_serialization(settings in arb_settings()) {
            let toml_str = toml::to_string(&settings)
                .expect("Settings should serialize to TOML");

            let deserialized: Settings = toml::from_str(&toml_str)
                .expect("TOML should deserialize back to Settings");

            prop_assert_eq!(settings, deserialized);
        }

        #[test]
        fn prop_generated_interval_parses(dispatch in arb_dispatch_config()) {
            prop_assert!(dispatch.interval().is_ok());
        }
    }

    // ========================================================================
    // Unit tests
    // ========================================================================

    #[test]
    fn test_application_config_defaults() {
        let config = ApplicationConfig::default();
        assert_eq!(config.name, "notifier-rs");
        assert_eq!(config.version, crate::pkg_version());
    }

    #[test]
    fn test_http_config_defaults() {
        let config = HttpClientConfig::default();
        assert_eq!(config.request_timeout, 30);
        assert_eq!(config.connect_timeout, 10);
        assert_eq!(config.pool_max_idle_per_host, 10);
        assert_eq!(config.pool_idle_timeout, 90);
        assert!(config.user_agent.starts_with("notifier-rs/"));
    }

    #[test]
    fn test_dispatch_config_defaults() {
        let config = DispatchConfig::default();
        assert_eq!(config.default_interval, "5s");
        assert!(!config.verbose);
        assert_eq!(config.interval().unwrap(), Duration::from_secs(5));
    }

    #[test]
    fn test_dispatch_config_invalid_interval() {
        let config = DispatchConfig {
            default_interval: "soon".to_string(),
            ..Default::default()
        };
        let err = config.interval().unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { field, .. } if field == "dispatch.default_interval")
        );
    }

    #[test]
    fn test_logger_settings_defaults() {
        let settings = LoggerSettings::default();
        assert_eq!(settings.level, "info");
        assert!(settings.console.enabled);
        assert!(settings.console.colored);
        assert!(!settings.file.enabled);
        assert_eq!(settings.file.path, "logs/notifier.log");
        assert_eq!(settings.file.format, "json");
    }

    #[test]
    fn test_logger_settings_into_logger_config() {
        let settings = LoggerSettings {
            level: "debug".to_string(),
            file: FileSettings {
                enabled: true,
                format: "compact".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        let config = settings.into_logger_config().unwrap();
        assert_eq!(config.level, "debug");
        assert!(config.file.enabled);
        assert_eq!(config.file.format, LogFormat::Compact);
        assert_eq!(config.file.path, PathBuf::from("logs/notifier.log"));
    }

    #[test]
    fn test_logger_settings_into_logger_config_bad_format() {
        let settings = LoggerSettings {
            file: FileSettings {
                format: "xml".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let err = settings.into_logger_config().unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationError { field, .. } if field == "logger.file.format")
        );
    }

    #[test]
    fn test_settings_deserialize_empty_uses_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_settings_deserialize_partial() {
        let settings: Settings = toml::from_str(
            r#"
[http]
request_timeout = 5

[dispatch]
default_interval = "250ms"
verbose = true
"#,
        )
        .unwrap();

        assert_eq!(settings.http.request_timeout, 5);
        assert_eq!(settings.http.connect_timeout, 10);
        assert_eq!(settings.dispatch.interval().unwrap(), Duration::from_millis(250));
        assert!(settings.dispatch.verbose);
        assert_eq!(settings.logger, LoggerSettings::default());
    }
}
