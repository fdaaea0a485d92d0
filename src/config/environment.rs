//! Deployment profile, selects the `{profile}.toml` overlay

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;

use crate::config::error::ConfigError;

/// Which overlay file the loader layers on top of `default.toml`.
///
/// Shared by `--env` and `NOTIFIER_APP_ENV`, so both accept the same names
/// and aliases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    #[default]
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "production", alias = "prod")]
    Production,
}

impl Environment {
    pub const ENV_VAR: &'static str = "NOTIFIER_APP_ENV";

    /// Reads `NOTIFIER_APP_ENV`.
    ///
    /// Unset or empty means development; anything unrecognised is an error
    /// rather than a silent fallback to another overlay.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(Self::ENV_VAR) {
            Ok(value) if !value.trim().is_empty() => value.parse(),
            _ => Ok(Self::default()),
        }
    }

    /// File name of the overlay, e.g. `production.toml`
    pub fn overlay_file(&self) -> String {
        format!("{self}.toml")
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s.trim(), true).map_err(|_| {
            ConfigError::EnvVarError(format!(
                "Invalid environment '{}' in {}. Valid values are: development (dev), test, production (prod)",
                s,
                Self::ENV_VAR
            ))
        })
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Production => "production",
        };
        f.write_str(name)
    }
}
