//! CLI argument validation functions
//!
//! Value parsers for arguments that need more than clap's built-in checks.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::command::parse_duration;
use crate::notify::NotificationRequest;

/// Validate that a file path is accessible (exists and is readable)
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{}'", path_str));
    }

    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{}'", path_str));
    }

    match fs::File::open(&path) {
        Ok(_) => Ok(path),
        Err(e) => Err(format!("Cannot read configuration file '{}': {}", path_str, e)),
    }
}

/// Validate a notification interval (`500ms`, `5s`, `1m30s`)
pub fn validate_interval(interval_str: &str) -> Result<Duration, String> {
    parse_duration(interval_str)
        .map_err(|e| format!("Invalid interval '{}': {}", interval_str, e))
}

/// Validate a notification target, the same check the console applies
pub fn validate_target_url(url_str: &str) -> Result<String, String> {
    NotificationRequest::prepare(url_str, "")
        .map(|_| url_str.to_string())
        .map_err(|e| e.to_string())
}
