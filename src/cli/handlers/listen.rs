//! Listen command handler
//!
//! Handles the interactive console including dry-run validation.

use crate::app::App;
use crate::config::settings::Settings;
use crate::error::AppResult;

/// Handler for the listen command
pub struct ListenCommandHandler {
    config: Settings,
}

impl ListenCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Runs the console until a shutdown signal, or only validates with `dry_run`.
    pub async fn execute(self, dry_run: bool) -> AppResult<()> {
        if dry_run {
            return self.validate_only();
        }
        App::new(self.config)?.listen().await
    }

    /// Validate configuration without reading input
    pub fn validate_only(&self) -> AppResult<()> {
        self.config.validate()?;
        let interval = self.config.dispatch.interval()?;

        println!("✓ Configuration is valid");
        println!("✓ Default interval: {:?}", interval);
        println!(
            "✓ Request timeout: {}s, connect timeout: {}s",
            self.config.http.request_timeout, self.config.http.connect_timeout
        );
        println!("✓ Logger configuration is valid");
        println!("Dry run completed successfully");
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}
