//! Send command handler
//!
//! Starts one notification loop from command-line arguments.

use crate::app::App;
use crate::cli::parser::SendArgs;
use crate::config::settings::Settings;
use crate::error::AppResult;
use crate::notify::NotificationRequest;

/// Handler for the send command
pub struct SendCommandHandler {
    config: Settings,
    args: SendArgs,
}

impl SendCommandHandler {
    pub fn new(config: Settings, args: SendArgs) -> Self {
        Self { config, args }
    }

    /// Runs the loop until a shutdown signal, or only validates with `--dry-run`.
    pub async fn execute(self) -> AppResult<()> {
        if self.args.dry_run {
            return self.validate_only().await;
        }

        let flags = self.args.to_flags();
        App::new(self.config)?.send(&self.args.url, flags).await
    }

    /// Resolves the body and target without sending anything
    pub async fn validate_only(&self) -> AppResult<()> {
        self.config.validate()?;
        let params = self
            .args
            .to_flags()
            .into_params(self.config.dispatch.interval()?)
            .await?;
        let request = NotificationRequest::prepare(&self.args.url, params.body.clone())?;

        println!("✓ Configuration is valid");
        println!("✓ Target: {} {}", request.method(), request.url());
        println!("✓ Body: {} bytes", params.body.len());
        println!("✓ Interval: {:?}", params.interval);
        println!("Dry run completed successfully");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::parser::{Cli, Commands};
    use clap::Parser;

    fn send_args(extra: &[&str]) -> SendArgs {
        let mut argv = vec!["notifier-rs", "send", "--dry-run"];
        argv.extend_from_slice(extra);
        match Cli::try_parse_from(argv).unwrap().command {
            Some(Commands::Send(args)) => args,
            other => panic!("Expected Send command, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_send_dry_run_with_message() {
        let args = send_args(&["--url", "http://localhost:8080/notify", "-m", "hello"]);
        let handler = SendCommandHandler::new(Settings::default(), args);
        assert!(handler.execute().await.is_ok());
    }

    #[tokio::test]
    async fn test_send_dry_run_missing_file() {
        let args = send_args(&["--url", "http://localhost:8080/notify", "-f", "no/such/file.txt"]);
        let handler = SendCommandHandler::new(Settings::default(), args);

        let err = handler.execute().await.unwrap_err();
        assert!(err.to_string().contains("file no/such/file.txt could not be read"));
    }

    #[tokio::test]
    async fn test_send_dry_run_without_content() {
        let args = send_args(&["--url", "http://localhost:8080/notify"]);
        let handler = SendCommandHandler::new(Settings::default(), args);

        let err = handler.execute().await.unwrap_err();
        assert_eq!(err.to_string(), "no message content has been provided");
    }
}
