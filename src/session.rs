//! Console session: one line in, one running dispatch loop out.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::command::{Command, NotifyFlags, parse_line};
use crate::dispatch::{DispatchHandle, DispatchLoop, FailureObserver};
use crate::error::AppResult;
use crate::notify::NotificationClient;

/// What a handled line produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Help,
    Started {
        id: Uuid,
        target: Url,
        interval: Duration,
    },
}

/// Owns every loop started from the console.
///
/// Loops are independent: a bad line never touches the ones already running,
/// and a new `notify` line adds a loop instead of replacing one.
pub struct CommandSession {
    client: NotificationClient,
    observer: Arc<dyn FailureObserver>,
    default_interval: Duration,
    root: CancellationToken,
    loops: Vec<DispatchHandle>,
}

impl CommandSession {
    pub fn new(
        client: NotificationClient,
        observer: Arc<dyn FailureObserver>,
        default_interval: Duration,
    ) -> Self {
        Self {
            client,
            observer,
            default_interval,
            root: CancellationToken::new(),
            loops: Vec::new(),
        }
    }

    /// Handles one console line.
    pub async fn handle_line(&mut self, line: &str) -> AppResult<LineOutcome> {
        match parse_line(line)? {
            Command::Help => Ok(LineOutcome::Help),
            Command::Notify { url, flags } => self.start(&url, flags).await,
        }
    }

    /// Starts a loop from already extracted flags.
    pub async fn start(&mut self, url: &str, flags: NotifyFlags) -> AppResult<LineOutcome> {
        let params = flags.into_params(self.default_interval).await?;
        let request = self.client.prepare(url, params.body.clone())?;

        let handle = DispatchLoop::new(
            self.client.clone(),
            request,
            params,
            Arc::clone(&self.observer),
        )
        .spawn(self.root.child_token());

        let outcome = LineOutcome::Started {
            id: handle.id(),
            target: handle.target().clone(),
            interval: handle.interval(),
        };
        self.loops.push(handle);
        Ok(outcome)
    }

    pub fn loops(&self) -> &[DispatchHandle] {
        &self.loops
    }

    /// Cancels every loop and waits for their tasks to exit.
    pub async fn shutdown(self) -> AppResult<()> {
        self.root.cancel();
        let count = self.loops.len();
        for handle in self.loops {
            handle.stopped().await?;
        }
        tracing::info!(loops = count, "All dispatch loops stopped");
        Ok(())
    }
}
