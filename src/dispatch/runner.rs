//! Interval-driven dispatch loop.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use reqwest::Url;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::observer::{FailureObserver, FailureReport};
use super::params::DispatchParams;
use crate::error::{AppError, AppResult};
use crate::notify::{NotificationClient, NotificationRequest};

/// Sends one prepared request on a fixed interval until cancelled.
///
/// The first attempt starts as soon as the loop runs; each following one
/// starts when the timer fires, regardless of whether earlier attempts have
/// finished. Attempts therefore overlap when the endpoint is slower than the
/// interval. Failures are reported (unless silent) and never stop the loop.
pub struct DispatchLoop {
    id: Uuid,
    client: NotificationClient,
    request: Arc<NotificationRequest>,
    params: DispatchParams,
    observer: Arc<dyn FailureObserver>,
    attempts: Arc<AtomicU64>,
}

impl DispatchLoop {
    pub fn new(
        client: NotificationClient,
        request: NotificationRequest,
        params: DispatchParams,
        observer: Arc<dyn FailureObserver>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            client,
            request: Arc::new(request),
            params,
            observer,
            attempts: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Runs the loop on a new task.
    ///
    /// Cancelling `cancel` stops new attempts; attempts already started run
    /// to completion and still deliver (or report) their result.
    pub fn spawn(self, cancel: CancellationToken) -> DispatchHandle {
        let handle_token = cancel.clone();
        let id = self.id;
        let target = self.request.url().clone();
        let interval = self.params.interval;
        let silent = self.params.silent;
        let attempts = Arc::clone(&self.attempts);
        let task = tokio::spawn(self.run(cancel));

        DispatchHandle {
            id,
            target,
            interval,
            silent,
            attempts,
            cancel: handle_token,
            task,
        }
    }

    /// Drives the loop on the current task until `cancel` fires.
    pub async fn run(self, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(self.params.timer_period());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tracing::info!(
            loop_id = %self.id,
            url = %self.request.url(),
            interval = ?self.params.interval,
            silent = self.params.silent,
            "Dispatch loop started"
        );

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                // The first tick completes immediately.
                _ = ticker.tick() => self.attempt(),
            }
        }

        tracing::info!(
            loop_id = %self.id,
            attempts = self.attempts.load(Ordering::Relaxed),
            "Dispatch loop stopped"
        );
    }

    fn attempt(&self) {
        let attempt = self.attempts.fetch_add(1, Ordering::Relaxed) + 1;
        let channel = self.client.send(Arc::clone(&self.request));
        tracing::trace!(loop_id = %self.id, attempt, "Notification sent");

        if self.params.silent {
            // Channel dropped unread; the sender still writes and closes it.
            return;
        }

        let client = self.client.clone();
        let observer = Arc::clone(&self.observer);
        let target = self.request.url().clone();
        let loop_id = self.id;

        tokio::spawn(async move {
            let result = client.await_result(channel).await;
            if !result.is_error {
                return;
            }
            if let Some(error) = result.error_details {
                tracing::debug!(%loop_id, attempt, url = %target, error = %error, "Notification attempt failed");
                observer.on_failure(FailureReport {
                    loop_id,
                    target,
                    error,
                });
            }
        });
    }
}

/// Owner's view of a spawned [`DispatchLoop`]
#[derive(Debug)]
pub struct DispatchHandle {
    id: Uuid,
    target: Url,
    interval: Duration,
    silent: bool,
    attempts: Arc<AtomicU64>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl DispatchHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn target(&self) -> &Url {
        &self.target
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_silent(&self) -> bool {
        self.silent
    }

    /// Number of attempts started so far
    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::Relaxed)
    }

    /// Stops new attempts. In-flight attempts are left to finish.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the loop task to exit (after [`cancel`](Self::cancel)).
    pub async fn stopped(self) -> AppResult<()> {
        self.task.await.map_err(|e| AppError::Internal {
            source: anyhow::Error::from(e),
        })
    }
}
