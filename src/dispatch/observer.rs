//! Sinks for failed attempts.

use reqwest::Url;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::notify::NotificationError;

/// One failed, non-silent attempt
#[derive(Debug)]
pub struct FailureReport {
    /// Loop that issued the attempt
    pub loop_id: Uuid,
    pub target: Url,
    pub error: NotificationError,
}

/// Receives failure reports from dispatch loops.
///
/// Called from the per-attempt waiter task, so reports from different loops
/// (and from overlapping attempts of one loop) arrive in no particular order.
pub trait FailureObserver: Send + Sync {
    fn on_failure(&self, report: FailureReport);
}

/// Prints each failure to stdout for the interactive console
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleObserver;

impl FailureObserver for ConsoleObserver {
    fn on_failure(&self, report: FailureReport) {
        println!(
            "warning: error occurred on request to \n {} \n with response \n {}",
            report.target, report.error
        );
    }
}

/// Forwards reports onto an unbounded stream
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    tx: mpsc::UnboundedSender<FailureReport>,
}

impl ChannelObserver {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<FailureReport>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl FailureObserver for ChannelObserver {
    fn on_failure(&self, report: FailureReport) {
        if self.tx.send(report).is_err() {
            tracing::debug!("Failure report dropped, receiver closed");
        }
    }
}
