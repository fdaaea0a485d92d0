//! Single-slot handoff between a sending task and an optional waiter.
//!
//! One channel per attempt: the sender writes exactly once and closes by
//! being consumed; the receiver reads at most once by being consumed. The
//! write never blocks, so a waiter that never shows up (silent mode, or a
//! cancelled loop) cannot stall the producer.

use tokio::sync::oneshot;

use super::result::{NotificationError, NotificationResult};

/// Creates a fresh sender/receiver pair for one attempt.
pub fn result_channel() -> (ResultSender, ResultChannel) {
    let (tx, rx) = oneshot::channel();
    (ResultSender(tx), ResultChannel(rx))
}

/// Producer half, owned by the sending task
#[derive(Debug)]
pub struct ResultSender(oneshot::Sender<NotificationResult>);

impl ResultSender {
    /// Writes the single result and closes the channel.
    ///
    /// Returns `false` when nobody is listening any more; the result is then
    /// dropped.
    pub fn deliver(self, result: NotificationResult) -> bool {
        self.0.send(result).is_ok()
    }
}

/// Consumer half, handed back to the caller of `send`
#[derive(Debug)]
pub struct ResultChannel(oneshot::Receiver<NotificationResult>);

impl ResultChannel {
    /// Waits for the single result.
    ///
    /// A producer that went away without writing yields
    /// [`NotificationError::Abandoned`].
    pub async fn recv(self) -> NotificationResult {
        self.0
            .await
            .unwrap_or_else(|_| NotificationResult::failure(NotificationError::Abandoned, None))
    }
}
