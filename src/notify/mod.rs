//! Notification client and the types that flow through one attempt.
//!
//! An attempt is: prepare once, then per tick `send` (spawns the round trip)
//! and optionally `await_result` on the returned single-slot channel.

mod channel;
mod client;
pub mod dump;
mod request;
mod result;

pub use channel::{ResultChannel, ResultSender, result_channel};
pub use client::{ClientOptions, NotificationClient};
pub use request::NotificationRequest;
pub use result::{NotificationError, NotificationResult, ResponseSummary};
