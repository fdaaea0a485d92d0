//! Dispatch loops: periodic, non-blocking resend of one prepared request.

mod observer;
mod params;
mod runner;

pub use observer::{ChannelObserver, ConsoleObserver, FailureObserver, FailureReport};
pub use params::{DispatchParams, MIN_INTERVAL};
pub use runner::{DispatchHandle, DispatchLoop};
