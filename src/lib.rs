//! notifier-rs library
//!
//! Core modules for the periodic HTTP notification sender.

use shadow_rs::shadow;
shadow!(build);

pub mod app;
pub mod cli;
pub mod command;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod logger;
pub mod notify;
pub mod session;
pub mod transport;

#[cfg(test)]
mod test_support;

pub use app::App;

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}

pub fn clap_long_version() -> &'static str {
    build::CLAP_LONG_VERSION
}
