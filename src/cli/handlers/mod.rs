//! Command handlers for CLI operations
//!
//! This module contains handlers for different CLI commands,
//! separating command execution logic from parsing and validation.

pub mod listen;
pub mod send;

pub use listen::ListenCommandHandler;
pub use send::SendCommandHandler;
