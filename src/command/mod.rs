//! Console command language: parsing `notify` lines into dispatch parameters.

mod body;
mod duration;
mod error;
pub mod help;
mod parser;

pub use body::load_body;
pub use duration::{DurationError, parse_duration};
pub use error::CommandError;
pub use parser::{Command, NotifyFlags, parse_flags, parse_line};
