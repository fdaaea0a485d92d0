//! Line grammar of the interactive console.
//!
//! ```text
//! notify --url[ =]<URL> [-i <duration>] [-m "<text>" | -f <path>] [--silent]
//! notify --help
//! ```

use std::path::PathBuf;
use std::sync::LazyLock;
use std::time::Duration;

use bytes::Bytes;
use regex::Regex;

use super::body::load_body;
use super::duration::parse_duration;
use super::error::CommandError;
use crate::dispatch::DispatchParams;

static INPUT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^notify --url[ =](\S+) (.*)$").expect("valid input pattern"));
static HELP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^notify --help").expect("valid help pattern"));
static INTERVAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-i[ =]([0-9]+[a-zµ]+)").expect("valid interval pattern"));
static MESSAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"-m[ =]"(.*)""#).expect("valid message pattern"));
static FILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-f[ =](\S+)").expect("valid file pattern"));
static SILENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"--silent").expect("valid silent pattern"));

/// A recognised console line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Notify { url: String, flags: NotifyFlags },
}

/// Flags of a `notify --url` line, before the body is resolved
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotifyFlags {
    pub interval: Option<Duration>,
    pub message: Option<String>,
    pub file: Option<PathBuf>,
    pub silent: bool,
}

impl NotifyFlags {
    /// Resolves the body and builds the loop parameters.
    ///
    /// `-m` wins over `-f`; the file is only read when no message is given.
    pub async fn into_params(self, default_interval: Duration) -> Result<DispatchParams, CommandError> {
        let interval = self.interval.unwrap_or(default_interval);

        let body = match (self.message, self.file) {
            (Some(message), _) => Bytes::from(message),
            (None, Some(path)) => load_body(&path).await?,
            (None, None) => return Err(CommandError::NoContent),
        };

        Ok(DispatchParams::new(interval, body, self.silent))
    }
}

/// Parses one console line.
pub fn parse_line(line: &str) -> Result<Command, CommandError> {
    let line = line.trim_end_matches(['\r', '\n']);

    let Some(captures) = INPUT_RE.captures(line) else {
        if HELP_RE.is_match(line) {
            return Ok(Command::Help);
        }
        return Err(CommandError::InvalidInput);
    };

    let url = captures[1].to_string();
    let flags = parse_flags(&captures[2])?;
    Ok(Command::Notify { url, flags })
}

/// Extracts `-i`, `-m`, `-f` and `--silent` from the tail of a notify line.
pub fn parse_flags(flags: &str) -> Result<NotifyFlags, CommandError> {
    let interval = match INTERVAL_RE.captures(flags) {
        Some(captures) => {
            let value = &captures[1];
            let parsed = parse_duration(value).map_err(|source| CommandError::InvalidInterval {
                value: value.to_string(),
                source,
            })?;
            Some(parsed)
        }
        None => None,
    };

    let message = MESSAGE_RE
        .captures(flags)
        .map(|captures| captures[1].to_string());
    let file = FILE_RE
        .captures(flags)
        .map(|captures| PathBuf::from(&captures[1]));

    Ok(NotifyFlags {
        interval,
        message,
        file,
        silent: SILENT_RE.is_match(flags),
    })
}
