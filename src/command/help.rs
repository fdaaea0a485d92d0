//! Console texts.

pub const HELP: &str = "usage: notify --url=URL [<flags>]
Flags:
\t--help\t\tShow context-sensitive help.
\t-i\t\t=5s Notification interval.
\t-m\t\tSpecify message to be sent
\t-f\t\tRetrieve the content of a file to be sent as the message content
\t--silent\tAdd this flag to avoid displaying error messages
Example call:
\t$notify --url http://localhost:8080/notify -m \"content to be sent\" --silent";

pub const INVALID_INPUT: &str =
    "Invalid input, please provide a valid input or type notify --help for help";

pub const RETRY_HINT: &str = "Provide an URL and a message content to send";
