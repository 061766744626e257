//! Line commands of the console session.

use std::path::PathBuf;
use std::str::FromStr;

use pp_core::preferences::ParseMonitorPreferenceError;
use pp_core::MonitorPreference;
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  open <folder>           list the presentations of a folder
  refresh                 list the current folder again
  list                    show the current list
  launch <n>              start the slideshow of entry n
  monitor auto|primary|secondary
                          choose where slideshows run
  background [<image>]    set or clear the background image
  help                    show this help
  quit                    exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Open(PathBuf),
    Refresh,
    List,
    /// Zero-based index into the current list.
    Launch(usize),
    Monitor(MonitorPreference),
    Background(Option<PathBuf>),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command: {0} (type `help`)")]
    Unknown(String),

    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    #[error("invalid position: {0} (positions start at 1)")]
    InvalidPosition(String),

    #[error(transparent)]
    Monitor(#[from] ParseMonitorPreferenceError),
}

impl FromStr for ConsoleCommand {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb.to_ascii_lowercase().as_str() {
            "" => Err(ParseCommandError::Empty),
            "open" if rest.is_empty() => Err(ParseCommandError::MissingArgument("open")),
            "open" => Ok(Self::Open(PathBuf::from(rest))),
            "refresh" => Ok(Self::Refresh),
            "list" | "ls" => Ok(Self::List),
            "launch" if rest.is_empty() => Err(ParseCommandError::MissingArgument("launch")),
            "launch" => match rest.parse::<usize>() {
                Ok(position) if position >= 1 => Ok(Self::Launch(position - 1)),
                _ => Err(ParseCommandError::InvalidPosition(rest.to_string())),
            },
            "monitor" if rest.is_empty() => Err(ParseCommandError::MissingArgument("monitor")),
            "monitor" => Ok(Self::Monitor(rest.parse()?)),
            "background" | "bg" if rest.is_empty() => Ok(Self::Background(None)),
            "background" | "bg" => Ok(Self::Background(Some(PathBuf::from(rest)))),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(ParseCommandError::Unknown(other.to_string())),
        }
    }
}
