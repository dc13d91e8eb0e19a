//! Command: the interactive command grammar.
//!
//! One command per line. A line whose first word is not a keyword is taken
//! to be a raw access log line to insert.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("`{0}` takes no arguments")]
    UnexpectedArgument(&'static str),
    #[error("expected two datetimes separated by a comma, got {0:?}")]
    BadRange(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Raw CSV access line
    Insert(String),
    IpsForUrl(String),
    UrlsForIp(String),
    UrlsInRange { from: String, to: String },
    UrlsCount,
    UrlsDuration,
    IpsCountDuration,
    UrlsCountInRange { from: String, to: String },
    /// Show a materialized result by collection name, or list the names
    Cached(Option<String>),
    Load(PathBuf),
    Stats,
    Help,
    Exit,
    Empty,
}

pub const HELP: &str = "\
<ip>, <url>, <duration>, <datetime>   insert an access log line (fields in any order)
ips <url>                             IPs that visited <url>
urls <ip>                             URLs visited by <ip>
range <t1>, <t2>                      URLs visited in [t1, t2)
count                                 visit count per URL
duration                              total visit duration per URL
by-ip                                 visit count and duration per IP
count-range <t1>, <t2>                visit count per URL in [t1, t2)
cached [<name>]                       materialized result names, or the last result under <name>
load <path>                           insert every line of a file
stats                                 ingest counters
help                                  this text
exit | quit                           leave

datetimes are written yyyy-mm-ddThh:mm:ss";

impl Command {
    pub fn parse(line: &str) -> Result<Command, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Command::Empty);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word {
            "ips" => Command::IpsForUrl(required("ips", rest)?),
            "urls" => Command::UrlsForIp(required("urls", rest)?),
            "range" => {
                let (from, to) = range("range", rest)?;
                Command::UrlsInRange { from, to }
            }
            "count-range" => {
                let (from, to) = range("count-range", rest)?;
                Command::UrlsCountInRange { from, to }
            }
            "count" => bare("count", rest, Command::UrlsCount)?,
            "duration" => bare("duration", rest, Command::UrlsDuration)?,
            "by-ip" => bare("by-ip", rest, Command::IpsCountDuration)?,
            "cached" => Command::Cached((!rest.is_empty()).then(|| rest.to_string())),
            "load" => Command::Load(PathBuf::from(required("load", rest)?)),
            "stats" => bare("stats", rest, Command::Stats)?,
            "help" => bare("help", rest, Command::Help)?,
            "exit" | "quit" => Command::Exit,
            _ => Command::Insert(line.to_string()),
        };
        Ok(command)
    }
}

fn required(name: &'static str, rest: &str) -> Result<String, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::MissingArgument(name));
    }
    Ok(rest.to_string())
}

fn bare(name: &'static str, rest: &str, command: Command) -> Result<Command, CommandError> {
    if !rest.is_empty() {
        return Err(CommandError::UnexpectedArgument(name));
    }
    Ok(command)
}

fn range(name: &'static str, rest: &str) -> Result<(String, String), CommandError> {
    let rest = required(name, rest)?;
    match rest.split_once(',') {
        Some((from, to)) if !from.trim().is_empty() && !to.trim().is_empty() => {
            Ok((from.trim().to_string(), to.trim().to_string()))
        }
        _ => Err(CommandError::BadRange(rest)),
    }
}
