//! Repl: the interactive command loop over stdin/stdout.
//!
//! Every result row is written as one JSON value per line. Failures are
//! reported as `error: <message>` and the loop carries on; re-entering a
//! corrected line is the only retry.

use serde::Serialize;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::query::QueryError;
use crate::state::{AppState, SharedState};

use super::command::{Command, CommandError, HELP};

const PROMPT: &str = "> ";

#[derive(Debug, Error)]
pub enum ReplError {
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error("no materialized result named {0:?}")]
    NotCached(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Run the loop on the process's stdin and stdout until `exit` or EOF.
pub async fn run(state: SharedState) -> Result<(), Box<dyn std::error::Error>> {
    let input = BufReader::new(tokio::io::stdin());
    let mut output = tokio::io::stdout();
    serve(&state, input, &mut output).await?;
    Ok(())
}

/// Drive the loop over arbitrary reader/writer halves.
pub async fn serve<R, W>(state: &AppState, input: R, output: &mut W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    loop {
        if state.config.echo_prompts {
            output.write_all(PROMPT.as_bytes()).await?;
            output.flush().await?;
        }

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let reply = match Command::parse(&line) {
            Ok(Command::Exit) => break,
            Ok(Command::Empty) => continue,
            Ok(command) => execute(state, command).await,
            Err(error) => Err(error.into()),
        };

        let text = reply.unwrap_or_else(|error| {
            tracing::warn!(%error, "command failed");
            format!("error: {}", error)
        });
        output.write_all(text.as_bytes()).await?;
        output.write_all(b"\n").await?;
        output.flush().await?;
    }

    tracing::info!("command loop finished");
    Ok(())
}

/// Execute one command and render its output.
pub async fn execute(state: &AppState, command: Command) -> Result<String, ReplError> {
    let queries = &state.queries;

    let text = match command {
        Command::Insert(line) => json_line(&queries.insert_log(&line)?)?,
        Command::IpsForUrl(url) => projected("ip", &queries.ips_for_url(&url)?)?,
        Command::UrlsForIp(ip) => projected("url", &queries.urls_for_ip(&ip)?)?,
        Command::UrlsInRange { from, to } => projected("url", &queries.urls_in_range(&from, &to)?)?,
        Command::UrlsCount => json_lines(&queries.urls_count()?)?,
        Command::UrlsDuration => json_lines(&queries.urls_duration()?)?,
        Command::IpsCountDuration => json_lines(&queries.ips_count_duration()?)?,
        Command::UrlsCountInRange { from, to } => json_lines(&queries.urls_count_in_range(&from, &to)?)?,
        Command::Cached(None) => json_line(&state.store.materialized_names())?,
        Command::Cached(Some(name)) => {
            let results = state
                .store
                .materialized(&name)
                .ok_or_else(|| ReplError::NotCached(name.clone()))?;
            json_lines(&results)?
        }
        Command::Load(path) => {
            let contents = tokio::fs::read_to_string(&path).await?;
            tracing::info!(path = %path.display(), "loading access log file");
            json_line(&queries.ingest_batch(contents.lines())?)?
        }
        Command::Stats => json_line(&queries.stats())?,
        Command::Help => HELP.to_string(),
        Command::Exit | Command::Empty => String::new(),
    };
    Ok(text)
}

fn json_line<T: Serialize>(value: &T) -> Result<String, ReplError> {
    Ok(serde_json::to_string(value)?)
}

fn json_lines<T: Serialize>(rows: &[T]) -> Result<String, ReplError> {
    let lines = rows
        .iter()
        .map(serde_json::to_string)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(lines.join("\n"))
}

/// Rows of a single projected field, e.g. `{"ip":"1.2.3.4"}`.
fn projected(field: &str, values: &[String]) -> Result<String, ReplError> {
    let rows: Vec<serde_json::Value> = values
        .iter()
        .map(|value| serde_json::json!({ field: value }))
        .collect();
    json_lines(&rows)
}
