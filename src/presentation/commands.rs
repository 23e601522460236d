// Console commands mapped onto dashboard events
use crate::application::refresh_controller::DashboardEvent;
use crate::domain::status::{FILTER_ALL, StatusFilter};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

pub const HELP: &str = "commands: r(efresh) | e(xport) | f(ilter) <status|all> | q(uit)";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("filter needs a status, e.g. `f High Load` or `f all`")]
    MissingStatus,
    #[error("unknown command `{0}`")]
    Unknown(String),
}

pub fn parse_command(line: &str) -> Result<DashboardEvent, CommandError> {
    let line = line.trim();
    let (command, argument) = match line.split_once(char::is_whitespace) {
        Some((command, argument)) => (command, argument.trim()),
        None => (line, ""),
    };

    match command.to_ascii_lowercase().as_str() {
        "" => Err(CommandError::Empty),
        "r" | "refresh" => Ok(DashboardEvent::ManualRefreshRequested),
        "e" | "export" => Ok(DashboardEvent::ExportRequested),
        "q" | "quit" | "exit" => Ok(DashboardEvent::Shutdown),
        "f" | "filter" if argument.is_empty() => Err(CommandError::MissingStatus),
        "f" | "filter" if argument.eq_ignore_ascii_case(FILTER_ALL) => {
            Ok(DashboardEvent::FilterChanged(StatusFilter::All))
        }
        "f" | "filter" => Ok(DashboardEvent::FilterChanged(StatusFilter::parse(argument))),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

/// Forward parsed lines until input ends or the controller goes away.
pub async fn forward_lines<R>(reader: R, events: mpsc::Sender<DashboardEvent>)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!("Failed to read console input: {}", e);
                break;
            }
        };

        match parse_command(&line) {
            Ok(event) => {
                if events.send(event).await.is_err() {
                    break;
                }
            }
            Err(CommandError::Empty) => {}
            Err(e) => tracing::warn!("{}; {}", e, HELP),
        }
    }
    tracing::debug!("Console input closed");
}

pub async fn forward_stdin(events: mpsc::Sender<DashboardEvent>) {
    forward_lines(BufReader::new(tokio::io::stdin()), events).await
}
