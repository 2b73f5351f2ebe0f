//! Console front end for the support agent.
//!
//! Reads one message per line from stdin and prints the reply. `/mood`
//! prints the session's mood log, `/summary` its trend, and `quit` ends
//! the session.

use std::process::ExitCode;

use sergeai::application::SupportAgent;
use sergeai::{SessionError, SessionId};
use sergeai::config::AppConfig;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing_subscriber::{fmt, EnvFilter};

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.log_level));
    let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr);
    if config.logging.use_json() {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load_validated() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config);

    let agent = match SupportAgent::from_config(&config) {
        Ok(agent) => agent,
        Err(e) => {
            tracing::error!(error = %e, "failed to load resource library");
            return ExitCode::FAILURE;
        }
    };

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let reaper = agent.idle_reaper();
    let reaper = tokio::spawn(async move { reaper.run(shutdown_rx).await });

    let code = match converse(&agent).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "console session failed");
            ExitCode::FAILURE
        }
    };

    let _ = shutdown_tx.send(true);
    let _ = reaper.await;
    code
}

async fn converse(agent: &SupportAgent) -> Result<(), Box<dyn std::error::Error>> {
    let started = agent.start_session().await?;
    let mut session_id = started.session_id;
    println!("{}\n", started.welcome_message);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if matches!(line, "quit" | "exit") {
            break;
        }
        for block in reply(agent, &mut session_id, line).await? {
            println!("{block}\n");
        }
    }

    agent.end_session(session_id).await?;
    Ok(())
}

/// Answers one console line. A session reaped while the user was away is
/// replaced by a fresh one and the line is answered there.
async fn reply(
    agent: &SupportAgent,
    session_id: &mut SessionId,
    line: &str,
) -> Result<Vec<String>, SessionError> {
    match respond(agent, *session_id, line).await {
        Err(SessionError::UnknownSession(expired)) => {
            tracing::info!(session_id = %expired, "session expired; starting a new one");
            let started = agent.start_session().await?;
            *session_id = started.session_id;
            Ok(vec![
                "(Your previous session timed out, so a new one was started.)".to_string(),
                started.welcome_message,
                respond(agent, *session_id, line).await?,
            ])
        }
        other => other.map(|text| vec![text]),
    }
}

async fn respond(
    agent: &SupportAgent,
    session_id: SessionId,
    line: &str,
) -> Result<String, SessionError> {
    match line {
        "/mood" => {
            let log = agent.get_mood_log(session_id).await?;
            if log.is_empty() {
                return Ok("No moods logged yet.".to_string());
            }
            Ok(log
                .iter()
                .map(|entry| {
                    format!(
                        "{}  {}",
                        entry.timestamp.as_datetime().format("%H:%M:%S"),
                        entry.mood_label
                    )
                })
                .collect::<Vec<_>>()
                .join("\n"))
        }
        "/summary" => {
            let summary = agent.get_mood_summary(session_id).await?;
            Ok(serde_json::to_string_pretty(&summary)
                .unwrap_or_else(|e| format!("summary unavailable: {e}")))
        }
        _ => Ok(agent.submit_message(session_id, line).await?.response_text),
    }
}
