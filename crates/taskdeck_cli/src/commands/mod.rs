//! `taskdeck` subcommands.

mod board;
mod filter;
mod section;
mod task;

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use tokio::sync::mpsc;

use taskdeck_api::{ApiConfig, HttpRemote};
use taskdeck_core::EngineEvent;
use taskdeck_engine::{Engine, EngineConfig, SqliteUiState};

use crate::cli::{Cli, Command};
use crate::output;

pub async fn handle(cli: Cli) -> Result<()> {
    let project = resolve_project(cli.project)?;
    let (mut engine, mut events) = build_engine(project)?;

    let result = match cli.command {
        Command::Board { all } => board::handle(&mut engine, all).await,
        Command::Section { action } => section::handle(&mut engine, action).await,
        Command::Task { action } => task::handle(&mut engine, action).await,
        Command::Filter {
            search,
            priority,
            status,
            assignee,
            due_after,
            due_before,
            clear,
        } => {
            filter::handle(
                &mut engine,
                filter::FilterArgs {
                    search,
                    priority,
                    status,
                    assignee,
                    due_after,
                    due_before,
                    clear,
                },
            )
            .await
        }
    };

    drain_events(&mut events, cli.verbose);
    result
}

fn resolve_project(arg: Option<u64>) -> Result<u64> {
    if let Some(project) = arg {
        return Ok(project);
    }
    std::env::var("TASKDECK_PROJECT")
        .ok()
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| anyhow!("no project id: pass --project or set TASKDECK_PROJECT"))
}

fn build_engine(project: u64) -> Result<(Engine, mpsc::Receiver<EngineEvent>)> {
    let api = ApiConfig::from_env().context("API configuration")?;
    let remote = Arc::new(HttpRemote::new(api).map_err(|e| anyhow!("build http client: {e}"))?);
    let root = std::env::current_dir()?;
    let persist = Arc::new(SqliteUiState::new(root));
    let (tx, rx) = mpsc::channel(256);
    let engine = Engine::new(EngineConfig::from_env(project), remote, persist, tx);
    Ok((engine, rx))
}

/// Echo buffered engine events. Skipped-draft notices always surface; the
/// rest only with --verbose.
fn drain_events(events: &mut mpsc::Receiver<EngineEvent>, verbose: bool) {
    while let Ok(event) = events.try_recv() {
        match &event {
            EngineEvent::Notice { message } => output::warning(message),
            EngineEvent::BulkSkipped { .. } => {}
            _ if verbose => {
                if let Ok(json) = serde_json::to_string(&event) {
                    output::dim(&json);
                }
            }
            _ => {}
        }
    }
}
