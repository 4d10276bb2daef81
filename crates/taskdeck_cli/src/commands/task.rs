//! `taskdeck task` subcommands.

use anyhow::{anyhow, Result};
use chrono::NaiveDate;

use taskdeck_api::TaskPatch;
use taskdeck_core::{Priority, TaskId};
use taskdeck_engine::{Engine, UpdateOutcome};

use crate::cli::TaskAction;
use crate::output;

use super::board;

pub async fn handle(engine: &mut Engine, action: TaskAction) -> Result<()> {
    match action {
        TaskAction::List { section, all } => list(engine, section, all).await,
        TaskAction::Add { section, name } => add(engine, section, &name).await,
        TaskAction::Update {
            id,
            name,
            description,
            priority,
            status,
            due,
            done,
        } => {
            let patch = build_patch(name, description, priority, status, due, done)?;
            update(engine, id, patch).await
        }
        TaskAction::Delete { id } => delete(engine, id).await,
        TaskAction::Move { id, section } => move_task(engine, id, section).await,
        TaskAction::Reorder { id, section, index } => reorder(engine, id, section, index).await,
    }
}

fn parse_priority(value: &str) -> Result<Priority> {
    value
        .parse()
        .map_err(|_| anyhow!("invalid priority: {value} (expected low, medium or high)"))
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| anyhow!("invalid date: {value} (expected YYYY-MM-DD)"))
}

fn build_patch(
    name: Option<String>,
    description: Option<String>,
    priority: Option<String>,
    status: Option<String>,
    due: Option<String>,
    done: Option<bool>,
) -> Result<TaskPatch> {
    let mut patch = TaskPatch::default();
    if let Some(name) = name {
        patch = patch.name(name);
    }
    if let Some(description) = description {
        patch = patch.description(description);
    }
    if let Some(priority) = priority {
        patch = patch.priority(parse_priority(&priority)?);
    }
    if let Some(status) = status {
        patch = patch.status(status);
    }
    if let Some(due) = due {
        patch = patch.due_date(parse_date(&due)?);
    }
    if let Some(done) = done {
        patch = patch.complete(done);
    }
    Ok(patch)
}

async fn list(engine: &mut Engine, section_id: u64, all: bool) -> Result<()> {
    engine.load_sections().await?;
    if all {
        board::load_section_fully(engine, section_id).await?;
    } else {
        engine.load_task_page(section_id).await?;
    }
    let section = engine
        .board
        .section(section_id)
        .ok_or_else(|| anyhow!("section {section_id} not found"))?;
    output::header(&format!(
        "{} · {} of {} task(s)",
        section.name,
        section.tasks.len(),
        section.cursor.count
    ));
    board::print_tasks(&section.tasks);
    if section.cursor.has_next {
        output::dim("more tasks available (rerun with --all)");
    }
    Ok(())
}

async fn add(engine: &mut Engine, section_id: u64, name: &str) -> Result<()> {
    engine.load_sections().await?;
    engine.load_task_page(section_id).await?;
    let spinner = output::spinner("creating task");
    let id = engine.create_task(section_id, name).await?;
    output::spinner_done(&spinner, &format!("task {id} created"));
    Ok(())
}

async fn update(engine: &mut Engine, id: u64, patch: TaskPatch) -> Result<()> {
    if patch.is_empty() {
        output::dim("nothing to update");
        return Ok(());
    }
    board::load_board(engine, true).await?;
    let task_id = TaskId::Persisted(id);
    match engine.update_task(&task_id, patch).await? {
        UpdateOutcome::NoOp => output::dim("already up to date; nothing sent"),
        _ => output::success(&format!("task {id} updated")),
    }
    Ok(())
}

async fn delete(engine: &mut Engine, id: u64) -> Result<()> {
    board::load_board(engine, true).await?;
    engine.delete_task(&TaskId::Persisted(id)).await?;
    output::success(&format!("task {id} deleted"));
    Ok(())
}

async fn move_task(engine: &mut Engine, id: u64, section_id: u64) -> Result<()> {
    board::load_board(engine, true).await?;
    engine
        .change_task_section(&TaskId::Persisted(id), section_id)
        .await?;
    output::success(&format!("task {id} moved to section #{section_id}"));
    Ok(())
}

async fn reorder(engine: &mut Engine, id: u64, section_id: u64, index: usize) -> Result<()> {
    board::load_board(engine, true).await?;
    engine
        .reorder_task(&TaskId::Persisted(id), section_id, index)
        .await?;
    output::success(&format!(
        "task {id} placed at position {index} in section #{section_id}"
    ));
    Ok(())
}
