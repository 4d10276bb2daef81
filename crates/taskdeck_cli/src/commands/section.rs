//! `taskdeck section` subcommands.

use anyhow::Result;

use taskdeck_api::SectionDeleteMode;
use taskdeck_engine::{Engine, UpdateOutcome};

use crate::cli::SectionAction;
use crate::output;

use super::board;

pub async fn handle(engine: &mut Engine, action: SectionAction) -> Result<()> {
    match action {
        SectionAction::List => list(engine).await,
        SectionAction::Add { name } => add(engine, &name).await,
        SectionAction::Rename { id, name } => rename(engine, id, &name).await,
        SectionAction::Move { id, index } => move_section(engine, id, index).await,
        SectionAction::Toggle { id } => toggle(engine, id).await,
        SectionAction::Delete { id, with_tasks } => delete(engine, id, with_tasks).await,
    }
}

async fn list(engine: &mut Engine) -> Result<()> {
    board::load_board(engine, false).await?;
    let columns = ["Id", "Section", "State", "Tasks"];
    let mut table = output::table(&columns);
    let rows: Vec<Vec<String>> = engine
        .board
        .sections()
        .iter()
        .map(|s| {
            vec![
                s.id.to_string(),
                s.name.clone(),
                if s.collapsed { "collapsed" } else { "expanded" }.to_string(),
                s.cursor.count.to_string(),
            ]
        })
        .collect();
    for row in &rows {
        output::table_row(&mut table, row.clone());
    }
    output::table_print(&table, &columns, &rows);
    Ok(())
}

async fn add(engine: &mut Engine, name: &str) -> Result<()> {
    board::load_board(engine, false).await?;
    let spinner = output::spinner("creating section");
    let id = engine.create_section(name).await?;
    output::spinner_done(&spinner, &format!("section #{id} created"));
    Ok(())
}

async fn rename(engine: &mut Engine, id: u64, name: &str) -> Result<()> {
    board::load_board(engine, false).await?;
    match engine.rename_section(id, name).await? {
        UpdateOutcome::NoOp => output::dim("already named that; nothing sent"),
        _ => output::success(&format!("section #{id} renamed to {name}")),
    }
    Ok(())
}

async fn move_section(engine: &mut Engine, id: u64, index: usize) -> Result<()> {
    board::load_board(engine, false).await?;
    engine.reorder_section(id, index).await?;
    output::success(&format!("section #{id} moved to position {index}"));
    Ok(())
}

async fn toggle(engine: &mut Engine, id: u64) -> Result<()> {
    board::load_board(engine, false).await?;
    let collapsed = engine.toggle_collapse(id).await?;
    if collapsed {
        output::success(&format!("section #{id} collapsed"));
    } else {
        let loaded = engine.board.section(id).map(|s| s.tasks.len()).unwrap_or(0);
        output::success(&format!("section #{id} expanded, {loaded} task(s) loaded"));
    }
    Ok(())
}

async fn delete(engine: &mut Engine, id: u64, with_tasks: bool) -> Result<()> {
    board::load_board(engine, false).await?;
    let mode = if with_tasks {
        SectionDeleteMode::WithTasks
    } else {
        SectionDeleteMode::SectionOnly
    };
    engine.delete_section(id, mode).await?;
    output::success(&format!("section #{id} deleted"));
    Ok(())
}
