//! `taskdeck board` — fetch and render the whole visible board.

use anyhow::Result;

use taskdeck_core::Task;
use taskdeck_engine::Engine;

use crate::output;

pub async fn handle(engine: &mut Engine, all: bool) -> Result<()> {
    let spinner = output::spinner("fetching board");
    load_board(engine, all).await?;
    spinner.finish_and_clear();

    for section in engine.board.sections() {
        let state = if section.collapsed {
            "collapsed".to_string()
        } else {
            format!(
                "{} of {} task(s) loaded",
                section.tasks.len(),
                section.cursor.count
            )
        };
        output::header(&format!("{} · #{} · {}", section.name, section.id, state));
        if !section.collapsed && !section.tasks.is_empty() {
            print_tasks(&section.tasks);
        }
    }
    if engine.board.cursor.has_next {
        output::dim("more sections available (rerun with --all)");
    }
    Ok(())
}

/// Fetch the section list and the task pages of every expanded section.
/// With `all`, both axes are drained to the end.
pub(crate) async fn load_board(engine: &mut Engine, all: bool) -> Result<()> {
    engine.load_sections().await?;
    while all && engine.board.cursor.has_next {
        engine.load_sections().await?;
    }
    for id in engine.board.expanded_sections() {
        engine.load_task_page(id).await?;
        while all
            && engine
                .board
                .section(id)
                .is_some_and(|s| s.cursor.has_next)
        {
            engine.load_task_page(id).await?;
        }
    }
    Ok(())
}

/// Fetch every task page of one section.
pub(crate) async fn load_section_fully(engine: &mut Engine, section_id: u64) -> Result<()> {
    engine.load_task_page(section_id).await?;
    while engine
        .board
        .section(section_id)
        .is_some_and(|s| s.cursor.has_next)
    {
        engine.load_task_page(section_id).await?;
    }
    Ok(())
}

pub(crate) fn print_tasks(tasks: &[Task]) {
    let columns = ["Id", "Task", "Status", "Priority", "Due"];
    let mut table = output::table(&columns);
    let rows: Vec<Vec<String>> = tasks
        .iter()
        .map(|t| {
            vec![
                t.id.to_string(),
                t.name.clone(),
                t.status.clone(),
                t.priority.to_string(),
                t.due_date.map(|d| d.to_string()).unwrap_or_default(),
            ]
        })
        .collect();
    for row in &rows {
        output::table_row(&mut table, row.clone());
    }
    output::table_print(&table, &columns, &rows);
}
