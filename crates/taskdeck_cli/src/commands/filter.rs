//! `taskdeck filter` — apply a filter set and refetch the visible board.

use anyhow::{anyhow, Result};
use chrono::NaiveDate;

use taskdeck_core::FilterState;
use taskdeck_engine::{DispatchOutcome, Engine};

use crate::output;

use super::board;

pub struct FilterArgs {
    pub search: Option<String>,
    pub priority: Option<String>,
    pub status: Vec<String>,
    pub assignee: Option<u64>,
    pub due_after: Option<String>,
    pub due_before: Option<String>,
    pub clear: bool,
}

pub async fn handle(engine: &mut Engine, args: FilterArgs) -> Result<()> {
    board::load_board(engine, false).await?;

    let filters = if args.clear {
        FilterState::default()
    } else {
        build_filters(&args)?
    };

    let spinner = output::spinner("refreshing board");
    let outcome = engine.apply_filters(filters).await?;
    spinner.finish_and_clear();

    match outcome {
        DispatchOutcome::Applied => {
            output::success("filters applied");
            for section in engine.board.sections().iter().filter(|s| s.is_expanded()) {
                output::kv(&section.name, &format!("{} matching task(s)", section.cursor.count));
            }
        }
        DispatchOutcome::Skipped => output::dim("filters unchanged; nothing refetched"),
        DispatchOutcome::Dropped => output::warning("another refresh is in flight; dropped"),
    }
    Ok(())
}

fn build_filters(args: &FilterArgs) -> Result<FilterState> {
    let mut filters = FilterState::default();
    if let Some(ref search) = args.search {
        filters = filters.with_search(search.clone());
    }
    if let Some(ref priority) = args.priority {
        let priority = priority
            .parse()
            .map_err(|_| anyhow!("invalid priority: {priority}"))?;
        filters = filters.with_priority(priority);
    }
    if !args.status.is_empty() {
        filters = filters.with_statuses(args.status.clone());
    }
    if let Some(assignee) = args.assignee {
        filters = filters.with_assignee(assignee);
    }
    let after = args.due_after.as_deref().map(parse_date).transpose()?;
    let before = args.due_before.as_deref().map(parse_date).transpose()?;
    if after.is_some() || before.is_some() {
        filters = filters.with_due_range(after, before);
    }
    Ok(filters)
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| anyhow!("invalid date: {value} (expected YYYY-MM-DD)"))
}
