//! Per-section page merging.
//!
//! The merge policy is what keeps optimistic rows alive across refetches:
//! a replace never drops unconfirmed drafts, and an append never shows the
//! same id twice even when page boundaries overlap.

use std::collections::HashSet;

use taskdeck_core::{Section, Task, TaskId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    /// Concatenate after the existing rows, de-duplicating by id.
    Append,
    /// Swap in the fetched page, re-prepending unconfirmed drafts.
    Replace,
}

/// Merge one fetched page into a section's task list.
pub fn merge_page(section: &mut Section, fetched: Vec<Task>, mode: MergeMode) {
    match mode {
        MergeMode::Append => {
            section.tasks.extend(fetched);
            dedup_by_id(&mut section.tasks);
        }
        MergeMode::Replace => {
            let drafts: Vec<Task> = section
                .tasks
                .drain(..)
                .filter(|t| t.is_optimistic())
                .collect();
            section.tasks = drafts;
            section.tasks.extend(fetched);
            dedup_by_id(&mut section.tasks);
        }
    }
}

/// Keep the first occurrence of each id, preserving order.
fn dedup_by_id(tasks: &mut Vec<Task>) {
    let mut seen: HashSet<TaskId> = HashSet::with_capacity(tasks.len());
    tasks.retain(|t| seen.insert(t.id.clone()));
}
