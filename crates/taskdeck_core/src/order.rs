//! Fractional order interpolation for drag-and-drop.
//!
//! A new sort key is derived only from the two neighbors at the insertion
//! point, so re-inserting between two fixed rows never renumbers the rest of
//! the list. Lists present highest order first: a head insert takes a value
//! above the current head, a tail insert a value below the current tail.

use crate::task::{Task, TaskId};

/// Order assigned to the first task of an empty list.
pub const INITIAL_ORDER: f64 = 1.0;

/// Compute a sort key strictly between two neighbors.
///
/// `prev` is the order of the row displayed above the insertion point,
/// `next` the one below. Either side may be absent.
pub fn interpolate(prev: Option<f64>, next: Option<f64>) -> f64 {
    match (prev, next) {
        (None, None) => INITIAL_ORDER,
        (None, Some(next)) => next + 1.0,
        (Some(prev), None) => prev - 1.0,
        (Some(prev), Some(next)) => (prev + next) / 2.0,
    }
}

/// The neighbor rows around insertion `index` in a task list, ignoring the
/// moved task itself so a same-list drag interpolates against its new
/// neighbors. The index is clamped to the visible length.
pub fn neighbor_orders<'a>(
    tasks: &'a [Task],
    index: usize,
    moved: Option<&TaskId>,
) -> (Option<&'a Task>, Option<&'a Task>) {
    let visible: Vec<&Task> = tasks
        .iter()
        .filter(|t| moved.map_or(true, |id| &t.id != id))
        .collect();
    let index = index.min(visible.len());
    let prev = index.checked_sub(1).and_then(|i| visible.get(i)).copied();
    let next = visible.get(index).copied();
    (prev, next)
}
