//! Filter dispatch planning.
//!
//! The engine owns the in-flight token (no free-standing global); this
//! module holds the pure parts: deciding whether a dispatch is needed at
//! all, and slicing the working set into bounded batches.

use taskdeck_core::FilterState;

use crate::store::Board;

/// What `apply_filters` did with the invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Refetches were issued and the baseline was replaced.
    Applied,
    /// Filters were deep-equal to the baseline and every expanded section
    /// already had a loaded page; nothing was fetched.
    Skipped,
    /// Another dispatch was in flight; this call was dropped, not queued.
    Dropped,
}

/// Whether a dispatch can short-circuit: unchanged filters AND every
/// expanded section already has at least one loaded page.
pub(crate) fn can_skip(board: &Board, applied: &FilterState, new: &FilterState) -> bool {
    if new != applied {
        return false;
    }
    board
        .sections()
        .iter()
        .filter(|s| s.is_expanded())
        .all(|s| s.cursor.is_loaded())
}

/// Fixed-size batches over the working set.
pub(crate) fn batches(section_ids: &[u64], batch_size: usize) -> Vec<Vec<u64>> {
    section_ids
        .chunks(batch_size.max(1))
        .map(|chunk| chunk.to_vec())
        .collect()
}
