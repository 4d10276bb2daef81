//! The abstract remote boundary.

use async_trait::async_trait;

use taskdeck_core::{FilterState, Section, Task};

use crate::error::Result;
use crate::types::{
    InsertionNeighbors, SectionDeleteMode, SectionPage, SectionPatch, TaskPage, TaskPatch,
    TaskPayload,
};

/// Everything the engine needs from the server, and nothing else.
///
/// All ids crossing this boundary are server-assigned; pending placeholder
/// ids never appear here (they may only be *created*, via `create_task`).
#[async_trait]
pub trait ProjectRemote: Send + Sync {
    async fn list_sections(
        &self,
        project_id: u64,
        filters: &FilterState,
        page: u32,
        page_size: u32,
    ) -> Result<SectionPage>;

    async fn list_tasks(
        &self,
        section_id: u64,
        filters: &FilterState,
        page: u32,
        page_size: u32,
    ) -> Result<TaskPage>;

    async fn create_task(&self, section_id: u64, payload: &TaskPayload) -> Result<Task>;

    async fn update_task(&self, task_id: u64, patch: &TaskPatch) -> Result<Task>;

    async fn delete_task(&self, task_id: u64) -> Result<()>;

    async fn change_task_section(
        &self,
        task_id: u64,
        section_id: u64,
        neighbors: InsertionNeighbors,
    ) -> Result<()>;

    async fn reorder_task(
        &self,
        before: Option<u64>,
        moved: u64,
        after: Option<u64>,
    ) -> Result<()>;

    async fn bulk_delete(&self, task_ids: &[u64]) -> Result<()>;

    async fn bulk_update(&self, task_ids: &[u64], patch: &TaskPatch) -> Result<()>;

    async fn bulk_change_section(&self, task_ids: &[u64], section_id: u64) -> Result<()>;

    /// Sections are never created optimistically; the server assigns the id
    /// in the same round trip.
    async fn create_section(&self, project_id: u64, name: &str) -> Result<Section>;

    async fn update_section(&self, section_id: u64, patch: &SectionPatch) -> Result<Section>;

    /// Returns the new collapsed state.
    async fn toggle_section_collapse(&self, section_id: u64) -> Result<bool>;

    async fn delete_section(&self, section_id: u64, mode: SectionDeleteMode) -> Result<()>;
}
