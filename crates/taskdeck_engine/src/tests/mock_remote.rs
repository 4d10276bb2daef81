//! A scripted `ProjectRemote` for engine tests: records every call, can be
//! told to fail specific methods, and serves stubbed pages.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use taskdeck_api::error::Result;
use taskdeck_api::{
    ApiError, InsertionNeighbors, ProjectRemote, SectionDeleteMode, SectionPage, SectionPatch,
    TaskPage, TaskPatch, TaskPayload,
};
use taskdeck_core::{FilterState, Section, Task, TaskId};

#[derive(Clone, Copy)]
enum Failure {
    Rejected,
    NotFound,
}

#[derive(Default)]
struct Inner {
    calls: Vec<String>,
    fail: HashMap<String, Failure>,
    next_id: u64,
    task_pages: HashMap<(u64, u32), TaskPage>,
    section_pages: HashMap<u32, SectionPage>,
    collapsed: HashMap<u64, bool>,
    last_reorder: Option<(Option<u64>, u64, Option<u64>)>,
    last_neighbors: Option<InsertionNeighbors>,
    last_bulk_ids: Option<Vec<u64>>,
}

pub(crate) struct MockRemote {
    inner: Mutex<Inner>,
}

impl MockRemote {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_id: 500,
                ..Inner::default()
            }),
        }
    }

    /// Make every subsequent call to `method` fail with a 500.
    pub fn fail(&self, method: &str) {
        self.inner
            .lock()
            .unwrap()
            .fail
            .insert(method.to_string(), Failure::Rejected);
    }

    /// Make every subsequent call to `method` fail with a 404.
    pub fn fail_not_found(&self, method: &str) {
        self.inner
            .lock()
            .unwrap()
            .fail
            .insert(method.to_string(), Failure::NotFound);
    }

    pub fn stub_task_page(&self, section_id: u64, page: u32, stub: TaskPage) {
        self.inner
            .lock()
            .unwrap()
            .task_pages
            .insert((section_id, page), stub);
    }

    pub fn stub_section_page(&self, page: u32, stub: SectionPage) {
        self.inner.lock().unwrap().section_pages.insert(page, stub);
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| c.as_str() == method)
            .count()
    }

    pub fn last_reorder(&self) -> Option<(Option<u64>, u64, Option<u64>)> {
        self.inner.lock().unwrap().last_reorder
    }

    pub fn last_neighbors(&self) -> Option<InsertionNeighbors> {
        self.inner.lock().unwrap().last_neighbors
    }

    pub fn last_bulk_ids(&self) -> Option<Vec<u64>> {
        self.inner.lock().unwrap().last_bulk_ids.clone()
    }

    fn begin(&self, method: &str) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(method.to_string());
        match inner.fail.get(method) {
            Some(Failure::NotFound) => Err(ApiError::NotFound),
            Some(Failure::Rejected) => Err(ApiError::Rejected {
                status: 500,
                message: "scripted failure".to_string(),
            }),
            None => Ok(()),
        }
    }
}

fn empty_task_page() -> TaskPage {
    TaskPage {
        tasks: Vec::new(),
        count: 0,
        next: false,
    }
}

#[async_trait]
impl ProjectRemote for MockRemote {
    async fn list_sections(
        &self,
        _project_id: u64,
        _filters: &FilterState,
        page: u32,
        _page_size: u32,
    ) -> Result<SectionPage> {
        self.begin("list_sections")?;
        let inner = self.inner.lock().unwrap();
        Ok(inner.section_pages.get(&page).cloned().unwrap_or(SectionPage {
            sections: Vec::new(),
            count: 0,
            next: false,
        }))
    }

    async fn list_tasks(
        &self,
        section_id: u64,
        _filters: &FilterState,
        page: u32,
        _page_size: u32,
    ) -> Result<TaskPage> {
        self.begin("list_tasks")?;
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .task_pages
            .get(&(section_id, page))
            .cloned()
            .unwrap_or_else(empty_task_page))
    }

    async fn create_task(&self, section_id: u64, payload: &TaskPayload) -> Result<Task> {
        self.begin("create_task")?;
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let mut task = Task::draft(
            section_id,
            payload.name.clone(),
            payload.status.clone(),
            payload.order,
        );
        task.id = TaskId::Persisted(inner.next_id);
        task.description = payload.description.clone();
        task.priority = payload.priority;
        task.due_date = payload.due_date;
        task.assignees = payload.assignees.clone();
        Ok(task)
    }

    async fn update_task(&self, task_id: u64, patch: &TaskPatch) -> Result<Task> {
        self.begin("update_task")?;
        // echo the patch back; the engine only merges submitted fields
        let mut task = Task::draft(
            0,
            patch.name.clone().unwrap_or_else(|| "server".to_string()),
            patch.status.clone().unwrap_or_else(|| "not-started".to_string()),
            1.0,
        );
        task.id = TaskId::Persisted(task_id);
        task.description = patch.description.clone();
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        task.is_complete = patch.is_complete.unwrap_or(false);
        task.due_date = patch.due_date;
        if let Some(ref assignees) = patch.assignees {
            task.assignees = assignees.clone();
        }
        if let Some(ref collaborators) = patch.collaborators {
            task.collaborators = collaborators.clone();
        }
        task.allocated_hours = patch.allocated_hours;
        task.parent = patch.parent;
        Ok(task)
    }

    async fn delete_task(&self, _task_id: u64) -> Result<()> {
        self.begin("delete_task")
    }

    async fn change_task_section(
        &self,
        _task_id: u64,
        _section_id: u64,
        neighbors: InsertionNeighbors,
    ) -> Result<()> {
        self.begin("change_task_section")?;
        self.inner.lock().unwrap().last_neighbors = Some(neighbors);
        Ok(())
    }

    async fn reorder_task(
        &self,
        before: Option<u64>,
        moved: u64,
        after: Option<u64>,
    ) -> Result<()> {
        self.begin("reorder_task")?;
        self.inner.lock().unwrap().last_reorder = Some((before, moved, after));
        Ok(())
    }

    async fn bulk_delete(&self, task_ids: &[u64]) -> Result<()> {
        self.begin("bulk_delete")?;
        self.inner.lock().unwrap().last_bulk_ids = Some(task_ids.to_vec());
        Ok(())
    }

    async fn bulk_update(&self, task_ids: &[u64], _patch: &TaskPatch) -> Result<()> {
        self.begin("bulk_update")?;
        self.inner.lock().unwrap().last_bulk_ids = Some(task_ids.to_vec());
        Ok(())
    }

    async fn bulk_change_section(&self, task_ids: &[u64], _section_id: u64) -> Result<()> {
        self.begin("bulk_change_section")?;
        self.inner.lock().unwrap().last_bulk_ids = Some(task_ids.to_vec());
        Ok(())
    }

    async fn create_section(&self, _project_id: u64, name: &str) -> Result<Section> {
        self.begin("create_section")?;
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        Ok(Section::new(inner.next_id, name, 1.0))
    }

    async fn update_section(&self, section_id: u64, patch: &SectionPatch) -> Result<Section> {
        self.begin("update_section")?;
        Ok(Section::new(
            section_id,
            patch.name.clone().unwrap_or_else(|| "server".to_string()),
            patch.order.unwrap_or(1.0),
        ))
    }

    async fn toggle_section_collapse(&self, section_id: u64) -> Result<bool> {
        self.begin("toggle_section_collapse")?;
        let mut inner = self.inner.lock().unwrap();
        let state = inner.collapsed.entry(section_id).or_insert(false);
        *state = !*state;
        Ok(*state)
    }

    async fn delete_section(&self, _section_id: u64, _mode: SectionDeleteMode) -> Result<()> {
        self.begin("delete_section")
    }
}
