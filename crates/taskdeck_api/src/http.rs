//! reqwest-backed implementation of `ProjectRemote`.
//!
//! Routes live under a single base URL; filters travel as query parameters
//! on the list endpoints and everything else is JSON bodies.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use tracing::debug;

use taskdeck_core::{FilterState, Section, Task};

use crate::boundary::ProjectRemote;
use crate::config::ApiConfig;
use crate::error::{ApiError, Result};
use crate::types::{
    InsertionNeighbors, SectionDeleteMode, SectionPage, SectionPatch, TaskPage, TaskPatch,
    TaskPayload,
};

#[derive(Clone)]
pub struct HttpRemote {
    http: reqwest::Client,
    config: ApiConfig,
}

impl HttpRemote {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    pub fn from_env() -> anyhow::Result<Self> {
        let config = ApiConfig::from_env()?;
        Ok(Self::new(config).map_err(|e| anyhow::anyhow!("build http client: {}", e))?)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.config.base_url, path);
        let builder = self.http.request(method, url);
        match &self.config.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Map non-success statuses onto the error taxonomy.
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        match status {
            StatusCode::NOT_FOUND => Err(ApiError::NotFound),
            StatusCode::CONFLICT => Err(ApiError::Conflict(message)),
            _ => Err(ApiError::Rejected {
                status: status.as_u16(),
                message,
            }),
        }
    }

    async fn expect_ok(response: Response) -> Result<()> {
        Self::check(response).await.map(|_| ())
    }
}

/// Query parameters for the list endpoints: page, size, then the filter set.
fn list_query(filters: &FilterState, page: u32, page_size: u32) -> Vec<(String, String)> {
    let mut query = vec![
        ("page".to_string(), page.to_string()),
        ("page_size".to_string(), page_size.to_string()),
    ];
    if let Some(ref search) = filters.search {
        query.push(("search".to_string(), search.clone()));
    }
    if let Some(assignee) = filters.assignee {
        query.push(("assignee".to_string(), assignee.to_string()));
    }
    if let Some(priority) = filters.priority {
        query.push(("priority".to_string(), priority.to_string()));
    }
    for status in &filters.statuses {
        query.push(("status".to_string(), status.clone()));
    }
    if let Some(after) = filters.due_after {
        query.push(("due_after".to_string(), after.to_string()));
    }
    if let Some(before) = filters.due_before {
        query.push(("due_before".to_string(), before.to_string()));
    }
    query
}

#[derive(Deserialize)]
struct CollapseResponse {
    is_collapsed: bool,
}

#[async_trait]
impl ProjectRemote for HttpRemote {
    async fn list_sections(
        &self,
        project_id: u64,
        filters: &FilterState,
        page: u32,
        page_size: u32,
    ) -> Result<SectionPage> {
        debug!("list_sections project={} page={}", project_id, page);
        let response = self
            .request(Method::GET, &format!("/projects/{}/sections", project_id))
            .query(&list_query(filters, page, page_size))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn list_tasks(
        &self,
        section_id: u64,
        filters: &FilterState,
        page: u32,
        page_size: u32,
    ) -> Result<TaskPage> {
        debug!("list_tasks section={} page={}", section_id, page);
        let response = self
            .request(Method::GET, &format!("/sections/{}/tasks", section_id))
            .query(&list_query(filters, page, page_size))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn create_task(&self, section_id: u64, payload: &TaskPayload) -> Result<Task> {
        let response = self
            .request(Method::POST, &format!("/sections/{}/tasks", section_id))
            .json(payload)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn update_task(&self, task_id: u64, patch: &TaskPatch) -> Result<Task> {
        let response = self
            .request(Method::PATCH, &format!("/tasks/{}", task_id))
            .json(patch)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn delete_task(&self, task_id: u64) -> Result<()> {
        let response = self
            .request(Method::DELETE, &format!("/tasks/{}", task_id))
            .send()
            .await?;
        Self::expect_ok(response).await
    }

    async fn change_task_section(
        &self,
        task_id: u64,
        section_id: u64,
        neighbors: InsertionNeighbors,
    ) -> Result<()> {
        let body = serde_json::json!({
            "section_id": section_id,
            "before": neighbors.before,
            "after": neighbors.after,
        });
        let response = self
            .request(Method::POST, &format!("/tasks/{}/section", task_id))
            .json(&body)
            .send()
            .await?;
        Self::expect_ok(response).await
    }

    async fn reorder_task(
        &self,
        before: Option<u64>,
        moved: u64,
        after: Option<u64>,
    ) -> Result<()> {
        let body = serde_json::json!({
            "before": before,
            "moved": moved,
            "after": after,
        });
        let response = self
            .request(Method::POST, "/tasks/reorder")
            .json(&body)
            .send()
            .await?;
        Self::expect_ok(response).await
    }

    async fn bulk_delete(&self, task_ids: &[u64]) -> Result<()> {
        let body = serde_json::json!({ "task_ids": task_ids });
        let response = self
            .request(Method::POST, "/tasks/bulk/delete")
            .json(&body)
            .send()
            .await?;
        Self::expect_ok(response).await
    }

    async fn bulk_update(&self, task_ids: &[u64], patch: &TaskPatch) -> Result<()> {
        let body = serde_json::json!({ "task_ids": task_ids, "fields": patch });
        let response = self
            .request(Method::POST, "/tasks/bulk/update")
            .json(&body)
            .send()
            .await?;
        Self::expect_ok(response).await
    }

    async fn bulk_change_section(&self, task_ids: &[u64], section_id: u64) -> Result<()> {
        let body = serde_json::json!({ "task_ids": task_ids, "section_id": section_id });
        let response = self
            .request(Method::POST, "/tasks/bulk/section")
            .json(&body)
            .send()
            .await?;
        Self::expect_ok(response).await
    }

    async fn create_section(&self, project_id: u64, name: &str) -> Result<Section> {
        let body = serde_json::json!({ "name": name });
        let response = self
            .request(Method::POST, &format!("/projects/{}/sections", project_id))
            .json(&body)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn update_section(&self, section_id: u64, patch: &SectionPatch) -> Result<Section> {
        let response = self
            .request(Method::PATCH, &format!("/sections/{}", section_id))
            .json(patch)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn toggle_section_collapse(&self, section_id: u64) -> Result<bool> {
        let response = self
            .request(Method::POST, &format!("/sections/{}/collapse", section_id))
            .send()
            .await?;
        let parsed: CollapseResponse = Self::check(response).await?.json().await?;
        Ok(parsed.is_collapsed)
    }

    async fn delete_section(&self, section_id: u64, mode: SectionDeleteMode) -> Result<()> {
        let response = self
            .request(Method::DELETE, &format!("/sections/{}", section_id))
            .query(&[("mode", mode.as_str())])
            .send()
            .await?;
        Self::expect_ok(response).await
    }
}
