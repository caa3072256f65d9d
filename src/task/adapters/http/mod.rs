//! REST client for the remote task service.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, warn};

use crate::task::{
    domain::{Task, TaskDraft, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// `POST /tasks` answers either with the task or with a status envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum CreatedTaskBody {
    Wrapped { task: Task },
    Bare(Task),
}

impl CreatedTaskBody {
    fn into_task(self) -> Task {
        match self {
            Self::Wrapped { task } | Self::Bare(task) => task,
        }
    }
}

/// Task repository backed by the task service's REST API.
///
/// Requests are numbered from 1 per client; the number appears in every log
/// record about the request.
#[derive(Debug)]
pub struct HttpTaskRepository {
    client: Client,
    base_url: String,
    requests: AtomicU64,
}

impl HttpTaskRepository {
    /// Creates a client for the service rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Network`] when the HTTP client cannot be
    /// initialized.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> TaskRepositoryResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            HeaderName::from_static("x-requested-with"),
            HeaderValue::from_static("XMLHttpRequest"),
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(TaskRepositoryError::network)?;
        let base: String = base_url.into();
        Ok(Self {
            client,
            base_url: base.trim_end_matches('/').to_owned(),
            requests: AtomicU64::new(0),
        })
    }

    /// Returns the base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn tasks_url(&self) -> String {
        format!("{}/tasks", self.base_url)
    }

    fn task_url(&self, id: &TaskId) -> String {
        format!("{}/tasks/{id}", self.base_url)
    }

    fn subtasks_url(&self, id: &TaskId) -> String {
        format!("{}/tasks/{id}/subtasks", self.base_url)
    }

    /// Sends a request and turns non-success statuses into errors.
    ///
    /// When `target` is set, `404 Not Found` becomes
    /// [`TaskRepositoryError::NotFound`] for that identifier. The service
    /// answers `PUT /tasks/{id}` for an unknown task with `400 Bad Request`,
    /// the same status it uses for invalid bodies, so updates surface that
    /// case as [`TaskRepositoryError::Http`] carrying the service's message.
    async fn send(
        &self,
        builder: RequestBuilder,
        target: Option<&TaskId>,
    ) -> TaskRepositoryResult<Response> {
        let request_id = self.requests.fetch_add(1, Ordering::Relaxed) + 1;
        let request = builder.build().map_err(TaskRepositoryError::network)?;
        let method = request.method().clone();
        let url = request.url().clone();
        debug!(request_id, %method, %url, "starting request");

        let response = self.client.execute(request).await.map_err(|err| {
            warn!(request_id, %method, %url, error = %err, "request failed");
            TaskRepositoryError::network(err)
        })?;

        let status = response.status();
        if status.is_success() {
            debug!(request_id, status = status.as_u16(), "request succeeded");
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        warn!(request_id, status = status.as_u16(), message = %text, "request rejected");
        match target {
            Some(id) if status == StatusCode::NOT_FOUND => {
                Err(TaskRepositoryError::NotFound(id.clone()))
            }
            _ => Err(TaskRepositoryError::http(status.as_u16(), text)),
        }
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> TaskRepositoryResult<T> {
        let bytes = response.bytes().await.map_err(TaskRepositoryError::network)?;
        serde_json::from_slice(&bytes).map_err(TaskRepositoryError::decode)
    }

    /// Lists may arrive as `null` when the service has nothing to return.
    async fn read_list(response: Response) -> TaskRepositoryResult<Vec<Task>> {
        Self::read_json::<Option<Vec<Task>>>(response)
            .await
            .map(Option::unwrap_or_default)
    }
}

#[async_trait]
impl TaskRepository for HttpTaskRepository {
    async fn list_tasks(&self) -> TaskRepositoryResult<Vec<Task>> {
        let response = self.send(self.client.get(self.tasks_url()), None).await?;
        Self::read_list(response).await
    }

    async fn create_task(&self, draft: &TaskDraft) -> TaskRepositoryResult<Task> {
        let request = self.client.post(self.tasks_url()).json(draft);
        let response = self.send(request, None).await?;
        Self::read_json::<CreatedTaskBody>(response)
            .await
            .map(CreatedTaskBody::into_task)
    }

    async fn update_task(&self, task: &Task) -> TaskRepositoryResult<Task> {
        let request = self.client.put(self.task_url(task.id())).json(task);
        let response = self.send(request, Some(task.id())).await?;
        Self::read_json(response).await
    }

    async fn delete_task(&self, id: &TaskId) -> TaskRepositoryResult<()> {
        self.send(self.client.delete(self.task_url(id)), Some(id))
            .await?;
        Ok(())
    }

    async fn list_subtasks(&self, parent_id: &TaskId) -> TaskRepositoryResult<Vec<Task>> {
        let request = self.client.get(self.subtasks_url(parent_id));
        let response = self.send(request, Some(parent_id)).await?;
        Self::read_list(response).await
    }

    async fn create_subtask(
        &self,
        parent_id: &TaskId,
        draft: &TaskDraft,
    ) -> TaskRepositoryResult<Task> {
        let request = self.client.post(self.subtasks_url(parent_id)).json(draft);
        let response = self.send(request, Some(parent_id)).await?;
        Self::read_json(response).await
    }
}
