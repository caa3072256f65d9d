//! Tests for the REST client against a mock task service.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};
use taskboard::task::{
    adapters::http::HttpTaskRepository,
    domain::{Status, Task, TaskDraft, TaskId},
    ports::{TaskRepository, TaskRepositoryError},
    services::BoardService,
};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn task_json(id: &str, title: &str, status: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": "",
        "priority": "medium",
        "status": status,
        "startDate": "2025-01-06",
        "subTasks": []
    })
}

fn client_for(server: &MockServer) -> HttpTaskRepository {
    HttpTaskRepository::new(format!("{}/api/", server.uri()), Duration::from_secs(5))
        .expect("client builds")
}

#[tokio::test(flavor = "multi_thread")]
async fn lists_tasks_with_ajax_headers() {
    let server = MockServer::start().await;
    let plan = json!({
        "id": "1",
        "title": "Plan",
        "startDate": "2025-01-06",
        "subTasks": [task_json("1-1", "Outline", "active")]
    });
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .and(header("x-requested-with", "XMLHttpRequest"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([plan])))
        .expect(1)
        .mount(&server)
        .await;

    let tasks = client_for(&server).list_tasks().await.expect("listed");

    assert_eq!(tasks.len(), 1);
    let first = tasks.first().expect("plan listed");
    assert_eq!(first.id().as_str(), "1");
    let outline = first.subtasks().first().expect("outline nested");
    assert_eq!(outline.status(), Status::Active);
}

#[tokio::test(flavor = "multi_thread")]
async fn null_lists_read_as_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Value::Null))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/1/subtasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Value::Null))
        .mount(&server)
        .await;

    let client = client_for(&server);

    assert!(client.list_tasks().await.expect("listed").is_empty());
    assert!(
        client
            .list_subtasks(&TaskId::from("1"))
            .await
            .expect("listed")
            .is_empty()
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn create_accepts_wrapped_responses() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tasks"))
        .and(body_partial_json(json!({"title": "Plan", "status": "active"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "status": "created",
            "task": task_json("9", "Plan", "active")
        })))
        .mount(&server)
        .await;
    let draft = TaskDraft::new("Plan")
        .expect("valid draft")
        .with_status(Status::Active);

    let created = client_for(&server)
        .create_task(&draft)
        .await
        .expect("created");

    assert_eq!(created.id().as_str(), "9");
}

#[tokio::test(flavor = "multi_thread")]
async fn create_accepts_bare_responses() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(task_json("3", "Ship", "backlog")))
        .mount(&server)
        .await;

    let created = client_for(&server)
        .create_task(&TaskDraft::new("Ship").expect("valid draft"))
        .await
        .expect("created");

    assert_eq!(created.title().to_string(), "Ship");
}

#[tokio::test(flavor = "multi_thread")]
async fn subtasks_are_created_under_their_parent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tasks/1/subtasks"))
        .and(body_partial_json(json!({"title": "Outline"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(task_json("1-1", "Outline", "backlog")))
        .expect(1)
        .mount(&server)
        .await;

    let created = client_for(&server)
        .create_subtask(&TaskId::from("1"), &TaskDraft::new("Outline").expect("valid draft"))
        .await
        .expect("created");

    assert_eq!(created.id().as_str(), "1-1");
}

#[tokio::test(flavor = "multi_thread")]
async fn update_of_missing_task_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/tasks/404"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such task"))
        .mount(&server)
        .await;
    let task: Task =
        serde_json::from_value(task_json("404", "Ghost", "backlog")).expect("decodable task");

    let result = client_for(&server).update_task(&task).await;

    assert!(matches!(result, Err(TaskRepositoryError::NotFound(id)) if id.as_str() == "404"));
}

#[tokio::test(flavor = "multi_thread")]
async fn update_rejected_as_bad_request_keeps_the_service_message() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/tasks/77"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "task not found"})),
        )
        .mount(&server)
        .await;
    let task: Task =
        serde_json::from_value(task_json("77", "Gone", "backlog")).expect("decodable task");

    let result = client_for(&server).update_task(&task).await;

    assert!(matches!(
        &result,
        Err(TaskRepositoryError::Http { status: 400, message }) if message.contains("task not found")
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_accepts_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/tasks/7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .delete_task(&TaskId::from("7"))
        .await
        .expect("deleted");
}

#[tokio::test(flavor = "multi_thread")]
async fn server_errors_carry_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/tasks/1"))
        .respond_with(ResponseTemplate::new(422).set_body_string("title too long"))
        .mount(&server)
        .await;
    let task: Task =
        serde_json::from_value(task_json("1", "Plan", "backlog")).expect("decodable task");

    let error = client_for(&server)
        .update_task(&task)
        .await
        .expect_err("rejected");

    assert_eq!(error.to_string(), "HTTP 422: title too long");
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_bodies_are_decode_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let result = client_for(&server).list_tasks().await;

    assert!(matches!(result, Err(TaskRepositoryError::Decode(_))));
}

#[tokio::test(flavor = "multi_thread")]
async fn board_reports_failed_load_from_service() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let board = BoardService::new(Arc::new(client_for(&server)));

    let result = board.load().await;

    assert!(result.is_err());
    assert_eq!(
        board.error().as_deref(),
        Some("Failed to load tasks: HTTP 500: Unknown error")
    );
    assert!(board.tasks().is_empty());
}
