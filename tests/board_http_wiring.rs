//! End-to-end wiring tests for the project board endpoints.
//!
//! Drives the real router (auth middleware included) over in-memory stores
//! and checks the drag-and-drop flow the dashboard depends on.

mod support;

use axum::http::StatusCode;
use opsdeck::domain::foundation::{ProjectId, TaskId};
use opsdeck::domain::member::Role;
use serde_json::json;

use support::{send, TestBackend};

#[tokio::test]
async fn requests_without_a_token_are_rejected() {
    let backend = TestBackend::new();

    let (status, body) = send(backend.router(), "GET", "/api/projects", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn garbage_tokens_are_rejected_by_the_middleware() {
    let backend = TestBackend::new();

    let (status, body) = send(
        backend.router(),
        "GET",
        "/api/projects",
        Some("not.a.jwt"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn creates_a_project_with_cards_and_moves_one_across_columns() {
    let backend = TestBackend::new();
    let member = backend
        .seed_member("pm@studio.test", "secret1", &[Role::Projects])
        .await;
    let token = backend.token_for(&member);

    let (status, project) = send(
        backend.router(),
        "POST",
        "/api/projects",
        Some(&token),
        Some(json!({"kind": "internal", "name": "Website refresh"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(project["status"], "planning");
    let project_id = project["id"].as_str().unwrap().to_string();

    // New cards land at the bottom of the backlog in creation order.
    let mut card_ids = Vec::new();
    for (index, title) in ["Design", "Build", "Launch"].iter().enumerate() {
        let (status, card) = send(
            backend.router(),
            "POST",
            &format!("/api/projects/{}/tasks", project_id),
            Some(&token),
            Some(json!({"title": title})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(card["status"], "backlog");
        assert_eq!(card["position"], index as i64);
        card_ids.push(card["id"].as_str().unwrap().to_string());
    }

    let (status, board) = send(
        backend.router(),
        "POST",
        &format!("/api/projects/{}/tasks/{}/move", project_id, card_ids[0]),
        Some(&token),
        Some(json!({"status": "in_progress", "position": 0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let board = board.as_array().unwrap();
    assert_eq!(board.len(), 3);

    let find = |id: &str| board.iter().find(|t| t["id"] == *id).unwrap();
    let moved = find(&card_ids[0]);
    assert_eq!(moved["status"], "in_progress");
    assert_eq!(moved["position"], 0);

    // The source column closes the gap.
    assert_eq!(find(&card_ids[1])["status"], "backlog");
    assert_eq!(find(&card_ids[1])["position"], 0);
    assert_eq!(find(&card_ids[2])["position"], 1);
}

#[tokio::test]
async fn task_lookups_are_scoped_to_the_project_in_the_path() {
    let backend = TestBackend::new();
    let member = backend
        .seed_member("pm@studio.test", "secret1", &[Role::Projects])
        .await;
    let token = backend.token_for(&member);

    let (_, project_a) = send(
        backend.router(),
        "POST",
        "/api/projects",
        Some(&token),
        Some(json!({"kind": "internal", "name": "A"})),
    )
    .await;
    let (_, project_b) = send(
        backend.router(),
        "POST",
        "/api/projects",
        Some(&token),
        Some(json!({"kind": "internal", "name": "B"})),
    )
    .await;

    let (_, card) = send(
        backend.router(),
        "POST",
        &format!("/api/projects/{}/tasks", project_a["id"].as_str().unwrap()),
        Some(&token),
        Some(json!({"title": "Only in A"})),
    )
    .await;

    // Reaching the card through the wrong project answers 404, not a leak.
    let (status, body) = send(
        backend.router(),
        "POST",
        &format!(
            "/api/projects/{}/tasks/{}/move",
            project_b["id"].as_str().unwrap(),
            card["id"].as_str().unwrap()
        ),
        Some(&token),
        Some(json!({"status": "done", "position": 0})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "TASK_NOT_FOUND");
}

#[tokio::test]
async fn unknown_project_and_task_answer_404() {
    let backend = TestBackend::new();
    let member = backend
        .seed_member("pm@studio.test", "secret1", &[Role::Projects])
        .await;
    let token = backend.token_for(&member);

    let (status, body) = send(
        backend.router(),
        "GET",
        &format!("/api/projects/{}", ProjectId::new()),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "PROJECT_NOT_FOUND");

    let (_, project) = send(
        backend.router(),
        "POST",
        "/api/projects",
        Some(&token),
        Some(json!({"kind": "internal", "name": "A"})),
    )
    .await;
    let (status, body) = send(
        backend.router(),
        "POST",
        &format!(
            "/api/projects/{}/tasks/{}/move",
            project["id"].as_str().unwrap(),
            TaskId::new()
        ),
        Some(&token),
        Some(json!({"status": "done", "position": 0})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "TASK_NOT_FOUND");
}

#[tokio::test]
async fn client_projects_require_a_client_link() {
    let backend = TestBackend::new();
    let member = backend
        .seed_member("pm@studio.test", "secret1", &[Role::Projects])
        .await;
    let token = backend.token_for(&member);

    let (status, body) = send(
        backend.router(),
        "POST",
        "/api/projects",
        Some(&token),
        Some(json!({"kind": "client", "name": "No client attached"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
}
