//! End-to-end wiring tests for the meetings calendar.

mod support;

use axum::http::StatusCode;
use opsdeck::domain::member::Role;
use serde_json::json;

use support::{send, TestBackend};

#[tokio::test]
async fn meeting_crud_round_trips() {
    let backend = TestBackend::new();
    let member = backend
        .seed_member("ops@studio.test", "secret1", &[Role::Projects])
        .await;
    let token = backend.token_for(&member);

    let (status, meeting) = send(
        backend.router(),
        "POST",
        "/api/meetings",
        Some(&token),
        Some(json!({
            "title": "Kickoff",
            "scheduled_at": "2026-09-03T14:00:00Z",
            "duration_minutes": 60,
            "location": "Office"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(meeting["title"], "Kickoff");
    assert_eq!(meeting["duration_minutes"], 60);
    assert_eq!(meeting["location"], "Office");
    let id = meeting["id"].as_str().unwrap().to_string();

    let (status, reread) = send(
        backend.router(),
        "GET",
        &format!("/api/meetings/{}", id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reread["scheduled_at"], meeting["scheduled_at"]);

    let (status, updated) = send(
        backend.router(),
        "PUT",
        &format!("/api/meetings/{}", id),
        Some(&token),
        Some(json!({
            "title": "Kickoff (rescheduled)",
            "scheduled_at": "2026-09-04T10:00:00Z",
            "duration_minutes": 45
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Kickoff (rescheduled)");
    assert_eq!(updated["duration_minutes"], 45);
    // Optional fields not resent are cleared, not merged.
    assert!(updated["location"].is_null());

    let (status, _) = send(
        backend.router(),
        "DELETE",
        &format!("/api/meetings/{}", id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(
        backend.router(),
        "GET",
        &format!("/api/meetings/{}", id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "MEETING_NOT_FOUND");
}

#[tokio::test]
async fn list_filters_by_schedule_window_soonest_first() {
    let backend = TestBackend::new();
    let member = backend
        .seed_member("ops@studio.test", "secret1", &[Role::Projects])
        .await;
    let token = backend.token_for(&member);

    for (title, when) in [
        ("June review", "2026-06-01T09:00:00Z"),
        ("Mid-June sync", "2026-06-15T09:00:00Z"),
        ("July planning", "2026-07-01T09:00:00Z"),
    ] {
        let (status, _) = send(
            backend.router(),
            "POST",
            "/api/meetings",
            Some(&token),
            Some(json!({"title": title, "scheduled_at": when, "duration_minutes": 30})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, all) = send(backend.router(), "GET", "/api/meetings", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["June review", "Mid-June sync", "July planning"]);

    let (status, windowed) = send(
        backend.router(),
        "GET",
        "/api/meetings?from=2026-06-10T00:00:00Z&to=2026-06-30T00:00:00Z",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let windowed = windowed.as_array().unwrap();
    assert_eq!(windowed.len(), 1);
    assert_eq!(windowed[0]["title"], "Mid-June sync");
}

#[tokio::test]
async fn zero_duration_meetings_are_rejected() {
    let backend = TestBackend::new();
    let member = backend
        .seed_member("ops@studio.test", "secret1", &[Role::Projects])
        .await;
    let token = backend.token_for(&member);

    let (status, body) = send(
        backend.router(),
        "POST",
        "/api/meetings",
        Some(&token),
        Some(json!({
            "title": "Instant",
            "scheduled_at": "2026-09-03T14:00:00Z",
            "duration_minutes": 0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "OUT_OF_RANGE");
}
