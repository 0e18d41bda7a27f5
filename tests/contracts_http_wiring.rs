//! End-to-end wiring tests for contracts and their payment installments.

mod support;

use axum::http::StatusCode;
use opsdeck::domain::foundation::ClientId;
use opsdeck::domain::member::Role;
use serde_json::json;

use support::{send, TestBackend};

#[tokio::test]
async fn contract_writes_require_the_finance_role() {
    let backend = TestBackend::new();
    let sales = backend
        .seed_member("sales@studio.test", "secret1", &[Role::Sales])
        .await;
    let token = backend.token_for(&sales);

    let (status, body) = send(
        backend.router(),
        "POST",
        "/api/contracts",
        Some(&token),
        Some(json!({
            "client_id": ClientId::new(),
            "title": "Retainer",
            "value_cents": 100_000
        })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");

    // Reads stay open to any logged-in member.
    let (status, _) = send(backend.router(), "GET", "/api/contracts", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn installment_lifecycle_drives_payment_progress() {
    let backend = TestBackend::new();
    let cfo = backend
        .seed_member("cfo@studio.test", "secret1", &[Role::Finance])
        .await;
    let token = backend.token_for(&cfo);

    let (status, contract) = send(
        backend.router(),
        "POST",
        "/api/contracts",
        Some(&token),
        Some(json!({
            "client_id": ClientId::new(),
            "title": "Website build",
            "value_cents": 800_000,
            "status": "active"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(contract["status"], "active");
    assert_eq!(contract["payments"].as_array().unwrap().len(), 0);
    assert_eq!(contract["installments_total_cents"], 0);
    assert_eq!(contract["payment_progress"], 0.0);
    let id = contract["id"].as_str().unwrap().to_string();

    let (status, contract) = send(
        backend.router(),
        "POST",
        &format!("/api/contracts/{}/payments", id),
        Some(&token),
        Some(json!({"amount_cents": 200_000, "due_date": "2026-09-01T00:00:00Z"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let first = contract["payments"][0]["id"].as_str().unwrap().to_string();

    let (status, contract) = send(
        backend.router(),
        "POST",
        &format!("/api/contracts/{}/payments", id),
        Some(&token),
        Some(json!({"amount_cents": 600_000, "due_date": "2026-10-01T00:00:00Z"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(contract["installments_total_cents"], 800_000);
    assert_eq!(contract["installments_paid_cents"], 0);

    // Settling the first installment moves the progress to 1/4.
    let (status, contract) = send(
        backend.router(),
        "PUT",
        &format!("/api/contracts/{}/payments/{}", id, first),
        Some(&token),
        Some(json!({
            "amount_cents": 200_000,
            "due_date": "2026-09-01T00:00:00Z",
            "paid": true
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(contract["installments_paid_cents"], 200_000);
    assert_eq!(contract["payment_progress"], 0.25);
    assert_eq!(contract["payments"][0]["paid"], true);
    assert!(!contract["payments"][0]["paid_at"].is_null());

    // The settled state survives a fresh read.
    let (_, reread) = send(
        backend.router(),
        "GET",
        &format!("/api/contracts/{}", id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(reread["installments_paid_cents"], 200_000);

    let (status, contract) = send(
        backend.router(),
        "DELETE",
        &format!("/api/contracts/{}/payments/{}", id, first),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(contract["payments"].as_array().unwrap().len(), 1);
    assert_eq!(contract["installments_total_cents"], 600_000);
    assert_eq!(contract["payment_progress"], 0.0);
}

#[tokio::test]
async fn deleted_contracts_and_unknown_payments_answer_404() {
    let backend = TestBackend::new();
    let cfo = backend
        .seed_member("cfo@studio.test", "secret1", &[Role::Finance])
        .await;
    let token = backend.token_for(&cfo);

    let (_, contract) = send(
        backend.router(),
        "POST",
        "/api/contracts",
        Some(&token),
        Some(json!({
            "client_id": ClientId::new(),
            "title": "Short engagement",
            "value_cents": 50_000
        })),
    )
    .await;
    let id = contract["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        backend.router(),
        "PUT",
        &format!(
            "/api/contracts/{}/payments/{}",
            id,
            opsdeck::domain::foundation::PaymentId::new()
        ),
        Some(&token),
        Some(json!({"amount_cents": 1_000, "due_date": "2026-09-01T00:00:00Z", "paid": false})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "PAYMENT_NOT_FOUND");

    let (status, _) = send(
        backend.router(),
        "DELETE",
        &format!("/api/contracts/{}", id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(
        backend.router(),
        "GET",
        &format!("/api/contracts/{}", id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "CONTRACT_NOT_FOUND");
}
