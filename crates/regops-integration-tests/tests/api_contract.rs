//! Conformance of the stub against the uniform per-resource REST contract,
//! exercised through both the typed and the untyped client.
//!
//! Every endpoint answers the `{ success, data, error }` envelope; ids are
//! UUID strings; the soft-delete lifecycle transitions are enforced with
//! 409/404 where a record is in the wrong state.

use serde_json::json;

use regops_client::{ApiConfig, ApiError, RegOpsClient};
use regops_records::{NewRegulation, Regulation, RegulationStatus};
use regops_stub::{router, StubState};

async fn start_stub() -> (u16, tokio::sync::oneshot::Sender<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind ephemeral port");
    let port = listener.local_addr().unwrap().port();

    let (tx, rx) = tokio::sync::oneshot::channel::<()>();
    let app = router(StubState::new());
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service())
            .with_graceful_shutdown(async {
                rx.await.ok();
            })
            .await
            .ok();
    });

    let client = reqwest::Client::new();
    for _ in 0..50 {
        if client
            .get(format!("http://127.0.0.1:{port}/health"))
            .send()
            .await
            .is_ok()
        {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }

    (port, tx)
}

fn client_for(port: u16, token: &str) -> RegOpsClient {
    RegOpsClient::new(ApiConfig::local(port, token).unwrap()).unwrap()
}

#[tokio::test]
async fn typed_client_round_trips_a_regulation() {
    let (port, _shutdown) = start_stub().await;
    let client = client_for(port, "acme:compliance:dev");
    let regulations = client.resource::<Regulation>();

    let created = regulations
        .create(&NewRegulation {
            title: "EU AI Act".to_string(),
            reference_code: Some("2024/1689".to_string()),
            authority: Some("European Parliament".to_string()),
            jurisdiction: Some("EU".to_string()),
            summary: None,
            effective_date: None,
            status: Some(RegulationStatus::UnderReview),
        })
        .await
        .unwrap();
    assert_eq!(created.title, "EU AI Act");
    assert_eq!(created.tenant_id.as_str(), "acme");
    assert!(created.lifecycle.is_active());

    // Get echoes the same record; an unknown id is None, not an error.
    let fetched = regulations.get(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.reference_code.as_deref(), Some("2024/1689"));
    assert!(regulations
        .get(regops_core::RecordId::new())
        .await
        .unwrap()
        .is_none());

    // Update merges the patch and refreshes updated_at.
    let updated = regulations
        .update(created.id, &json!({"summary": "Risk-based AI obligations"}))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.summary.as_deref(), Some("Risk-based AI obligations"));
    assert_eq!(updated.title, "EU AI Act");
    assert!(updated.lifecycle.updated_at() > updated.lifecycle.created_at());

    // Delete and restore echo the record through its state changes.
    let tombstone = regulations.delete(created.id).await.unwrap().unwrap();
    assert!(tombstone.lifecycle.is_deleted());
    assert_eq!(tombstone.lifecycle.deleted_by(), Some("compliance"));

    assert_eq!(regulations.list().await.unwrap().len(), 0);
    assert_eq!(regulations.list_deleted().await.unwrap().len(), 1);

    let restored = regulations.restore(created.id).await.unwrap().unwrap();
    assert!(restored.lifecycle.is_active());
    assert_eq!(regulations.list().await.unwrap().len(), 1);

    // Purge requires a tombstone and removes it for good.
    regulations.delete(created.id).await.unwrap();
    regulations.purge(created.id).await.unwrap();
    assert!(regulations.get(created.id).await.unwrap().is_none());
    assert_eq!(regulations.list_deleted().await.unwrap().len(), 0);
}

#[tokio::test]
async fn raw_client_speaks_the_same_contract() {
    let (port, _shutdown) = start_stub().await;
    let client = client_for(port, "acme:ops:dev");
    let inventory = client.raw("privacy", "data-inventory");

    let created = inventory
        .create(&json!({
            "asset_name": "CRM export bucket",
            "owning_system": "crm",
            "data_categories": ["contact", "billing"],
            "sensitivity_level": "CONFIDENTIAL"
        }))
        .await
        .unwrap();
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["tenant_id"], "acme");
    assert_eq!(created["is_deleted"], false);
    assert!(created["created_at"].is_string());

    let listed = inventory.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], json!(id));

    let updated = inventory
        .update(&id, &json!({"retention_period_days": 365}))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated["retention_period_days"], 365);
    assert_eq!(updated["asset_name"], "CRM export bucket");

    let tombstone = inventory.delete(&id).await.unwrap().unwrap();
    assert_eq!(tombstone["is_deleted"], true);
    assert_eq!(inventory.list().await.unwrap().len(), 0);
    assert_eq!(inventory.list_deleted().await.unwrap().len(), 1);

    inventory.purge(&id).await.unwrap();
    assert!(inventory.get(&id).await.unwrap().is_none());
}

#[tokio::test]
async fn lifecycle_state_errors_carry_the_http_status() {
    let (port, _shutdown) = start_stub().await;
    let client = client_for(port, "acme:ops:dev");
    let risks = client.raw("risk", "risks");

    let created = risks
        .create(&json!({"title": "Phishing", "likelihood": 2, "impact": 2}))
        .await
        .unwrap();
    let id = created["id"].as_str().unwrap().to_string();

    // Restoring an active record conflicts.
    let err = risks.restore(&id).await.unwrap_err();
    assert_eq!(err.status_code(), Some(409));

    // Deleting twice conflicts; purging an unknown id is a 404.
    risks.delete(&id).await.unwrap();
    let err = risks.delete(&id).await.unwrap_err();
    assert_eq!(err.status_code(), Some(409));

    let unknown = regops_core::RecordId::new().to_string();
    let err = risks.purge(&unknown).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn malformed_bearer_token_is_rejected_with_401() {
    let (port, _shutdown) = start_stub().await;
    // Two-segment token: well-formed tokens need tenant:principal:secret.
    let client = client_for(port, "acme:ops");

    let err = client.raw("risk", "risks").list().await.unwrap_err();
    match err {
        ApiError::Status { status, body, .. } => {
            assert_eq!(status, 401);
            assert!(body.contains("\"success\":false"));
        }
        other => panic!("expected a status error, got {other:?}"),
    }
}
