//! Contract tests for the typed and raw resource clients.
//!
//! These tests use wiremock to simulate the RegOps GRC API. Every path and
//! response shape follows the uniform `/api/<module>/<resource>` contract
//! with the `{ "success": bool, "data": ... }` envelope; the risk register
//! stands in for the typed side because it exercises the most field kinds
//! (ratings, server-computed score, calendar dates, soft-delete triad).
//!
//! ## Endpoints Tested
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | GET    | `/api/risk/risks` | `list_*` |
//! | GET    | `/api/risk/risks/deleted` | `list_deleted_*` |
//! | GET    | `/api/risk/risks/{id}` | `get_*` |
//! | POST   | `/api/risk/risks` | `create_*` |
//! | PUT    | `/api/risk/risks/{id}` | `update_*` |
//! | DELETE | `/api/risk/risks/{id}` | `delete_*` |
//! | POST   | `/api/risk/risks/{id}/restore` | `restore_*` |
//! | DELETE | `/api/risk/risks/{id}/permanent` | `purge_*` |
//! | *      | `/api/<module>/<resource>` (untyped) | `raw_*` |

use regops_client::{ApiConfig, ApiError, RegOpsClient, ResourceClient};
use regops_core::RecordId;
use regops_records::{NewRiskEntry, RiskEntry, RiskStatus};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zeroize::Zeroizing;

const RISK_ID: &str = "c63cb0f2-0a86-4b95-a2c7-3f1b4f0b8d11";

/// Build a RegOpsClient pointed at a wiremock server.
async fn test_client(mock_server: &MockServer) -> RegOpsClient {
    let config = ApiConfig {
        base_url: mock_server.uri().parse().unwrap(),
        api_token: Some(Zeroizing::new("acme:ops:secret".into())),
        timeout_secs: 5,
    };
    RegOpsClient::new(config).unwrap()
}

async fn risk_client(mock_server: &MockServer) -> ResourceClient<RiskEntry> {
    test_client(mock_server).await.resource::<RiskEntry>()
}

// ── GET /api/risk/risks ──────────────────────────────────────────────

#[tokio::test]
async fn list_returns_records_in_server_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/risk/risks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": [
                {
                    "id": RISK_ID,
                    "tenant_id": "acme",
                    "title": "Unencrypted backups",
                    "category": "information-security",
                    "likelihood": 4,
                    "impact": 5,
                    "risk_score": 20,
                    "status": "MITIGATING",
                    "created_at": "2024-06-01T08:00:00Z",
                    "updated_at": "2024-06-10T08:00:00Z"
                },
                {
                    "id": "9d2cf1de-5a0e-44c5-9c70-1c3a5ad3a001",
                    "tenant_id": "acme",
                    "title": "Vendor concentration",
                    "likelihood": 2,
                    "impact": 3,
                    "risk_score": 6,
                    "status": "OPEN",
                    "created_at": "2024-06-02T08:00:00Z",
                    "updated_at": "2024-06-02T08:00:00Z"
                }
            ]
        })))
        .mount(&mock_server)
        .await;

    let risks = risk_client(&mock_server).await.list().await.unwrap();
    assert_eq!(risks.len(), 2);
    assert_eq!(risks[0].title, "Unencrypted backups");
    assert_eq!(risks[0].risk_score, Some(20));
    assert_eq!(risks[0].status, RiskStatus::Mitigating);
    assert_eq!(risks[1].title, "Vendor concentration");
    assert!(risks.iter().all(|r| !r.lifecycle.is_deleted()));
}

#[tokio::test]
async fn list_sends_bearer_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/risk/risks"))
        .and(header("authorization", "Bearer acme:ops:secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": []
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let risks = risk_client(&mock_server).await.list().await.unwrap();
    assert!(risks.is_empty());
}

#[tokio::test]
async fn list_surfaces_application_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/risk/risks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": false,
            "error": "tenant suspended"
        })))
        .mount(&mock_server)
        .await;

    let result = risk_client(&mock_server).await.list().await;
    match result.unwrap_err() {
        ApiError::Application { message, .. } => assert_eq!(message, "tenant suspended"),
        other => panic!("expected Application error, got: {other:?}"),
    }
}

#[tokio::test]
async fn list_maps_http_500_to_status_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/risk/risks"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let err = risk_client(&mock_server).await.list().await.unwrap_err();
    assert_eq!(err.status_code(), Some(500));
    match err {
        ApiError::Status { status, body, .. } => {
            assert_eq!(status, 500);
            assert!(body.contains("Internal Server Error"));
        }
        other => panic!("expected Status error, got: {other:?}"),
    }
}

// ── GET /api/risk/risks/deleted ──────────────────────────────────────

#[tokio::test]
async fn list_deleted_returns_tombstoned_records() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/risk/risks/deleted"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": [{
                "id": RISK_ID,
                "tenant_id": "acme",
                "title": "Retired risk",
                "likelihood": 1,
                "impact": 1,
                "risk_score": 1,
                "status": "CLOSED",
                "created_at": "2024-06-01T08:00:00Z",
                "updated_at": "2024-06-20T08:00:00Z",
                "is_deleted": true,
                "deleted_at": "2024-06-20T08:00:00Z",
                "deleted_by": "dpo@acme.example"
            }]
        })))
        .mount(&mock_server)
        .await;

    let deleted = risk_client(&mock_server).await.list_deleted().await.unwrap();
    assert_eq!(deleted.len(), 1);
    assert!(deleted[0].lifecycle.is_deleted());
    assert_eq!(deleted[0].lifecycle.deleted_by(), Some("dpo@acme.example"));
}

// ── GET /api/risk/risks/{id} ─────────────────────────────────────────

#[tokio::test]
async fn get_returns_record_when_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/api/risk/risks/{RISK_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {
                "id": RISK_ID,
                "tenant_id": "acme",
                "title": "Unencrypted backups",
                "likelihood": 4,
                "impact": 5,
                "risk_score": 20,
                "status": "MITIGATING",
                "created_at": "2024-06-01T08:00:00Z",
                "updated_at": "2024-06-10T08:00:00Z"
            }
        })))
        .mount(&mock_server)
        .await;

    let id: RecordId = RISK_ID.parse().unwrap();
    let risk = risk_client(&mock_server).await.get(id).await.unwrap();
    assert!(risk.is_some());
    assert_eq!(risk.unwrap().id, id);
}

#[tokio::test]
async fn get_returns_none_on_404() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/api/risk/risks/{RISK_ID}")))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "success": false,
            "error": "not found"
        })))
        .mount(&mock_server)
        .await;

    let id: RecordId = RISK_ID.parse().unwrap();
    let risk = risk_client(&mock_server).await.get(id).await.unwrap();
    assert!(risk.is_none());
}

// ── POST /api/risk/risks ─────────────────────────────────────────────

#[tokio::test]
async fn create_sends_exact_payload_and_returns_record() {
    let mock_server = MockServer::start().await;

    // The request body must never carry a client-side risk_score; the
    // server derives it and the created record comes back with it set.
    Mock::given(method("POST"))
        .and(path("/api/risk/risks"))
        .and(body_json(serde_json::json!({
            "title": "Key person dependency",
            "category": "operational",
            "likelihood": 3,
            "impact": 4
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "success": true,
            "data": {
                "id": RISK_ID,
                "tenant_id": "acme",
                "title": "Key person dependency",
                "category": "operational",
                "likelihood": 3,
                "impact": 4,
                "risk_score": 12,
                "status": "OPEN",
                "created_at": "2024-06-15T08:00:00Z",
                "updated_at": "2024-06-15T08:00:00Z"
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let payload = NewRiskEntry::new("Key person dependency", 3, 4)
        .unwrap()
        .with_category("operational");
    let created = risk_client(&mock_server)
        .await
        .create(&payload)
        .await
        .unwrap();
    assert_eq!(created.title, "Key person dependency");
    assert_eq!(created.risk_score, Some(12));
    assert!(!created.lifecycle.is_deleted());
}

// ── PUT /api/risk/risks/{id} ─────────────────────────────────────────

#[tokio::test]
async fn update_sends_patch_and_returns_merged_record() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path(format!("/api/risk/risks/{RISK_ID}")))
        .and(body_json(serde_json::json!({"status": "ACCEPTED"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {
                "id": RISK_ID,
                "tenant_id": "acme",
                "title": "Unencrypted backups",
                "likelihood": 4,
                "impact": 5,
                "risk_score": 20,
                "status": "ACCEPTED",
                "created_at": "2024-06-01T08:00:00Z",
                "updated_at": "2024-06-21T09:30:00Z"
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let id: RecordId = RISK_ID.parse().unwrap();
    let patch = serde_json::json!({"status": "ACCEPTED"});
    let updated = risk_client(&mock_server)
        .await
        .update(id, &patch)
        .await
        .unwrap();
    assert_eq!(updated.unwrap().status, RiskStatus::Accepted);
}

#[tokio::test]
async fn update_unknown_id_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path(format!("/api/risk/risks/{RISK_ID}")))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&mock_server)
        .await;

    let id: RecordId = RISK_ID.parse().unwrap();
    let patch = serde_json::json!({"status": "ACCEPTED"});
    let err = risk_client(&mock_server)
        .await
        .update(id, &patch)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

// ── DELETE /api/risk/risks/{id} ──────────────────────────────────────

#[tokio::test]
async fn delete_returns_server_tombstone() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!("/api/risk/risks/{RISK_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {
                "id": RISK_ID,
                "tenant_id": "acme",
                "title": "Unencrypted backups",
                "likelihood": 4,
                "impact": 5,
                "risk_score": 20,
                "status": "MITIGATING",
                "created_at": "2024-06-01T08:00:00Z",
                "updated_at": "2024-06-22T10:00:00Z",
                "is_deleted": true,
                "deleted_at": "2024-06-22T10:00:00Z",
                "deleted_by": "ops"
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let id: RecordId = RISK_ID.parse().unwrap();
    let tombstone = risk_client(&mock_server).await.delete(id).await.unwrap();
    let tombstone = tombstone.unwrap();
    assert!(tombstone.lifecycle.is_deleted());
    assert_eq!(tombstone.lifecycle.deleted_by(), Some("ops"));
}

#[tokio::test]
async fn delete_with_bare_success_returns_none() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!("/api/risk/risks/{RISK_ID}")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"success": true})),
        )
        .mount(&mock_server)
        .await;

    let id: RecordId = RISK_ID.parse().unwrap();
    let tombstone = risk_client(&mock_server).await.delete(id).await.unwrap();
    assert!(tombstone.is_none());
}

// ── POST /api/risk/risks/{id}/restore ────────────────────────────────

#[tokio::test]
async fn restore_returns_record_with_cleared_tombstone() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/api/risk/risks/{RISK_ID}/restore")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {
                "id": RISK_ID,
                "tenant_id": "acme",
                "title": "Unencrypted backups",
                "likelihood": 4,
                "impact": 5,
                "risk_score": 20,
                "status": "MITIGATING",
                "created_at": "2024-06-01T08:00:00Z",
                "updated_at": "2024-06-23T11:00:00Z",
                "is_deleted": false
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let id: RecordId = RISK_ID.parse().unwrap();
    let restored = risk_client(&mock_server).await.restore(id).await.unwrap();
    let restored = restored.unwrap();
    assert!(restored.lifecycle.is_active());
    assert!(restored.lifecycle.deleted_at().is_none());
}

// ── DELETE /api/risk/risks/{id}/permanent ────────────────────────────

#[tokio::test]
async fn purge_accepts_bare_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!("/api/risk/risks/{RISK_ID}/permanent")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"success": true})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let id: RecordId = RISK_ID.parse().unwrap();
    assert!(risk_client(&mock_server).await.purge(id).await.is_ok());
}

#[tokio::test]
async fn purge_of_active_record_maps_conflict() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(format!("/api/risk/risks/{RISK_ID}/permanent")))
        .respond_with(ResponseTemplate::new(409).set_body_string("record is not deleted"))
        .mount(&mock_server)
        .await;

    let id: RecordId = RISK_ID.parse().unwrap();
    let err = risk_client(&mock_server).await.purge(id).await.unwrap_err();
    assert_eq!(err.status_code(), Some(409));
}

// ── Untyped access via RawResourceClient ─────────────────────────────

#[tokio::test]
async fn raw_client_addresses_runtime_path_segments() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/privacy/dsr-requests"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": [{
                "id": "7f1d9e22-6f6a-49d8-9f6a-2b8a0d9c4e55",
                "tenant_id": "acme",
                "subject_name": "Jordan Vega",
                "request_type": "ERASURE",
                "status": "RECEIVED",
                "created_at": "2024-06-01T08:00:00Z",
                "updated_at": "2024-06-01T08:00:00Z"
            }]
        })))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server).await;
    let records = client.raw("privacy", "dsr-requests").list().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["subject_name"], "Jordan Vega");
}

#[tokio::test]
async fn raw_get_returns_none_on_404() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/audit/audits/nonexistent-id"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server).await;
    let record = client
        .raw("audit", "audits")
        .get("nonexistent-id")
        .await
        .unwrap();
    assert!(record.is_none());
}

// ── Serde resilience (forward compatibility) ─────────────────────────

#[tokio::test]
async fn record_tolerates_unknown_fields_and_statuses() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/api/risk/risks/{RISK_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {
                "id": RISK_ID,
                "tenant_id": "acme",
                "title": "Forward-compat risk",
                "likelihood": 2,
                "impact": 2,
                "status": "QUANTIFIED",
                "heat_map_cell": "B2",
                "created_at": "2024-06-01T08:00:00Z",
                "updated_at": "2024-06-01T08:00:00Z"
            }
        })))
        .mount(&mock_server)
        .await;

    let id: RecordId = RISK_ID.parse().unwrap();
    let risk = risk_client(&mock_server)
        .await
        .get(id)
        .await
        .unwrap()
        .unwrap();
    // Unknown status maps to the catch-all variant; the absent soft-delete
    // triad reads back as an active record.
    assert_eq!(risk.status, RiskStatus::Unknown);
    assert!(risk.lifecycle.is_active());
    assert_eq!(risk.risk_score, None);
}
