//! Route definitions for the RegOps API stub.
//!
//! One generic route set serves every `(module, resource)` pair with the
//! uniform envelope contract `regops-client` speaks: active/deleted lists,
//! create, shallow-merge update, soft delete, restore, and permanent
//! delete, all scoped to the tenant carried in the bearer token.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::auth::{self, Principal};
use crate::store::{CollectionKey, StubState};

/// Build the complete router with all stub routes.
pub fn router(state: StubState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/:module/:resource", get(list_active).post(create))
        .route("/api/:module/:resource/deleted", get(list_deleted))
        .route(
            "/api/:module/:resource/:id",
            get(show).put(update).delete(soft_delete),
        )
        .route("/api/:module/:resource/:id/restore", post(restore))
        .route("/api/:module/:resource/:id/permanent", delete(purge))
        .fallback(not_implemented)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ── Envelope helpers ────────────────────────────────────────────────

fn ok_data(data: Value) -> Response {
    Json(json!({"success": true, "data": data})).into_response()
}

fn ok_bare() -> Response {
    Json(json!({"success": true})).into_response()
}

fn reject(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({"success": false, "error": message}))).into_response()
}

fn authorize(state: &StubState, headers: &HeaderMap) -> Result<Principal, Response> {
    auth::authenticate(headers, state.secret())
        .map_err(|err| reject(StatusCode::UNAUTHORIZED, err.message()))
}

// ── Record helpers ──────────────────────────────────────────────────

// Fixed-width stamps keep the lexicographic sort chronological.
fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn collection_key(caller: &Principal, module: &str, resource: &str) -> CollectionKey {
    CollectionKey {
        tenant: caller.tenant.clone(),
        module: module.to_string(),
        resource: resource.to_string(),
    }
}

fn is_deleted(record: &Value) -> bool {
    record
        .get("is_deleted")
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

fn sort_key(record: &Value) -> (String, String) {
    (
        record
            .get("created_at")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string(),
        record
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string(),
    )
}

/// Server-computed composite for the risk register. Recomputed on create
/// and whenever an update touches either factor; clients never send it.
fn derive_risk_score(record: &mut Value) {
    let likelihood = record.get("likelihood").and_then(Value::as_u64);
    let impact = record.get("impact").and_then(Value::as_u64);
    if let (Some(likelihood), Some(impact), Some(fields)) =
        (likelihood, impact, record.as_object_mut())
    {
        fields.insert("risk_score".to_string(), json!(likelihood * impact));
    }
}

fn is_risk_register(module: &str, resource: &str) -> bool {
    module == "risk" && resource == "risks"
}

// ── Health ──────────────────────────────────────────────────────────

async fn health() -> StatusCode {
    StatusCode::OK
}

// ── Collection routes ───────────────────────────────────────────────

async fn list_active(
    State(state): State<StubState>,
    Path((module, resource)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let caller = match authorize(&state, &headers) {
        Ok(principal) => principal,
        Err(resp) => return resp,
    };
    ok_data(Value::Array(collect_sorted(
        &state, &caller, &module, &resource, false,
    )))
}

async fn list_deleted(
    State(state): State<StubState>,
    Path((module, resource)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let caller = match authorize(&state, &headers) {
        Ok(principal) => principal,
        Err(resp) => return resp,
    };
    ok_data(Value::Array(collect_sorted(
        &state, &caller, &module, &resource, true,
    )))
}

fn collect_sorted(
    state: &StubState,
    caller: &Principal,
    module: &str,
    resource: &str,
    deleted: bool,
) -> Vec<Value> {
    let key = collection_key(caller, module, resource);
    let mut records: Vec<Value> = match state.collections().get(&key) {
        Some(collection) => collection
            .iter()
            .map(|entry| entry.value().clone())
            .filter(|record| is_deleted(record) == deleted)
            .collect(),
        None => Vec::new(),
    };
    records.sort_by(|a, b| sort_key(a).cmp(&sort_key(b)));
    records
}

async fn create(
    State(state): State<StubState>,
    Path((module, resource)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let caller = match authorize(&state, &headers) {
        Ok(principal) => principal,
        Err(resp) => return resp,
    };
    let Value::Object(mut fields) = body else {
        return reject(StatusCode::BAD_REQUEST, "request body must be a JSON object");
    };

    let id = Uuid::new_v4();
    let now = timestamp();
    fields.insert("id".to_string(), json!(id.to_string()));
    fields.insert("tenant_id".to_string(), json!(caller.tenant));
    fields.insert("created_at".to_string(), json!(now));
    fields.insert("updated_at".to_string(), json!(now));
    fields.insert("is_deleted".to_string(), json!(false));

    let mut record = Value::Object(fields);
    if is_risk_register(&module, &resource) {
        derive_risk_score(&mut record);
    }

    let key = collection_key(&caller, &module, &resource);
    state
        .collections()
        .entry(key)
        .or_default()
        .insert(id, record.clone());
    (
        StatusCode::CREATED,
        Json(json!({"success": true, "data": record})),
    )
        .into_response()
}

// ── Record routes ───────────────────────────────────────────────────

async fn show(
    State(state): State<StubState>,
    Path((module, resource, id)): Path<(String, String, Uuid)>,
    headers: HeaderMap,
) -> Response {
    let caller = match authorize(&state, &headers) {
        Ok(principal) => principal,
        Err(resp) => return resp,
    };
    let key = collection_key(&caller, &module, &resource);
    let Some(collection) = state.collections().get(&key) else {
        return reject(StatusCode::NOT_FOUND, "record not found");
    };
    // Clone out of the map guard before responding; the map reference
    // must not outlive the collection lock.
    let record = collection.get(&id).map(|entry| entry.value().clone());
    match record {
        Some(record) => ok_data(record),
        None => reject(StatusCode::NOT_FOUND, "record not found"),
    }
}

async fn update(
    State(state): State<StubState>,
    Path((module, resource, id)): Path<(String, String, Uuid)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let caller = match authorize(&state, &headers) {
        Ok(principal) => principal,
        Err(resp) => return resp,
    };
    let Some(patch) = body.as_object() else {
        return reject(StatusCode::BAD_REQUEST, "request body must be a JSON object");
    };

    let key = collection_key(&caller, &module, &resource);
    let Some(collection) = state.collections().get(&key) else {
        return reject(StatusCode::NOT_FOUND, "record not found");
    };
    let Some(mut entry) = collection.get_mut(&id) else {
        return reject(StatusCode::NOT_FOUND, "record not found");
    };

    let touched_factor = patch.contains_key("likelihood") || patch.contains_key("impact");
    let record = entry.value_mut();
    if let Some(fields) = record.as_object_mut() {
        // Soft-delete state only changes through the delete/restore
        // endpoints; hold the prior triad across the merge.
        let was_deleted = fields.get("is_deleted").cloned().unwrap_or(json!(false));
        let deleted_at = fields.get("deleted_at").cloned().unwrap_or(Value::Null);
        let deleted_by = fields.get("deleted_by").cloned().unwrap_or(Value::Null);

        for (field, value) in patch {
            fields.insert(field.clone(), value.clone());
        }
        // Identity and lifecycle state are server-owned; a patch cannot
        // move a record or walk it through the soft-delete lifecycle.
        fields.insert("id".to_string(), json!(id.to_string()));
        fields.insert("tenant_id".to_string(), json!(caller.tenant));
        fields.insert("is_deleted".to_string(), was_deleted);
        fields.insert("deleted_at".to_string(), deleted_at);
        fields.insert("deleted_by".to_string(), deleted_by);
        fields.insert("updated_at".to_string(), json!(timestamp()));
    }
    if touched_factor && is_risk_register(&module, &resource) {
        derive_risk_score(record);
    }
    ok_data(record.clone())
}

async fn soft_delete(
    State(state): State<StubState>,
    Path((module, resource, id)): Path<(String, String, Uuid)>,
    headers: HeaderMap,
) -> Response {
    let caller = match authorize(&state, &headers) {
        Ok(principal) => principal,
        Err(resp) => return resp,
    };
    let key = collection_key(&caller, &module, &resource);
    let Some(collection) = state.collections().get(&key) else {
        return reject(StatusCode::NOT_FOUND, "record not found");
    };
    let Some(mut entry) = collection.get_mut(&id) else {
        return reject(StatusCode::NOT_FOUND, "record not found");
    };

    let record = entry.value_mut();
    if is_deleted(record) {
        return reject(StatusCode::CONFLICT, "record is already deleted");
    }
    if let Some(fields) = record.as_object_mut() {
        fields.insert("is_deleted".to_string(), json!(true));
        fields.insert("deleted_at".to_string(), json!(timestamp()));
        fields.insert("deleted_by".to_string(), json!(caller.name));
    }
    ok_data(record.clone())
}

async fn restore(
    State(state): State<StubState>,
    Path((module, resource, id)): Path<(String, String, Uuid)>,
    headers: HeaderMap,
) -> Response {
    let caller = match authorize(&state, &headers) {
        Ok(principal) => principal,
        Err(resp) => return resp,
    };
    let key = collection_key(&caller, &module, &resource);
    let Some(collection) = state.collections().get(&key) else {
        return reject(StatusCode::NOT_FOUND, "record not found");
    };
    let Some(mut entry) = collection.get_mut(&id) else {
        return reject(StatusCode::NOT_FOUND, "record not found");
    };

    let record = entry.value_mut();
    if !is_deleted(record) {
        return reject(StatusCode::CONFLICT, "record is not deleted");
    }
    if let Some(fields) = record.as_object_mut() {
        fields.insert("is_deleted".to_string(), json!(false));
        fields.insert("deleted_at".to_string(), Value::Null);
        fields.insert("deleted_by".to_string(), Value::Null);
        fields.insert("updated_at".to_string(), json!(timestamp()));
    }
    ok_data(record.clone())
}

async fn purge(
    State(state): State<StubState>,
    Path((module, resource, id)): Path<(String, String, Uuid)>,
    headers: HeaderMap,
) -> Response {
    let caller = match authorize(&state, &headers) {
        Ok(principal) => principal,
        Err(resp) => return resp,
    };
    let key = collection_key(&caller, &module, &resource);
    let Some(collection) = state.collections().get(&key) else {
        return reject(StatusCode::NOT_FOUND, "record not found");
    };

    let deleted = match collection.get(&id) {
        Some(entry) => is_deleted(entry.value()),
        None => return reject(StatusCode::NOT_FOUND, "record not found"),
    };
    if !deleted {
        return reject(StatusCode::CONFLICT, "record is not deleted");
    }
    collection.remove(&id);
    ok_bare()
}

// ── Fallback ────────────────────────────────────────────────────────

async fn not_implemented() -> Response {
    reject(StatusCode::NOT_IMPLEMENTED, "not implemented")
}
