//! In-process fake of the HRMS backend.
//!
//! Serves the per-resource endpoint family from memory on a random local
//! port so the real `reqwest` client can be exercised end to end.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use hrms_client::HrmsApi;
use hrms_core::resource::Resource;
use serde_json::{json, Value};

#[derive(Default)]
pub struct FakeState {
    pub next_id: i64,
    /// Records keyed by resource path segment.
    pub records: BTreeMap<String, Vec<Value>>,
    /// Every `x-request-id` seen, in arrival order.
    pub request_ids: Vec<String>,
    /// When set, every request fails with this bare HTTP status.
    pub fail_with_status: Option<u16>,
    /// `(field, filename, size)` for every uploaded file.
    pub uploads: Vec<(String, String, usize)>,
}

pub type Shared = Arc<Mutex<FakeState>>;

pub struct FakeBackend {
    pub base_url: String,
    pub state: Shared,
}

impl FakeBackend {
    pub fn api(&self) -> HrmsApi {
        HrmsApi::with_client(
            reqwest::Client::new(),
            self.base_url.clone(),
            "http://files.local/".to_string(),
        )
    }

    pub fn records(&self, resource: &str) -> Vec<Value> {
        self.state
            .lock()
            .unwrap()
            .records
            .get(resource)
            .cloned()
            .unwrap_or_default()
    }
}

/// Start the fake backend on `127.0.0.1:0`.
pub async fn spawn_backend() -> FakeBackend {
    let state: Shared = Arc::default();

    let app = Router::new()
        .route("/api/document-checklist/add", post(upload_add))
        .route("/api/document-checklist/update", post(upload_update))
        .route("/api/{resource}/add", post(add))
        .route("/api/{resource}/update", post(update))
        .route("/api/{resource}/getAll", get(get_all))
        .route("/api/{resource}/by-id/{id}", get(by_id))
        .route("/api/{resource}/employee/{employee_id}", get(by_employee))
        .route("/api/{resource}/delete/{id}", delete(remove))
        .with_state(Arc::clone(&state));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake backend");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake backend crashed");
    });

    FakeBackend {
        base_url: format!("http://{addr}/api"),
        state,
    }
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

fn ok(result: Value) -> Response {
    Json(json!({ "success": true, "result": result })).into_response()
}

fn rejected(message: &str) -> Response {
    Json(json!({ "success": false, "message": message })).into_response()
}

/// Record the request id and apply any forced failure.
fn observe(state: &Shared, headers: &HeaderMap) -> Option<Response> {
    let mut s = state.lock().unwrap();
    if let Some(id) = headers.get("x-request-id").and_then(|v| v.to_str().ok()) {
        s.request_ids.push(id.to_string());
    }
    s.fail_with_status.map(|code| {
        (
            StatusCode::from_u16(code).unwrap(),
            "upstream exploded".to_string(),
        )
            .into_response()
    })
}

fn id_field(resource: &str) -> Option<&'static str> {
    Resource::from_path(resource).map(Resource::id_field)
}

// ---------------------------------------------------------------------------
// JSON handlers
// ---------------------------------------------------------------------------

async fn add(
    State(state): State<Shared>,
    Path(resource): Path<String>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Response {
    if let Some(r) = observe(&state, &headers) {
        return r;
    }
    let Some(field) = id_field(&resource) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let mut s = state.lock().unwrap();
    if resource == "bank" {
        let duplicate = s.records.get("bank").is_some_and(|rows| {
            rows.iter()
                .any(|r| r["account_number"] == body["account_number"])
        });
        if duplicate {
            return rejected("Account number already exists");
        }
    }

    s.next_id += 1;
    body[field] = json!(s.next_id);
    s.records.entry(resource).or_default().push(body.clone());
    ok(body)
}

async fn update(
    State(state): State<Shared>,
    Path(resource): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(r) = observe(&state, &headers) {
        return r;
    }
    let Some(field) = id_field(&resource) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let mut s = state.lock().unwrap();
    let rows = s.records.entry(resource).or_default();
    match rows.iter_mut().find(|r| r[field] == body[field]) {
        Some(row) => {
            *row = body.clone();
            ok(body)
        }
        None => rejected("Record not found"),
    }
}

async fn get_all(
    State(state): State<Shared>,
    Path(resource): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Some(r) = observe(&state, &headers) {
        return r;
    }
    let s = state.lock().unwrap();
    ok(json!(s.records.get(&resource).cloned().unwrap_or_default()))
}

async fn by_id(
    State(state): State<Shared>,
    Path((resource, id)): Path<(String, i64)>,
    headers: HeaderMap,
) -> Response {
    if let Some(r) = observe(&state, &headers) {
        return r;
    }
    let Some(field) = id_field(&resource) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let s = state.lock().unwrap();
    let found = s
        .records
        .get(&resource)
        .and_then(|rows| rows.iter().find(|r| r[field] == json!(id)).cloned());
    match found {
        Some(row) => ok(row),
        None => rejected("Record not found"),
    }
}

async fn by_employee(
    State(state): State<Shared>,
    Path((resource, employee_id)): Path<(String, i64)>,
    headers: HeaderMap,
) -> Response {
    if let Some(r) = observe(&state, &headers) {
        return r;
    }
    let s = state.lock().unwrap();
    let rows: Vec<Value> = s
        .records
        .get(&resource)
        .map(|rows| {
            rows.iter()
                .filter(|r| r["employee_id"] == json!(employee_id))
                .cloned()
                .collect()
        })
        .unwrap_or_default();
    ok(json!(rows))
}

async fn remove(
    State(state): State<Shared>,
    Path((resource, id)): Path<(String, i64)>,
    headers: HeaderMap,
) -> Response {
    if let Some(r) = observe(&state, &headers) {
        return r;
    }
    let Some(field) = id_field(&resource) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let mut s = state.lock().unwrap();
    let rows = s.records.entry(resource).or_default();
    let before = rows.len();
    rows.retain(|r| r[field] != json!(id));
    if rows.len() < before {
        ok(json!({ "deleted": id }))
    } else {
        rejected("Record not found")
    }
}

// ---------------------------------------------------------------------------
// Multipart handlers
// ---------------------------------------------------------------------------

/// Read a checklist form: text fields as values, files as `<field>_url`.
async fn read_checklist_form(
    state: &Shared,
    mut multipart: Multipart,
) -> serde_json::Map<String, Value> {
    let mut record = serde_json::Map::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let bytes = field.bytes().await.unwrap();
                state
                    .lock()
                    .unwrap()
                    .uploads
                    .push((name.clone(), file_name.clone(), bytes.len()));
                record.insert(format!("{name}_url"), json!(format!("{name}_{file_name}")));
            }
            None => {
                let text = field.text().await.unwrap();
                let value = text.parse::<i64>().map(Value::from).unwrap_or(json!(text));
                record.insert(name, value);
            }
        }
    }
    record
}

async fn upload_add(State(state): State<Shared>, headers: HeaderMap, multipart: Multipart) -> Response {
    if let Some(r) = observe(&state, &headers) {
        return r;
    }
    let mut record = read_checklist_form(&state, multipart).await;

    let mut s = state.lock().unwrap();
    s.next_id += 1;
    record.insert("checklist_id".into(), json!(s.next_id));
    let record = Value::Object(record);
    s.records
        .entry("document-checklist".into())
        .or_default()
        .push(record.clone());
    ok(record)
}

async fn upload_update(
    State(state): State<Shared>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    if let Some(r) = observe(&state, &headers) {
        return r;
    }
    let record = read_checklist_form(&state, multipart).await;

    let mut s = state.lock().unwrap();
    let rows = s.records.entry("document-checklist".into()).or_default();
    match rows
        .iter_mut()
        .find(|r| r["checklist_id"] == record["checklist_id"])
    {
        Some(Value::Object(existing)) => {
            existing.extend(record);
            ok(Value::Object(existing.clone()))
        }
        _ => rejected("Record not found"),
    }
}
