//! In-memory backend and fixtures for wizard tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use hrms_client::{ApiError, DocumentForm, OnboardingBackend};
use hrms_core::resource::Resource;
use hrms_core::sections::{
    AccountType, BankDetails, DocumentChecklist, DocumentKind, FamilyDetails, Gender,
    MaritalStatus, PersonalDetails, PriorExperience, Reference, Skill,
};
use hrms_core::types::{Date, DbId};
use serde_json::{json, Value};

/// One backend call, as the wizard issued it.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create(Resource, Value),
    Update(Resource, Value),
    GetById(Resource, DbId),
    List(Resource, DbId),
    Delete(Resource, DbId),
    Documents(DocumentForm),
}

impl Call {
    pub fn resource(&self) -> Resource {
        match self {
            Call::Create(r, _)
            | Call::Update(r, _)
            | Call::GetById(r, _)
            | Call::List(r, _)
            | Call::Delete(r, _) => *r,
            Call::Documents(_) => Resource::DocumentChecklist,
        }
    }
}

#[derive(Default)]
struct State {
    next_id: DbId,
    records: HashMap<Resource, Vec<Value>>,
    calls: Vec<Call>,
    reject_next: Option<String>,
    offline: bool,
    garble_next_document: bool,
    loading_probe: Option<Arc<AtomicBool>>,
    loading_seen: Vec<bool>,
}

/// Records every call and stores records in memory.
#[derive(Default)]
pub struct MemoryBackend {
    state: Mutex<State>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn records(&self, resource: Resource) -> Vec<Value> {
        self.state
            .lock()
            .unwrap()
            .records
            .get(&resource)
            .cloned()
            .unwrap_or_default()
    }

    /// Store a record as if an earlier session had created it.
    pub fn seed(&self, resource: Resource, record: Value) {
        let mut s = self.state.lock().unwrap();
        s.records.entry(resource).or_default().push(record);
    }

    /// Fail the next call with `{ success: false, message }`.
    pub fn reject_next(&self, message: &str) {
        self.state.lock().unwrap().reject_next = Some(message.to_string());
    }

    /// Fail every call as if the backend were down.
    pub fn set_offline(&self, offline: bool) {
        self.state.lock().unwrap().offline = offline;
    }

    /// Store the next document checklist but answer with a body that does
    /// not decode.
    pub fn garble_next_document_reply(&self) {
        self.state.lock().unwrap().garble_next_document = true;
    }

    /// Sample `flag` on every call.
    pub fn probe_loading(&self, flag: Arc<AtomicBool>) {
        self.state.lock().unwrap().loading_probe = Some(flag);
    }

    pub fn loading_seen(&self) -> Vec<bool> {
        self.state.lock().unwrap().loading_seen.clone()
    }

    /// Log the call and apply any injected failure.
    fn begin(&self, call: Call) -> Result<(), ApiError> {
        let mut s = self.state.lock().unwrap();
        s.calls.push(call);
        if let Some(flag) = s.loading_probe.clone() {
            s.loading_seen.push(flag.load(Ordering::SeqCst));
        }
        if s.offline {
            return Err(ApiError::Status {
                status: 503,
                body: "Service Unavailable".into(),
            });
        }
        if let Some(message) = s.reject_next.take() {
            return Err(ApiError::Rejected { message });
        }
        Ok(())
    }
}

#[async_trait]
impl OnboardingBackend for MemoryBackend {
    async fn create(&self, resource: Resource, mut body: Value) -> Result<Value, ApiError> {
        self.begin(Call::Create(resource, body.clone()))?;
        let mut s = self.state.lock().unwrap();
        s.next_id += 1;
        body[resource.id_field()] = json!(s.next_id);
        s.records.entry(resource).or_default().push(body.clone());
        Ok(body)
    }

    async fn update(&self, resource: Resource, body: Value) -> Result<Value, ApiError> {
        self.begin(Call::Update(resource, body.clone()))?;
        let field = resource.id_field();
        let mut s = self.state.lock().unwrap();
        let rows = s.records.entry(resource).or_default();
        match rows.iter_mut().find(|r| r[field] == body[field]) {
            Some(row) => {
                *row = body.clone();
                Ok(body)
            }
            None => Err(ApiError::Rejected {
                message: "Record not found".into(),
            }),
        }
    }

    async fn get_by_id(&self, resource: Resource, id: DbId) -> Result<Value, ApiError> {
        self.begin(Call::GetById(resource, id))?;
        let field = resource.id_field();
        let s = self.state.lock().unwrap();
        s.records
            .get(&resource)
            .and_then(|rows| rows.iter().find(|r| r[field] == json!(id)).cloned())
            .ok_or(ApiError::Rejected {
                message: "Record not found".into(),
            })
    }

    async fn list_for_employee(
        &self,
        resource: Resource,
        employee_id: DbId,
    ) -> Result<Vec<Value>, ApiError> {
        self.begin(Call::List(resource, employee_id))?;
        let s = self.state.lock().unwrap();
        Ok(s.records
            .get(&resource)
            .map(|rows| {
                rows.iter()
                    .filter(|r| r["employee_id"] == json!(employee_id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn delete(&self, resource: Resource, id: DbId) -> Result<(), ApiError> {
        self.begin(Call::Delete(resource, id))?;
        let field = resource.id_field();
        let mut s = self.state.lock().unwrap();
        if let Some(rows) = s.records.get_mut(&resource) {
            rows.retain(|r| r[field] != json!(id));
        }
        Ok(())
    }

    async fn save_documents(&self, form: DocumentForm) -> Result<Value, ApiError> {
        self.begin(Call::Documents(form.clone()))?;

        let mut record = serde_json::Map::new();
        for (name, value) in &form.fields {
            let value = value.parse::<i64>().map(Value::from).unwrap_or(json!(value));
            record.insert(name.clone(), value);
        }
        for (name, path) in &form.files {
            let file_name = path.file_name().unwrap().to_string_lossy();
            record.insert(format!("{name}_url"), json!(format!("{name}_{file_name}")));
        }

        let mut s = self.state.lock().unwrap();
        if !form.update {
            s.next_id += 1;
            record.insert("checklist_id".into(), json!(s.next_id));
        }
        let garble = std::mem::take(&mut s.garble_next_document);
        let rows = s.records.entry(Resource::DocumentChecklist).or_default();
        let saved = match rows
            .iter_mut()
            .find(|r| r["checklist_id"] == record["checklist_id"])
        {
            Some(Value::Object(existing)) => {
                existing.extend(record);
                Value::Object(existing.clone())
            }
            _ => {
                let record = Value::Object(record);
                rows.push(record.clone());
                record
            }
        };

        if garble {
            let mut reply = saved;
            reply["verification_date"] = json!("not a date");
            return Ok(reply);
        }
        Ok(saved)
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd_opt(y, m, d).unwrap()
}

pub fn personal() -> PersonalDetails {
    PersonalDetails {
        first_name: "Asha".into(),
        last_name: "Rao".into(),
        mobile: "9876543210".into(),
        date_of_birth: Some(date(1994, 3, 12)),
        address: "12 MG Road, Pune".into(),
        email: "asha.rao@example.com".into(),
        gender: Some(Gender::Female),
        ..Default::default()
    }
}

pub fn skill(area: &str) -> Skill {
    Skill {
        skill_area: area.into(),
        acquired_from: "University".into(),
        grade: "A".into(),
        summary: "Used daily".into(),
        ..Default::default()
    }
}

pub fn experience() -> PriorExperience {
    PriorExperience {
        post: "Engineer".into(),
        department: "Platform".into(),
        company: "Acme".into(),
        city: "Pune".into(),
        joined_on: Some(date(2018, 1, 1)),
        left_on: Some(date(2021, 3, 1)),
        ..Default::default()
    }
}

pub fn family() -> FamilyDetails {
    FamilyDetails {
        father_name: "Ravi Rao".into(),
        father_date_of_birth: Some(date(1960, 5, 1)),
        father_occupation: "Teacher".into(),
        mother_name: "Meera Rao".into(),
        mother_date_of_birth: Some(date(1963, 8, 9)),
        mother_occupation: "Doctor".into(),
        marital_status: Some(MaritalStatus::Single),
        ..Default::default()
    }
}

pub fn reference() -> Reference {
    Reference {
        name: "Vikram Shah".into(),
        mobile: "9123456780".into(),
        area: "Kothrud".into(),
        organisation: "Acme".into(),
        relationship: "Former manager".into(),
        ..Default::default()
    }
}

pub fn bank() -> BankDetails {
    BankDetails {
        account_holder_name: "Asha Rao".into(),
        mobile: "9876543210".into(),
        account_number: "001234567890".into(),
        ifsc_code: "HDFC0001234".into(),
        bank_name: "HDFC".into(),
        branch: "Baner".into(),
        account_type: Some(AccountType::Savings),
        ..Default::default()
    }
}

/// Every required document queued from a fake local path.
pub fn documents() -> DocumentChecklist {
    let mut checklist = DocumentChecklist::default();
    for kind in DocumentKind::REQUIRED {
        checklist.attach(kind, format!("/uploads/{}.pdf", kind.field_name()));
    }
    checklist
}
