//! The per-step save contract.
//!
//! A record without an id is created; a record with one is updated. The id
//! returned by a create is written back so the next save of the same record
//! becomes an update. An optional section left entirely empty is skipped
//! without contacting the backend.

use hrms_client::OnboardingBackend;
use hrms_core::resource::Resource;
use hrms_core::sections::StepRecord;
use hrms_core::types::DbId;
use hrms_core::validation::{Section, SectionCheck};
use serde_json::Value;

use crate::error::StepError;

/// What a successful save did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Optional section left empty; no backend call was made.
    Skipped,
    Created(DbId),
    Updated(DbId),
}

impl SaveOutcome {
    pub fn record_id(self) -> Option<DbId> {
        match self {
            SaveOutcome::Skipped => None,
            SaveOutcome::Created(id) | SaveOutcome::Updated(id) => Some(id),
        }
    }
}

/// Validate and persist one record.
///
/// Derived fields (insurance age, experience tenure) are recomputed first.
/// Child records are stamped with `employee_id` before sending and fail with
/// [`StepError::EmployeeNotSaved`] if there is no employee yet. On any error
/// the record keeps its previous id.
pub async fn save_record<B, R>(
    backend: &B,
    employee_id: Option<DbId>,
    record: &mut R,
) -> Result<SaveOutcome, StepError>
where
    B: OnboardingBackend + ?Sized,
    R: StepRecord,
{
    record.fill_derived(chrono::Local::now().date_naive());

    if record.check()? == SectionCheck::Skip {
        tracing::debug!(section = R::LABEL, "Optional section empty, skipping save");
        return Ok(SaveOutcome::Skipped);
    }

    if R::RESOURCE != Resource::Employee {
        let employee_id = employee_id.ok_or(StepError::EmployeeNotSaved { section: R::LABEL })?;
        record.set_employee_id(employee_id);
    }

    let body = record.payload().map_err(|source| StepError::Encode {
        section: R::LABEL,
        source,
    })?;

    match record.record_id() {
        Some(id) => {
            backend.update(R::RESOURCE, body).await?;
            tracing::info!(section = R::LABEL, id, "Record updated");
            Ok(SaveOutcome::Updated(id))
        }
        None => {
            let result = backend.create(R::RESOURCE, body).await?;
            let id = returned_id(&result, R::RESOURCE).ok_or(StepError::MissingId {
                section: R::LABEL,
                field: R::RESOURCE.id_field(),
            })?;
            record.set_record_id(id);
            tracing::info!(section = R::LABEL, id, "Record created");
            Ok(SaveOutcome::Created(id))
        }
    }
}

/// Read the primary key out of a create response.
///
/// Some backends return numeric ids as strings; both shapes are accepted.
pub(crate) fn returned_id(result: &Value, resource: Resource) -> Option<DbId> {
    match result.get(resource.id_field())? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
