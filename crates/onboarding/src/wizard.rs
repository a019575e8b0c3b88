//! The nine-tab onboarding wizard.
//!
//! [`OnboardingWizard`] owns the draft, the active tab and the employee id
//! shared by every step. The active tab only moves forward, one tab at a
//! time, and only after the active tab's save succeeds. Row actions on the
//! list tabs (skills, experience, references) change which row is being
//! edited but never the tab. A successful save of the document checklist
//! completes onboarding.
//!
//! Every mutating action takes `&mut self`, so at most one backend call is
//! outstanding per wizard. [`OnboardingWizard::loading_flag`] exposes the
//! in-flight state to observers on other tasks.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use hrms_client::{DocumentForm, OnboardingBackend};
use hrms_core::error::CoreError;
use hrms_core::onboarding_wizard::{
    can_complete, validate_step_transition, OnboardingStatus, OnboardingStep,
};
use hrms_core::rows::RecordRows;
use hrms_core::sections::{DocumentChecklist, PersonalDetails, StepRecord};
use hrms_core::types::DbId;
use hrms_core::validation::Section;
use hrms_events::bus::{ONBOARDING_COMPLETED, ROW_DELETED, STEP_SAVED, STEP_SKIPPED};
use hrms_events::{EventBus, OnboardingEvent};
use serde_json::{json, Value};

use crate::draft::OnboardingDraft;
use crate::error::StepError;
use crate::save::{returned_id, save_record, SaveOutcome};

/// Result of a successful [`OnboardingWizard::save_current`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    /// The tab that was saved.
    pub step: OnboardingStep,
    pub outcome: SaveOutcome,
    /// The tab now active; `None` once onboarding is complete.
    pub next: Option<OnboardingStep>,
}

pub struct OnboardingWizard<B> {
    backend: B,
    draft: OnboardingDraft,
    current_step: OnboardingStep,
    status: OnboardingStatus,
    loading: Arc<AtomicBool>,
    events: Option<Arc<EventBus>>,
}

impl<B: OnboardingBackend> OnboardingWizard<B> {
    /// Start a fresh wizard on the personal details tab.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            draft: OnboardingDraft::default(),
            current_step: OnboardingStep::Personal,
            status: OnboardingStatus::InProgress,
            loading: Arc::new(AtomicBool::new(false)),
            events: None,
        }
    }

    pub fn with_draft(mut self, draft: OnboardingDraft) -> Self {
        self.draft = draft;
        self
    }

    /// Publish wizard events on `bus`.
    pub fn with_events(mut self, bus: Arc<EventBus>) -> Self {
        self.events = Some(bus);
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn draft(&self) -> &OnboardingDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut OnboardingDraft {
        &mut self.draft
    }

    pub fn into_draft(self) -> OnboardingDraft {
        self.draft
    }

    pub fn current_step(&self) -> OnboardingStep {
        self.current_step
    }

    pub fn status(&self) -> OnboardingStatus {
        self.status
    }

    pub fn is_complete(&self) -> bool {
        self.status == OnboardingStatus::Completed
    }

    /// Set once personal details have been created.
    pub fn employee_id(&self) -> Option<DbId> {
        self.draft.employee_id()
    }

    /// Whether a backend call is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Shared handle to the in-flight flag, readable while a save runs.
    pub fn loading_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.loading)
    }

    // -----------------------------------------------------------------------
    // Tab save
    // -----------------------------------------------------------------------

    /// Validate and persist the active tab, then advance.
    ///
    /// On error the active tab and the status are left unchanged. A record
    /// the backend accepted keeps its new id even if the reply was unreadable.
    pub async fn save_current(&mut self) -> Result<StepReport, StepError> {
        if self.is_complete() {
            return Err(StepError::AlreadyCompleted);
        }

        let step = self.current_step;
        let outcome = {
            let _loading = LoadingGuard::raise(&self.loading);
            self.persist_step(step).await
        }
        .inspect_err(|e| {
            tracing::warn!(step = step.label(), error = %e, "Step save failed");
        })?;

        self.publish_outcome(step, outcome);

        let next = match step.next() {
            Some(next) => {
                validate_step_transition(step.to_number(), next.to_number())?;
                self.current_step = next;
                Some(next)
            }
            None => {
                can_complete(step.to_number())?;
                self.status = OnboardingStatus::Completed;
                tracing::info!(employee_id = ?self.employee_id(), "Onboarding completed");
                self.publish(OnboardingEvent::new(ONBOARDING_COMPLETED).with_step(step));
                None
            }
        };

        tracing::info!(
            step = step.label(),
            outcome = ?outcome,
            next = ?next.map(OnboardingStep::label),
            "Step saved"
        );
        Ok(StepReport {
            step,
            outcome,
            next,
        })
    }

    async fn persist_step(&mut self, step: OnboardingStep) -> Result<SaveOutcome, StepError> {
        let employee_id = self.draft.employee_id();
        let backend = &self.backend;
        let draft = &mut self.draft;

        match step {
            OnboardingStep::Personal => save_record(backend, None, &mut draft.personal).await,
            OnboardingStep::Passport => save_record(backend, employee_id, &mut draft.passport).await,
            OnboardingStep::Skills => save_list(backend, employee_id, &mut draft.skills).await,
            OnboardingStep::Experience => {
                save_list(backend, employee_id, &mut draft.experience).await
            }
            OnboardingStep::Family => save_record(backend, employee_id, &mut draft.family).await,
            OnboardingStep::Insurance => {
                save_record(backend, employee_id, &mut draft.insurance).await
            }
            OnboardingStep::References => {
                save_list(backend, employee_id, &mut draft.references).await
            }
            OnboardingStep::Bank => save_record(backend, employee_id, &mut draft.bank).await,
            OnboardingStep::Documents => {
                save_documents(backend, employee_id, &mut draft.documents).await
            }
        }
    }

    // -----------------------------------------------------------------------
    // Row actions
    // -----------------------------------------------------------------------

    /// Save the row being edited on the active list tab without advancing.
    pub async fn save_row(&mut self) -> Result<SaveOutcome, StepError> {
        let step = self.current_step;
        let employee_id = self.draft.employee_id();
        let outcome = {
            let _loading = LoadingGuard::raise(&self.loading);
            let backend = &self.backend;
            match step {
                OnboardingStep::Skills => {
                    save_row_in(backend, employee_id, &mut self.draft.skills).await
                }
                OnboardingStep::Experience => {
                    save_row_in(backend, employee_id, &mut self.draft.experience).await
                }
                OnboardingStep::References => {
                    save_row_in(backend, employee_id, &mut self.draft.references).await
                }
                other => Err(StepError::NotAListStep(other)),
            }
        }?;

        self.publish_outcome(step, outcome);
        Ok(outcome)
    }

    /// Start a blank row after the saved ones. The saved list is untouched.
    pub fn add_row(&mut self) -> Result<(), StepError> {
        self.rows_mut()?.add_row();
        Ok(())
    }

    /// Edit the next saved row. Returns `false` at the end of the list.
    pub fn next_row(&mut self) -> Result<bool, StepError> {
        Ok(self.rows_mut()?.next_row())
    }

    /// Edit the previous saved row. Returns `false` at the start.
    pub fn previous_row(&mut self) -> Result<bool, StepError> {
        Ok(self.rows_mut()?.previous_row())
    }

    /// Delete a saved row on the active list tab, then re-derive the row
    /// being edited.
    pub async fn delete_row(&mut self, id: DbId) -> Result<(), StepError> {
        let step = self.current_step;
        let deleted = {
            let _loading = LoadingGuard::raise(&self.loading);
            let backend = &self.backend;
            match step {
                OnboardingStep::Skills => delete_in(backend, &mut self.draft.skills, id).await,
                OnboardingStep::Experience => {
                    delete_in(backend, &mut self.draft.experience, id).await
                }
                OnboardingStep::References => {
                    delete_in(backend, &mut self.draft.references, id).await
                }
                other => Err(StepError::NotAListStep(other)),
            }
        };
        deleted?;

        tracing::info!(step = step.label(), id, "Row deleted");
        self.publish(
            OnboardingEvent::new(ROW_DELETED)
                .with_step(step)
                .with_record(id),
        );
        Ok(())
    }

    fn rows_mut(&mut self) -> Result<&mut dyn RowCursor, StepError> {
        match self.current_step {
            OnboardingStep::Skills => Ok(&mut self.draft.skills),
            OnboardingStep::Experience => Ok(&mut self.draft.experience),
            OnboardingStep::References => Ok(&mut self.draft.references),
            other => Err(StepError::NotAListStep(other)),
        }
    }

    // -----------------------------------------------------------------------
    // Resume
    // -----------------------------------------------------------------------

    /// Load everything the backend holds for an existing employee.
    ///
    /// Each section is fetched once. The wizard restarts on the personal
    /// details tab so every later save is an update of the fetched records.
    pub async fn resume(&mut self, employee_id: DbId) -> Result<(), StepError> {
        let draft = {
            let _loading = LoadingGuard::raise(&self.loading);
            fetch_draft(&self.backend, employee_id).await
        }
        .inspect_err(|e| {
            tracing::warn!(employee_id, error = %e, "Failed to resume onboarding");
        })?;

        tracing::info!(
            employee_id,
            skills = draft.skills.len(),
            experience = draft.experience.len(),
            references = draft.references.len(),
            "Onboarding resumed"
        );
        self.draft = draft;
        self.current_step = OnboardingStep::Personal;
        self.status = OnboardingStatus::InProgress;
        Ok(())
    }

    // ---- private helpers ----

    fn publish_outcome(&self, step: OnboardingStep, outcome: SaveOutcome) {
        let event = match outcome {
            SaveOutcome::Skipped => OnboardingEvent::new(STEP_SKIPPED),
            SaveOutcome::Created(id) => OnboardingEvent::new(STEP_SAVED)
                .with_record(id)
                .with_payload(json!({ "created": true })),
            SaveOutcome::Updated(id) => OnboardingEvent::new(STEP_SAVED)
                .with_record(id)
                .with_payload(json!({ "created": false })),
        };
        self.publish(event.with_step(step));
    }

    fn publish(&self, event: OnboardingEvent) {
        if let Some(bus) = &self.events {
            bus.publish(event.with_employee(self.draft.employee_id()));
        }
    }
}

// ---------------------------------------------------------------------------
// Loading flag
// ---------------------------------------------------------------------------

/// Holds the loading flag up for the duration of one backend call.
struct LoadingGuard(Arc<AtomicBool>);

impl LoadingGuard {
    fn raise(flag: &Arc<AtomicBool>) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(Arc::clone(flag))
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

// ---------------------------------------------------------------------------
// Row navigation, independent of the record type
// ---------------------------------------------------------------------------

trait RowCursor {
    fn add_row(&mut self);
    fn next_row(&mut self) -> bool;
    fn previous_row(&mut self) -> bool;
}

impl<R: StepRecord> RowCursor for RecordRows<R> {
    fn add_row(&mut self) {
        self.add_new();
    }

    fn next_row(&mut self) -> bool {
        self.next()
    }

    fn previous_row(&mut self) -> bool {
        self.previous()
    }
}

// ---------------------------------------------------------------------------
// Per-section persistence
// ---------------------------------------------------------------------------

/// Save a list tab before advancing.
///
/// A blank new row on top of saved rows has nothing to persist. Otherwise
/// the row being edited is saved like any other record.
async fn save_list<B, R>(
    backend: &B,
    employee_id: Option<DbId>,
    rows: &mut RecordRows<R>,
) -> Result<SaveOutcome, StepError>
where
    B: OnboardingBackend + ?Sized,
    R: StepRecord,
{
    if rows.has_unsaved_blank_draft() {
        return Ok(SaveOutcome::Skipped);
    }
    save_row_in(backend, employee_id, rows).await
}

async fn save_row_in<B, R>(
    backend: &B,
    employee_id: Option<DbId>,
    rows: &mut RecordRows<R>,
) -> Result<SaveOutcome, StepError>
where
    B: OnboardingBackend + ?Sized,
    R: StepRecord,
{
    let outcome = save_record(backend, employee_id, rows.draft_mut()).await?;
    if outcome != SaveOutcome::Skipped {
        let saved = rows.draft().clone();
        rows.record_saved(saved);
    }
    Ok(outcome)
}

async fn delete_in<B, R>(backend: &B, rows: &mut RecordRows<R>, id: DbId) -> Result<(), StepError>
where
    B: OnboardingBackend + ?Sized,
    R: StepRecord,
{
    if !rows.items().iter().any(|r| r.record_id() == Some(id)) {
        return Err(CoreError::NotFound {
            entity: R::RESOURCE.entity(),
            id,
        }
        .into());
    }
    backend.delete(R::RESOURCE, id).await?;
    rows.remove(id);
    Ok(())
}

/// Save the checklist as one multipart request carrying every queued file.
async fn save_documents<B>(
    backend: &B,
    employee_id: Option<DbId>,
    checklist: &mut DocumentChecklist,
) -> Result<SaveOutcome, StepError>
where
    B: OnboardingBackend + ?Sized,
{
    checklist.check()?;
    let employee_id = employee_id.ok_or(StepError::EmployeeNotSaved {
        section: DocumentChecklist::LABEL,
    })?;
    checklist.set_employee_id(employee_id);

    let form = DocumentForm {
        update: checklist.checklist_id.is_some(),
        fields: checklist.form_fields(),
        files: checklist
            .uploads
            .iter()
            .map(|(kind, path)| (kind.field_name().to_string(), path.clone()))
            .collect(),
    };
    tracing::debug!(files = form.files.len(), update = form.update, "Uploading document checklist");

    let result = backend.save_documents(form).await?;

    let outcome = match checklist.checklist_id {
        Some(id) => SaveOutcome::Updated(id),
        None => {
            let id = returned_id(&result, DocumentChecklist::RESOURCE).ok_or(
                StepError::MissingId {
                    section: DocumentChecklist::LABEL,
                    field: DocumentChecklist::RESOURCE.id_field(),
                },
            )?;
            SaveOutcome::Created(id)
        }
    };

    if let Some(id) = outcome.record_id() {
        checklist.set_record_id(id);
    }
    let saved: DocumentChecklist = decode(result)?;
    checklist.absorb_saved(&saved);
    Ok(outcome)
}

// ---------------------------------------------------------------------------
// Fetching
// ---------------------------------------------------------------------------

async fn fetch_draft<B>(backend: &B, employee_id: DbId) -> Result<OnboardingDraft, StepError>
where
    B: OnboardingBackend + ?Sized,
{
    let mut personal: PersonalDetails =
        decode(backend.get_by_id(PersonalDetails::RESOURCE, employee_id).await?)?;
    personal.set_record_id(employee_id);

    Ok(OnboardingDraft {
        personal,
        passport: fetch_single(backend, employee_id).await?,
        skills: RecordRows::load(fetch_rows(backend, employee_id).await?),
        experience: RecordRows::load(fetch_rows(backend, employee_id).await?),
        family: fetch_single(backend, employee_id).await?,
        insurance: fetch_single(backend, employee_id).await?,
        references: RecordRows::load(fetch_rows(backend, employee_id).await?),
        bank: fetch_single(backend, employee_id).await?,
        documents: fetch_single(backend, employee_id).await?,
    })
}

async fn fetch_rows<B, R>(backend: &B, employee_id: DbId) -> Result<Vec<R>, StepError>
where
    B: OnboardingBackend + ?Sized,
    R: StepRecord,
{
    backend
        .list_for_employee(R::RESOURCE, employee_id)
        .await?
        .into_iter()
        .map(decode)
        .collect()
}

/// The employee's record for a single-record section, or a blank one.
async fn fetch_single<B, R>(backend: &B, employee_id: DbId) -> Result<R, StepError>
where
    B: OnboardingBackend + ?Sized,
    R: StepRecord,
{
    Ok(fetch_rows(backend, employee_id)
        .await?
        .into_iter()
        .next()
        .unwrap_or_default())
}

fn decode<R: StepRecord>(value: Value) -> Result<R, StepError> {
    serde_json::from_value(value).map_err(|source| StepError::Encode {
        section: R::LABEL,
        source,
    })
}
