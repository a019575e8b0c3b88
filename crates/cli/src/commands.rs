//! Subcommand implementations.
//!
//! In a draft file every list row is treated as something to save: rows
//! with an id are updated, rows without one are created. Ids assigned by
//! the backend are written back after every tab, so an interrupted run can
//! be repeated safely.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use hrms_client::{ClientConfig, HrmsApi, OnboardingBackend};
use hrms_core::onboarding_wizard::OnboardingStep;
use hrms_core::rows::RecordRows;
use hrms_core::sections::{PriorExperience, Reference, Skill, StepRecord};
use hrms_core::types::DbId;
use hrms_events::{EventBus, EventLog};
use hrms_onboarding::{DraftStore, OnboardingDraft, OnboardingWizard, SaveOutcome, StepError};

// ---------------------------------------------------------------------------
// template
// ---------------------------------------------------------------------------

pub async fn template(output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            DraftStore::<OnboardingDraft>::new(path)
                .init()
                .await
                .with_context(|| format!("Failed to create draft {}", path.display()))?;
            println!("Draft ready at {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&OnboardingDraft::default())?),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// fetch
// ---------------------------------------------------------------------------

pub async fn fetch(
    config: &ClientConfig,
    employee_id: DbId,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let mut wizard = OnboardingWizard::new(HrmsApi::new(config)?);
    wizard
        .resume(employee_id)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))
        .with_context(|| format!("Failed to fetch employee {employee_id}"))?;

    match output {
        Some(path) => {
            DraftStore::new(path).write(wizard.draft()).await?;
            println!("Wrote employee {employee_id} to {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(wizard.draft())?),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

pub async fn run(config: &ClientConfig, draft_path: &Path) -> anyhow::Result<()> {
    let store = DraftStore::<OnboardingDraft>::new(draft_path);
    let file = store
        .read()
        .await
        .with_context(|| format!("Failed to load draft {}", draft_path.display()))?;

    let bus = Arc::new(EventBus::default());
    let event_log = tokio::spawn(EventLog::run(bus.subscribe()));

    let (draft, mut pending) = PendingRows::take(file);
    let mut wizard = OnboardingWizard::new(HrmsApi::new(config)?)
        .with_draft(draft)
        .with_events(Arc::clone(&bus));

    let result = walk(&mut wizard, &mut pending).await;
    let employee_id = wizard.employee_id();

    store
        .write(&pending.merged_into(wizard.draft()))
        .await
        .context("Failed to write ids back to the draft")?;

    drop(wizard);
    drop(bus);
    event_log.await?;

    if let Err((step, err)) = result {
        anyhow::bail!("{}: {}", step.label(), err.user_message());
    }
    if let Some(id) = employee_id {
        println!("Onboarding complete for employee {id}");
    }
    Ok(())
}

/// Save every tab in order, stopping at the first failure.
async fn walk<B: OnboardingBackend>(
    wizard: &mut OnboardingWizard<B>,
    pending: &mut PendingRows,
) -> Result<(), (OnboardingStep, StepError)> {
    while !wizard.is_complete() {
        let step = wizard.current_step();
        pending.flush(wizard).await.map_err(|e| (step, e))?;
        let saved = wizard.save_current().await.map_err(|e| (step, e))?;

        match saved.outcome {
            SaveOutcome::Skipped => println!("  - {} (nothing to save)", step.label()),
            SaveOutcome::Created(id) => println!("  + {} created (id {id})", step.label()),
            SaveOutcome::Updated(id) => println!("  ~ {} updated (id {id})", step.label()),
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Pending list rows
// ---------------------------------------------------------------------------

/// List rows read from the draft file that this run has not saved yet.
#[derive(Debug, Default)]
struct PendingRows {
    skills: Vec<Skill>,
    experience: Vec<PriorExperience>,
    references: Vec<Reference>,
}

impl PendingRows {
    /// Move every list row out of `draft`, leaving the wizard's lists empty.
    fn take(mut draft: OnboardingDraft) -> (OnboardingDraft, Self) {
        let pending = Self {
            skills: drain(&mut draft.skills),
            experience: drain(&mut draft.experience),
            references: drain(&mut draft.references),
        };
        (draft, pending)
    }

    /// Save the active tab's pending rows one by one, then leave a blank new
    /// row so the tab itself has nothing further to persist.
    async fn flush<B: OnboardingBackend>(
        &mut self,
        wizard: &mut OnboardingWizard<B>,
    ) -> Result<(), StepError> {
        match wizard.current_step() {
            OnboardingStep::Skills => flush_rows(wizard, &mut self.skills, skills).await,
            OnboardingStep::Experience => {
                flush_rows(wizard, &mut self.experience, experience).await
            }
            OnboardingStep::References => {
                flush_rows(wizard, &mut self.references, references).await
            }
            _ => Ok(()),
        }
    }

    /// The draft as it should be written back: saved rows followed by rows
    /// still waiting to be saved.
    fn merged_into(&self, draft: &OnboardingDraft) -> OnboardingDraft {
        let mut out = draft.clone();
        out.skills = with_pending(&draft.skills, &self.skills);
        out.experience = with_pending(&draft.experience, &self.experience);
        out.references = with_pending(&draft.references, &self.references);
        out
    }
}

fn drain<R: StepRecord>(rows: &mut RecordRows<R>) -> Vec<R> {
    let mut items = rows.items().to_vec();
    if rows.is_adding_new() && !rows.draft().is_blank() {
        items.push(rows.draft().clone());
    }
    *rows = RecordRows::default();
    items
}

fn with_pending<R: StepRecord>(rows: &RecordRows<R>, pending: &[R]) -> RecordRows<R> {
    if pending.is_empty() {
        return rows.clone();
    }
    RecordRows::load(rows.items().iter().chain(pending).cloned().collect())
}

async fn flush_rows<B, R>(
    wizard: &mut OnboardingWizard<B>,
    pending: &mut Vec<R>,
    rows: fn(&mut OnboardingDraft) -> &mut RecordRows<R>,
) -> Result<(), StepError>
where
    B: OnboardingBackend,
    R: StepRecord,
{
    while let Some(row) = pending.first().cloned() {
        wizard.add_row()?;
        *rows(wizard.draft_mut()).draft_mut() = row;
        wizard.save_row().await?;
        pending.remove(0);
    }
    if !rows(wizard.draft_mut()).is_empty() {
        wizard.add_row()?;
    }
    Ok(())
}

fn skills(draft: &mut OnboardingDraft) -> &mut RecordRows<Skill> {
    &mut draft.skills
}

fn experience(draft: &mut OnboardingDraft) -> &mut RecordRows<PriorExperience> {
    &mut draft.experience
}

fn references(draft: &mut OnboardingDraft) -> &mut RecordRows<Reference> {
    &mut draft.references
}
