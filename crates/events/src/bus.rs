//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is shared via `Arc<EventBus>`; anything interested in
//! onboarding progress (the CLI reporter, an HR notification hook)
//! subscribes and receives every [`OnboardingEvent`].

use chrono::{DateTime, Utc};
use hrms_core::onboarding_wizard::OnboardingStep;
use hrms_core::types::DbId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// Event names
// ---------------------------------------------------------------------------

/// A step's record was created or updated.
pub const STEP_SAVED: &str = "step.saved";

/// An optional step was left empty and skipped without a backend call.
pub const STEP_SKIPPED: &str = "step.skipped";

/// A row of a list section was deleted.
pub const ROW_DELETED: &str = "row.deleted";

/// The document checklist was saved; onboarding is complete.
pub const ONBOARDING_COMPLETED: &str = "onboarding.completed";

// ---------------------------------------------------------------------------
// OnboardingEvent
// ---------------------------------------------------------------------------

/// Something that happened during an employee's onboarding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnboardingEvent {
    /// Dot-separated event name, e.g. `"step.saved"`.
    pub event_type: String,

    /// Employee being onboarded, once personal details are saved.
    pub employee_id: Option<DbId>,

    /// Wizard step the event belongs to.
    pub step: Option<OnboardingStep>,

    /// Id of the record that was written or deleted.
    pub record_id: Option<DbId>,

    /// Free-form JSON payload carrying event-specific data.
    pub payload: serde_json::Value,

    /// When the event was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl OnboardingEvent {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            employee_id: None,
            step: None,
            record_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    pub fn with_employee(mut self, employee_id: Option<DbId>) -> Self {
        self.employee_id = employee_id;
        self
    }

    pub fn with_step(mut self, step: OnboardingStep) -> Self {
        self.step = Some(step);
        self
    }

    pub fn with_record(mut self, record_id: DbId) -> Self {
        self.record_id = Some(record_id);
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out event bus.
pub struct EventBus {
    sender: broadcast::Sender<OnboardingEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest un-consumed events are dropped and
    /// slow receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// With no subscribers the event is dropped.
    pub fn publish(&self, event: OnboardingEvent) {
        tracing::debug!(event_type = %event.event_type, employee_id = ?event.employee_id, "Publishing onboarding event");
        // A send error only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<OnboardingEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
