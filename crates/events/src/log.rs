//! Structured logging of onboarding events.
//!
//! [`EventLog`] subscribes to the [`EventBus`](crate::bus::EventBus) and
//! writes every [`OnboardingEvent`] through `tracing`. It runs as a
//! background task and stops when the bus is dropped.

use tokio::sync::broadcast;

use crate::bus::{OnboardingEvent, ONBOARDING_COMPLETED};

pub struct EventLog;

impl EventLog {
    /// Run the logging loop until the channel closes.
    ///
    /// Returns the number of events logged.
    pub async fn run(mut receiver: broadcast::Receiver<OnboardingEvent>) -> usize {
        let mut logged = 0;
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    Self::log(&event);
                    logged += 1;
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Event log lagged, some events were not logged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::debug!(logged, "Event bus closed, event log shutting down");
                    break;
                }
            }
        }
        logged
    }

    fn log(event: &OnboardingEvent) {
        let step = event.step.map(|s| s.label());
        if event.event_type == ONBOARDING_COMPLETED {
            tracing::info!(
                employee_id = ?event.employee_id,
                at = %event.timestamp,
                "Onboarding complete"
            );
        } else {
            tracing::info!(
                event_type = %event.event_type,
                employee_id = ?event.employee_id,
                step = ?step,
                record_id = ?event.record_id,
                payload = %event.payload,
                "Onboarding event"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::{EventBus, STEP_SAVED};
    use hrms_core::onboarding_wizard::OnboardingStep;

    #[tokio::test]
    async fn logs_until_bus_is_dropped() {
        let bus = EventBus::default();
        let handle = tokio::spawn(EventLog::run(bus.subscribe()));

        bus.publish(
            OnboardingEvent::new(STEP_SAVED)
                .with_step(OnboardingStep::Bank)
                .with_record(4),
        );
        bus.publish(OnboardingEvent::new(ONBOARDING_COMPLETED).with_employee(Some(1)));
        drop(bus);

        assert_eq!(handle.await.unwrap(), 2);
    }
}
