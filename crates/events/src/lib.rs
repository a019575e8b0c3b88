//! Onboarding event bus.
//!
//! - [`EventBus`] is an in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`OnboardingEvent`] is the event envelope the wizard publishes when a
//!   step is saved or skipped, when a row is deleted and when onboarding
//!   completes.
//! - [`EventLog`] subscribes and writes every event through `tracing`.

pub mod bus;
pub mod log;

pub use bus::{EventBus, OnboardingEvent};
pub use log::EventLog;
