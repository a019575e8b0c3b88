//! Domain core for employee onboarding.
//!
//! Typed section records, the unified section validation policy, the
//! wizard step machine and row navigation for list-valued sections. Pure
//! logic only; no network or file access lives here.

pub mod dates;
pub mod error;
pub mod messages;
pub mod onboarding_wizard;
pub mod resource;
pub mod rows;
pub mod sections;
pub mod types;
pub mod validation;
