//! REST client for the HRMS backend and file store.
//!
//! [`HrmsApi`] wraps the per-resource endpoint family
//! (`add`, `update`, `getAll`, `by-id`, `employee`, `delete`) and the
//! multipart document upload. [`OnboardingBackend`] is the JSON-level seam
//! the onboarding wizard is written against.

pub mod api;
pub mod backend;
pub mod config;
pub mod envelope;
pub mod error;

pub use api::HrmsApi;
pub use backend::{DocumentForm, OnboardingBackend};
pub use config::{ClientConfig, ConfigError};
pub use envelope::ApiEnvelope;
pub use error::ApiError;
