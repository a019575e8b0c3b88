//! Employee onboarding flow.
//!
//! - [`save_record`]: the per-step save contract (validate, create or
//!   update, write the assigned id back).
//! - [`OnboardingWizard`]: the nine-tab wizard that only advances after a
//!   successful save.
//! - [`DraftStore`]: a JSON file holding an in-progress draft between runs.

pub mod draft;
pub mod error;
pub mod save;
pub mod store;
pub mod wizard;

pub use draft::OnboardingDraft;
pub use error::StepError;
pub use save::{save_record, SaveOutcome};
pub use store::{DraftStore, DraftStoreError};
pub use wizard::{OnboardingWizard, StepReport};
