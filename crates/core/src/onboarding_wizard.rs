//! Onboarding wizard steps and transition rules.
//!
//! Defines the nine tabs of the employee onboarding wizard, their order,
//! the backend resource each one persists to, and the validation helpers
//! that keep the wizard moving strictly forward one tab at a time.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::resource::Resource;

// ---------------------------------------------------------------------------
// Onboarding status
// ---------------------------------------------------------------------------

/// Status of one employee's onboarding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStatus {
    InProgress,
    Completed,
}

impl OnboardingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

// ---------------------------------------------------------------------------
// Onboarding steps
// ---------------------------------------------------------------------------

/// The nine tabs of the onboarding wizard, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    Personal,
    Passport,
    Skills,
    Experience,
    Family,
    Insurance,
    References,
    Bank,
    Documents,
}

/// Total number of steps in the wizard.
pub const TOTAL_STEPS: u8 = 9;

/// Minimum step number (1-based).
pub const MIN_STEP: u8 = 1;

/// Maximum step number (1-based).
pub const MAX_STEP: u8 = 9;

impl OnboardingStep {
    /// All steps in wizard order.
    pub fn all() -> &'static [OnboardingStep] {
        &[
            Self::Personal,
            Self::Passport,
            Self::Skills,
            Self::Experience,
            Self::Family,
            Self::Insurance,
            Self::References,
            Self::Bank,
            Self::Documents,
        ]
    }

    /// Convert a 1-based step number to an `OnboardingStep`.
    pub fn from_number(n: u8) -> Result<Self, CoreError> {
        match n {
            1 => Ok(Self::Personal),
            2 => Ok(Self::Passport),
            3 => Ok(Self::Skills),
            4 => Ok(Self::Experience),
            5 => Ok(Self::Family),
            6 => Ok(Self::Insurance),
            7 => Ok(Self::References),
            8 => Ok(Self::Bank),
            9 => Ok(Self::Documents),
            _ => Err(CoreError::Validation(format!(
                "Invalid step number {n}. Must be between {MIN_STEP} and {MAX_STEP}"
            ))),
        }
    }

    /// Convert to a 1-based step number.
    pub fn to_number(self) -> u8 {
        match self {
            Self::Personal => 1,
            Self::Passport => 2,
            Self::Skills => 3,
            Self::Experience => 4,
            Self::Family => 5,
            Self::Insurance => 6,
            Self::References => 7,
            Self::Bank => 8,
            Self::Documents => 9,
        }
    }

    /// Human-readable tab label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Personal => "Personal Details",
            Self::Passport => "Passport Details",
            Self::Skills => "Skills",
            Self::Experience => "Prior Experience",
            Self::Family => "Family Details",
            Self::Insurance => "Insurance Details",
            Self::References => "References",
            Self::Bank => "Bank Details",
            Self::Documents => "Document Checklist",
        }
    }

    /// Backend resource this step persists to.
    pub fn resource(self) -> Resource {
        match self {
            Self::Personal => Resource::Employee,
            Self::Passport => Resource::Passport,
            Self::Skills => Resource::Skill,
            Self::Experience => Resource::Experience,
            Self::Family => Resource::Family,
            Self::Insurance => Resource::Insurance,
            Self::References => Resource::Reference,
            Self::Bank => Resource::Bank,
            Self::Documents => Resource::DocumentChecklist,
        }
    }

    /// Whether this step edits a list of rows rather than one record.
    pub fn is_list(self) -> bool {
        matches!(self, Self::Skills | Self::Experience | Self::References)
    }

    /// The step after this one, if any.
    pub fn next(self) -> Option<Self> {
        Self::from_number(self.to_number() + 1).ok()
    }

    /// Whether a successful save here completes onboarding.
    pub fn is_terminal(self) -> bool {
        self == Self::Documents
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a step transition.
///
/// The wizard only ever moves forward, exactly one step at a time, and only
/// after the current step has been saved.
pub fn validate_step_transition(current: u8, next: u8) -> Result<(), CoreError> {
    validate_step_number(current)?;
    validate_step_number(next)?;

    if next != current + 1 {
        return Err(CoreError::Validation(format!(
            "Cannot transition from step {current} to step {next}. \
             Must advance exactly one step."
        )));
    }

    Ok(())
}

/// Validate that a step number is within the valid range.
pub fn validate_step_number(step: u8) -> Result<(), CoreError> {
    if !(MIN_STEP..=MAX_STEP).contains(&step) {
        return Err(CoreError::Validation(format!(
            "Step {step} is out of range ({MIN_STEP}..{MAX_STEP})"
        )));
    }
    Ok(())
}

/// Check that an onboarding run can be marked complete (must be on the last step).
pub fn can_complete(current_step: u8) -> Result<(), CoreError> {
    if current_step != MAX_STEP {
        return Err(CoreError::Validation(format!(
            "Cannot complete onboarding: must be on step {MAX_STEP} (Document Checklist), \
             currently on step {current_step}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
