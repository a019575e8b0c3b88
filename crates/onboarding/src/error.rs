use hrms_client::ApiError;
use hrms_core::error::CoreError;
use hrms_core::messages::BACKEND_UNAVAILABLE;
use hrms_core::onboarding_wizard::OnboardingStep;
use hrms_core::validation::ValidationErrors;

/// Why a wizard action failed. Every variant is recoverable: the draft is
/// left as it was and the user may fix it and retry.
#[derive(Debug, thiserror::Error)]
pub enum StepError {
    /// The section failed local validation; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// A child record was saved before personal details created the employee.
    #[error("Save Personal Details before {section}")]
    EmployeeNotSaved { section: &'static str },

    /// The backend rejected the call or could not be reached.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The backend accepted a create but did not return the new id.
    #[error("{section} was saved but the response has no {field}")]
    MissingId {
        section: &'static str,
        field: &'static str,
    },

    /// A record could not be converted to or from its JSON body.
    #[error("Invalid {section} record: {source}")]
    Encode {
        section: &'static str,
        source: serde_json::Error,
    },

    /// A row action was attempted on a tab that is not a list.
    #[error("{} has no rows", .0.label())]
    NotAListStep(OnboardingStep),

    /// The wizard has already completed.
    #[error("Onboarding is already complete")]
    AlreadyCompleted,

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StepError {
    /// Alert text for this failure.
    pub fn user_message(&self) -> String {
        match self {
            StepError::Api(api) => api.user_message(),
            StepError::MissingId { .. } => BACKEND_UNAVAILABLE.to_string(),
            other => other.to_string(),
        }
    }
}
