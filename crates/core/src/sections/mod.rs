//! Typed records for each onboarding section.
//!
//! One record type per wizard step. Every record knows its backend
//! resource, its own primary key (absent until the first save) and the
//! owning employee's id, and implements [`Section`] for validation.

pub mod bank;
pub mod documents;
pub mod experience;
pub mod family;
pub mod insurance;
pub mod passport;
pub mod personal;
pub mod references;
pub mod skills;

pub use bank::BankDetails;
pub use documents::{DocumentChecklist, DocumentKind};
pub use experience::PriorExperience;
pub use family::FamilyDetails;
pub use insurance::InsuranceDetails;
pub use passport::PassportDetails;
pub use personal::PersonalDetails;
pub use references::Reference;
pub use skills::Skill;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::resource::Resource;
use crate::types::{Date, DbId};
use crate::validation::Section;

// ---------------------------------------------------------------------------
// Shared field enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaritalStatus {
    Single,
    Married,
    Divorced,
    Widowed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    Savings,
    Current,
    Salary,
}

// ---------------------------------------------------------------------------
// StepRecord
// ---------------------------------------------------------------------------

/// A record persisted by one wizard step.
pub trait StepRecord:
    Section + Serialize + DeserializeOwned + Clone + Default + Send + Sync + 'static
{
    const RESOURCE: Resource;

    /// Backend-assigned primary key; `None` until the first successful create.
    fn record_id(&self) -> Option<DbId>;

    fn set_record_id(&mut self, id: DbId);

    /// Attach the owning employee. Personal details own the id itself.
    fn set_employee_id(&mut self, employee_id: DbId);

    /// Recompute fields derived from other fields, as of `today`.
    fn fill_derived(&mut self, _today: Date) {}

    /// JSON body sent to `add` / `update`.
    fn payload(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

