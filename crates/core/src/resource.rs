//! Backend resources addressed by the onboarding steps.
//!
//! Each resource exposes the same endpoint family under its path segment:
//! `add`, `update`, `getAll`, `by-id/{id}`, `employee/{employee_id}` and
//! `delete/{id}`.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Employee,
    Passport,
    Skill,
    Experience,
    Family,
    Insurance,
    Reference,
    Bank,
    DocumentChecklist,
}

impl Resource {
    pub const ALL: [Resource; 9] = [
        Self::Employee,
        Self::Passport,
        Self::Skill,
        Self::Experience,
        Self::Family,
        Self::Insurance,
        Self::Reference,
        Self::Bank,
        Self::DocumentChecklist,
    ];

    /// Look a resource up by its URL path segment.
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.path() == path)
    }

    /// URL path segment for this resource.
    pub fn path(self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Passport => "passport",
            Self::Skill => "skill",
            Self::Experience => "experience",
            Self::Family => "family",
            Self::Insurance => "insurance",
            Self::Reference => "reference",
            Self::Bank => "bank",
            Self::DocumentChecklist => "document-checklist",
        }
    }

    /// Name of the primary-key field in this resource's records.
    pub fn id_field(self) -> &'static str {
        match self {
            Self::Employee => "employee_id",
            Self::Passport => "passport_id",
            Self::Skill => "skill_id",
            Self::Experience => "experience_id",
            Self::Family => "family_id",
            Self::Insurance => "insurance_id",
            Self::Reference => "reference_id",
            Self::Bank => "bank_id",
            Self::DocumentChecklist => "checklist_id",
        }
    }

    /// Entity name used in not-found errors and log fields.
    pub fn entity(self) -> &'static str {
        match self {
            Self::Employee => "Employee",
            Self::Passport => "PassportDetails",
            Self::Skill => "Skill",
            Self::Experience => "PriorExperience",
            Self::Family => "FamilyDetails",
            Self::Insurance => "InsuranceDetails",
            Self::Reference => "Reference",
            Self::Bank => "BankDetails",
            Self::DocumentChecklist => "DocumentChecklist",
        }
    }

    pub fn add_path(self) -> String {
        format!("{}/add", self.path())
    }

    pub fn update_path(self) -> String {
        format!("{}/update", self.path())
    }

    pub fn get_all_path(self) -> String {
        format!("{}/getAll", self.path())
    }

    pub fn by_id_path(self, id: DbId) -> String {
        format!("{}/by-id/{id}", self.path())
    }

    pub fn by_employee_path(self, employee_id: DbId) -> String {
        format!("{}/employee/{employee_id}", self.path())
    }

    pub fn delete_path(self, id: DbId) -> String {
        format!("{}/delete/{id}", self.path())
    }
}
