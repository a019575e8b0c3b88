//! The in-progress onboarding record: one entry per wizard tab.

use hrms_core::rows::RecordRows;
use hrms_core::sections::{
    BankDetails, DocumentChecklist, FamilyDetails, InsuranceDetails, PassportDetails,
    PersonalDetails, PriorExperience, Reference, Skill,
};
use hrms_core::types::DbId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OnboardingDraft {
    pub personal: PersonalDetails,
    pub passport: PassportDetails,
    pub skills: RecordRows<Skill>,
    pub experience: RecordRows<PriorExperience>,
    pub family: FamilyDetails,
    pub insurance: InsuranceDetails,
    pub references: RecordRows<Reference>,
    pub bank: BankDetails,
    pub documents: DocumentChecklist,
}

impl OnboardingDraft {
    /// Set once personal details have been created.
    pub fn employee_id(&self) -> Option<DbId> {
        self.personal.employee_id
    }
}
