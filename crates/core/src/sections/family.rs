//! Family details.
//!
//! The parents block is always required. The spouse block only applies to
//! married employees, and then follows the optional-unless-started rule.
//! For any other marital status spouse fields are ignored by validation
//! and stripped from the payload, but left untouched in the draft.

use serde::{Deserialize, Serialize};

use super::{MaritalStatus, StepRecord};
use crate::resource::Resource;
use crate::types::{Date, DbId};
use crate::validation::{
    check_fields, FieldEntry, FieldViolation, Section, SectionCheck, SectionPolicy,
    ValidationErrors,
};

/// Payload keys dropped when the employee is not married.
const SPOUSE_KEYS: [&str; 3] = ["spouse_name", "spouse_date_of_birth", "spouse_occupation"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FamilyDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<DbId>,
    pub father_name: String,
    pub father_date_of_birth: Option<Date>,
    pub father_occupation: String,
    pub mother_name: String,
    pub mother_date_of_birth: Option<Date>,
    pub mother_occupation: String,
    pub marital_status: Option<MaritalStatus>,
    pub spouse_name: String,
    pub spouse_date_of_birth: Option<Date>,
    pub spouse_occupation: String,
}

impl FamilyDetails {
    pub fn is_married(&self) -> bool {
        self.marital_status == Some(MaritalStatus::Married)
    }

    fn parent_fields(&self) -> Vec<FieldEntry> {
        vec![
            FieldEntry::text("father_name", &self.father_name),
            FieldEntry::value("father_date_of_birth", &self.father_date_of_birth),
            FieldEntry::text("father_occupation", &self.father_occupation),
            FieldEntry::text("mother_name", &self.mother_name),
            FieldEntry::value("mother_date_of_birth", &self.mother_date_of_birth),
            FieldEntry::text("mother_occupation", &self.mother_occupation),
        ]
    }

    fn spouse_fields(&self) -> Vec<FieldEntry> {
        vec![
            FieldEntry::text("spouse_name", &self.spouse_name),
            FieldEntry::value("spouse_date_of_birth", &self.spouse_date_of_birth),
            FieldEntry::text("spouse_occupation", &self.spouse_occupation),
        ]
    }
}

impl Section for FamilyDetails {
    const LABEL: &'static str = "Family Details";
    const POLICY: SectionPolicy = SectionPolicy::Strict;

    fn fields(&self) -> Vec<FieldEntry> {
        let mut fields = self.parent_fields();
        fields.push(FieldEntry::value("marital_status", &self.marital_status).optional());
        if self.is_married() {
            fields.extend(self.spouse_fields().into_iter().map(FieldEntry::optional));
        }
        fields
    }

    fn check(&self) -> Result<SectionCheck, ValidationErrors> {
        let mut violations: Vec<FieldViolation> = Vec::new();

        if let Err(err) = check_fields(Self::LABEL, SectionPolicy::Strict, &self.parent_fields()) {
            violations.extend(err.violations);
        }
        if self.is_married() {
            if let Err(err) = check_fields(
                Self::LABEL,
                SectionPolicy::OptionalUnlessStarted,
                &self.spouse_fields(),
            ) {
                violations.extend(err.violations);
            }
        }

        if violations.is_empty() {
            Ok(SectionCheck::Ready)
        } else {
            Err(ValidationErrors::new(Self::LABEL, violations))
        }
    }
}

impl StepRecord for FamilyDetails {
    const RESOURCE: Resource = Resource::Family;

    fn record_id(&self) -> Option<DbId> {
        self.family_id
    }

    fn set_record_id(&mut self, id: DbId) {
        self.family_id = Some(id);
    }

    fn set_employee_id(&mut self, employee_id: DbId) {
        self.employee_id = Some(employee_id);
    }

    fn payload(&self) -> Result<serde_json::Value, serde_json::Error> {
        let mut value = serde_json::to_value(self)?;
        if !self.is_married() {
            if let Some(obj) = value.as_object_mut() {
                for key in SPOUSE_KEYS {
                    obj.remove(key);
                }
            }
        }
        Ok(value)
    }
}
