//! Insurance nominee details. The whole section is optional.

use serde::{Deserialize, Serialize};

use super::{Gender, MaritalStatus, StepRecord};
use crate::dates::age_on;
use crate::resource::Resource;
use crate::types::{Date, DbId};
use crate::validation::{FieldEntry, Section, SectionPolicy};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsuranceDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<DbId>,
    pub insured_name: String,
    pub date_of_birth: Option<Date>,
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub marital_status: Option<MaritalStatus>,
}

impl InsuranceDetails {
    /// Set the date of birth and recompute `age` as of `today`.
    pub fn set_date_of_birth(&mut self, dob: Date, today: Date) {
        self.date_of_birth = Some(dob);
        self.age = Some(age_on(dob, today));
    }

    /// Fill a missing `age` from the date of birth.
    pub fn fill_age(&mut self, today: Date) {
        if self.age.is_none() {
            if let Some(dob) = self.date_of_birth {
                self.age = Some(age_on(dob, today));
            }
        }
    }
}

impl Section for InsuranceDetails {
    const LABEL: &'static str = "Insurance Details";
    const POLICY: SectionPolicy = SectionPolicy::OptionalUnlessStarted;

    fn fields(&self) -> Vec<FieldEntry> {
        vec![
            FieldEntry::text("insured_name", &self.insured_name),
            FieldEntry::value("date_of_birth", &self.date_of_birth),
            FieldEntry::value("age", &self.age),
            FieldEntry::value("gender", &self.gender),
            FieldEntry::value("marital_status", &self.marital_status),
        ]
    }
}

impl StepRecord for InsuranceDetails {
    const RESOURCE: Resource = Resource::Insurance;

    fn record_id(&self) -> Option<DbId> {
        self.insurance_id
    }

    fn set_record_id(&mut self, id: DbId) {
        self.insurance_id = Some(id);
    }

    fn set_employee_id(&mut self, employee_id: DbId) {
        self.employee_id = Some(employee_id);
    }

    fn fill_derived(&mut self, today: Date) {
        self.fill_age(today);
    }
}
