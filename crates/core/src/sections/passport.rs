//! Passport details. The whole section is optional.

use serde::{Deserialize, Serialize};

use super::StepRecord;
use crate::resource::Resource;
use crate::types::{Date, DbId};
use crate::validation::{FieldEntry, FieldViolation, Section, SectionPolicy};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassportDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passport_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<DbId>,
    pub passport_number: String,
    pub place_of_issue: String,
    pub date_of_issue: Option<Date>,
    pub date_of_expiry: Option<Date>,
}

impl Section for PassportDetails {
    const LABEL: &'static str = "Passport Details";
    const POLICY: SectionPolicy = SectionPolicy::OptionalUnlessStarted;

    fn fields(&self) -> Vec<FieldEntry> {
        vec![
            FieldEntry::text("passport_number", &self.passport_number),
            FieldEntry::text("place_of_issue", &self.place_of_issue),
            FieldEntry::value("date_of_issue", &self.date_of_issue),
            FieldEntry::value("date_of_expiry", &self.date_of_expiry),
        ]
    }

    fn format_violations(&self) -> Vec<FieldViolation> {
        match (self.date_of_issue, self.date_of_expiry) {
            (Some(issued), Some(expires)) if expires <= issued => {
                vec![FieldViolation::consistency(
                    "date_of_expiry",
                    "date of expiry must be after date of issue",
                )]
            }
            _ => Vec::new(),
        }
    }
}

impl StepRecord for PassportDetails {
    const RESOURCE: Resource = Resource::Passport;

    fn record_id(&self) -> Option<DbId> {
        self.passport_id
    }

    fn set_record_id(&mut self, id: DbId) {
        self.passport_id = Some(id);
    }

    fn set_employee_id(&mut self, employee_id: DbId) {
        self.employee_id = Some(employee_id);
    }
}
