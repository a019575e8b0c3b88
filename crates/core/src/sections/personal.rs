//! Personal details: the root record of an employee.

use serde::{Deserialize, Serialize};

use super::{Gender, StepRecord};
use crate::resource::Resource;
use crate::types::{Date, DbId};
use crate::validation::{
    check_mobile, is_valid_email, FieldEntry, FieldViolation, Section, SectionPolicy,
};

/// Saving this record creates the employee and yields the `employee_id`
/// every other section hangs off.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<DbId>,
    pub first_name: String,
    pub last_name: String,
    pub mobile: String,
    pub date_of_birth: Option<Date>,
    pub address: String,
    pub email: String,
    pub gender: Option<Gender>,
}

impl Section for PersonalDetails {
    const LABEL: &'static str = "Personal Details";
    const POLICY: SectionPolicy = SectionPolicy::Strict;

    fn fields(&self) -> Vec<FieldEntry> {
        vec![
            FieldEntry::text("first_name", &self.first_name),
            FieldEntry::text("last_name", &self.last_name),
            FieldEntry::text("mobile", &self.mobile),
            FieldEntry::value("date_of_birth", &self.date_of_birth),
            FieldEntry::text("address", &self.address),
            FieldEntry::text("email", &self.email).optional(),
            FieldEntry::value("gender", &self.gender).optional(),
        ]
    }

    fn format_violations(&self) -> Vec<FieldViolation> {
        let mut out = Vec::new();
        check_mobile("mobile", &self.mobile, &mut out);
        if !self.email.trim().is_empty() && !is_valid_email(&self.email) {
            out.push(FieldViolation::format("email", "email is not a valid address"));
        }
        out
    }
}

impl StepRecord for PersonalDetails {
    const RESOURCE: Resource = Resource::Employee;

    fn record_id(&self) -> Option<DbId> {
        self.employee_id
    }

    fn set_record_id(&mut self, id: DbId) {
        self.employee_id = Some(id);
    }

    fn set_employee_id(&mut self, employee_id: DbId) {
        self.employee_id = Some(employee_id);
    }
}

impl PersonalDetails {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}
