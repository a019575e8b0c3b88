//! Professional references: a list section, optional unless started.

use serde::{Deserialize, Serialize};

use super::StepRecord;
use crate::resource::Resource;
use crate::types::DbId;
use crate::validation::{check_mobile, FieldEntry, FieldViolation, Section, SectionPolicy};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reference {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<DbId>,
    pub name: String,
    pub mobile: String,
    pub area: String,
    pub organisation: String,
    pub relationship: String,
}

impl Section for Reference {
    const LABEL: &'static str = "References";
    const POLICY: SectionPolicy = SectionPolicy::OptionalUnlessStarted;

    fn fields(&self) -> Vec<FieldEntry> {
        vec![
            FieldEntry::text("name", &self.name),
            FieldEntry::text("mobile", &self.mobile),
            FieldEntry::text("area", &self.area),
            FieldEntry::text("organisation", &self.organisation),
            FieldEntry::text("relationship", &self.relationship),
        ]
    }

    fn format_violations(&self) -> Vec<FieldViolation> {
        let mut out = Vec::new();
        check_mobile("mobile", &self.mobile, &mut out);
        out
    }
}

impl StepRecord for Reference {
    const RESOURCE: Resource = Resource::Reference;

    fn record_id(&self) -> Option<DbId> {
        self.reference_id
    }

    fn set_record_id(&mut self, id: DbId) {
        self.reference_id = Some(id);
    }

    fn set_employee_id(&mut self, employee_id: DbId) {
        self.employee_id = Some(employee_id);
    }
}
