//! Skills: a list section, every row strictly required.

use serde::{Deserialize, Serialize};

use super::StepRecord;
use crate::resource::Resource;
use crate::types::DbId;
use crate::validation::{FieldEntry, Section, SectionPolicy};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skill {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<DbId>,
    pub skill_area: String,
    pub acquired_from: String,
    pub grade: String,
    pub summary: String,
}

impl Section for Skill {
    const LABEL: &'static str = "Skills";
    const POLICY: SectionPolicy = SectionPolicy::Strict;

    fn fields(&self) -> Vec<FieldEntry> {
        vec![
            FieldEntry::text("skill_area", &self.skill_area),
            FieldEntry::text("acquired_from", &self.acquired_from),
            FieldEntry::text("grade", &self.grade),
            FieldEntry::text("summary", &self.summary),
        ]
    }
}

impl StepRecord for Skill {
    const RESOURCE: Resource = Resource::Skill;

    fn record_id(&self) -> Option<DbId> {
        self.skill_id
    }

    fn set_record_id(&mut self, id: DbId) {
        self.skill_id = Some(id);
    }

    fn set_employee_id(&mut self, employee_id: DbId) {
        self.employee_id = Some(employee_id);
    }
}
