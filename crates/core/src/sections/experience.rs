//! Prior experience: a list section, optional unless started.

use serde::{Deserialize, Serialize};

use super::StepRecord;
use crate::dates::{format_tenure, months_between};
use crate::resource::Resource;
use crate::types::{Date, DbId};
use crate::validation::{FieldEntry, FieldViolation, Section, SectionPolicy};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorExperience {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<DbId>,
    pub post: String,
    pub department: String,
    pub company: String,
    pub city: String,
    pub tenure: String,
    pub joined_on: Option<Date>,
    pub left_on: Option<Date>,
}

impl PriorExperience {
    /// Derive `tenure` from the join and leave dates when both are set.
    pub fn fill_tenure(&mut self) {
        if let (Some(joined), Some(left)) = (self.joined_on, self.left_on) {
            if left >= joined {
                self.tenure = format_tenure(months_between(joined, left));
            }
        }
    }
}

impl Section for PriorExperience {
    const LABEL: &'static str = "Prior Experience";
    const POLICY: SectionPolicy = SectionPolicy::OptionalUnlessStarted;

    fn fields(&self) -> Vec<FieldEntry> {
        vec![
            FieldEntry::text("post", &self.post),
            FieldEntry::text("department", &self.department),
            FieldEntry::text("company", &self.company),
            FieldEntry::text("city", &self.city),
            FieldEntry::text("tenure", &self.tenure),
            FieldEntry::value("joined_on", &self.joined_on).optional(),
            FieldEntry::value("left_on", &self.left_on).optional(),
        ]
    }

    fn format_violations(&self) -> Vec<FieldViolation> {
        match (self.joined_on, self.left_on) {
            (Some(joined), Some(left)) if left < joined => vec![FieldViolation::consistency(
                "left_on",
                "left on must not precede joined on",
            )],
            _ => Vec::new(),
        }
    }
}

impl StepRecord for PriorExperience {
    const RESOURCE: Resource = Resource::Experience;

    fn record_id(&self) -> Option<DbId> {
        self.experience_id
    }

    fn set_record_id(&mut self, id: DbId) {
        self.experience_id = Some(id);
    }

    fn set_employee_id(&mut self, employee_id: DbId) {
        self.employee_id = Some(employee_id);
    }

    fn fill_derived(&mut self, _today: Date) {
        self.fill_tenure();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::SectionCheck;

    #[test]
    fn blank_experience_is_skipped() {
        assert_eq!(PriorExperience::default().check().unwrap(), SectionCheck::Skip);
    }

    #[test]
    fn company_alone_is_rejected() {
        let row = PriorExperience {
            company: "Infosys".into(),
            ..Default::default()
        };
        let err = row.check().unwrap_err();
        assert_eq!(err.missing_fields(), vec!["post", "department", "city", "tenure"]);
    }

    #[test]
    fn tenure_is_derived_from_dates() {
        let mut row = PriorExperience {
            joined_on: Date::from_ymd_opt(2019, 3, 1),
            left_on: Date::from_ymd_opt(2022, 5, 1),
            ..Default::default()
        };
        row.fill_tenure();
        assert_eq!(row.tenure, "3 years 2 months");
    }

    #[test]
    fn reversed_dates_are_rejected() {
        let row = PriorExperience {
            post: "Engineer".into(),
            department: "R&D".into(),
            company: "Infosys".into(),
            city: "Pune".into(),
            tenure: "1 year".into(),
            joined_on: Date::from_ymd_opt(2022, 1, 1),
            left_on: Date::from_ymd_opt(2021, 1, 1),
            ..Default::default()
        };
        assert!(row.check().unwrap_err().has_field("left_on"));
    }
}
