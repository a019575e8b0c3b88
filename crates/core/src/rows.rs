//! Row navigation for list-valued sections (skills, experience, references).
//!
//! [`RecordRows`] holds the saved rows fetched for an employee, the index of
//! the row being edited and an editing draft. The draft is always either a
//! copy of `items[index]` or a blank template for a new row; the list itself
//! only changes when a row is saved or deleted.

use serde::{Deserialize, Serialize};

use crate::sections::StepRecord;
use crate::types::DbId;
use crate::validation::Section;

/// Which row the draft belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "index")]
pub enum RowMode {
    Editing(usize),
    AddingNew,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound = "R: StepRecord", default)]
pub struct RecordRows<R> {
    items: Vec<R>,
    mode: RowMode,
    draft: R,
}

impl<R: StepRecord> Default for RecordRows<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            mode: RowMode::AddingNew,
            draft: R::default(),
        }
    }
}

impl<R: StepRecord> RecordRows<R> {
    /// Start from a fetched list; edits the first row, or a blank one if empty.
    pub fn load(items: Vec<R>) -> Self {
        let mut rows = Self {
            items,
            ..Self::default()
        };
        rows.select(0);
        rows
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn mode(&self) -> RowMode {
        self.mode
    }

    /// Index of the row being edited; equals `len()` when adding new.
    pub fn index(&self) -> usize {
        match self.mode {
            RowMode::Editing(i) => i,
            RowMode::AddingNew => self.items.len(),
        }
    }

    pub fn is_adding_new(&self) -> bool {
        self.mode == RowMode::AddingNew
    }

    pub fn draft(&self) -> &R {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut R {
        &mut self.draft
    }

    /// Edit `items[index]`; out-of-range indexes fall back to a blank draft.
    pub fn select(&mut self, index: usize) {
        match self.items.get(index) {
            Some(item) => {
                self.draft = item.clone();
                self.mode = RowMode::Editing(index);
            }
            None => self.add_new(),
        }
    }

    /// Move to the next saved row. Returns `false` at the end of the list.
    pub fn next(&mut self) -> bool {
        match self.mode {
            RowMode::Editing(i) if i + 1 < self.items.len() => {
                self.select(i + 1);
                true
            }
            _ => false,
        }
    }

    /// Move to the previous saved row. From a new draft this is the last row.
    pub fn previous(&mut self) -> bool {
        match self.mode {
            RowMode::Editing(i) if i > 0 => {
                self.select(i - 1);
                true
            }
            RowMode::AddingNew if !self.items.is_empty() => {
                self.select(self.items.len() - 1);
                true
            }
            _ => false,
        }
    }

    /// Start a blank draft positioned past the end of the list.
    pub fn add_new(&mut self) {
        self.draft = R::default();
        self.mode = RowMode::AddingNew;
    }

    /// A blank new-row draft on top of at least one saved row: nothing to save.
    pub fn has_unsaved_blank_draft(&self) -> bool {
        self.is_adding_new() && !self.items.is_empty() && self.draft.is_blank()
    }

    /// Record a successful save of the draft.
    ///
    /// A new row is appended and becomes the edited row; an existing row is
    /// replaced in place.
    pub fn record_saved(&mut self, saved: R) {
        match self.mode {
            RowMode::Editing(i) if i < self.items.len() => {
                self.items[i] = saved.clone();
            }
            _ => {
                self.items.push(saved.clone());
                self.mode = RowMode::Editing(self.items.len() - 1);
            }
        }
        self.draft = saved;
    }

    /// Remove the row with the given id and re-derive a valid selection.
    ///
    /// Removing the edited row selects the row now at its index, clamped to
    /// the shortened list, or a blank new-row draft once the list is empty.
    /// Removing any other row keeps the draft, including unsaved edits.
    /// Returns `false` if no row had that id.
    pub fn remove(&mut self, id: DbId) -> bool {
        let Some(pos) = self.items.iter().position(|r| r.record_id() == Some(id)) else {
            return false;
        };
        self.items.remove(pos);

        match self.mode {
            RowMode::Editing(i) if pos < i => self.mode = RowMode::Editing(i - 1),
            RowMode::Editing(i) if pos == i => {
                if self.items.is_empty() {
                    self.add_new();
                } else {
                    self.select(i.min(self.items.len() - 1));
                }
            }
            RowMode::Editing(_) | RowMode::AddingNew => {}
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sections::Skill;

    fn skill(id: DbId, area: &str) -> Skill {
        Skill {
            skill_id: Some(id),
            employee_id: Some(1),
            skill_area: area.into(),
            acquired_from: "College".into(),
            grade: "A".into(),
            summary: "Solid".into(),
        }
    }

    #[test]
    fn load_selects_first_row() {
        let rows = RecordRows::load(vec![skill(1, "Rust"), skill(2, "SQL")]);
        assert_eq!(rows.mode(), RowMode::Editing(0));
        assert_eq!(rows.draft().skill_area, "Rust");
    }

    #[test]
    fn load_empty_starts_blank() {
        let rows = RecordRows::<Skill>::load(Vec::new());
        assert!(rows.is_adding_new());
        assert_eq!(rows.draft(), &Skill::default());
    }

    #[test]
    fn next_and_previous_stay_in_bounds() {
        let mut rows = RecordRows::load(vec![skill(1, "Rust"), skill(2, "SQL")]);
        assert!(!rows.previous());
        assert!(rows.next());
        assert_eq!(rows.draft().skill_area, "SQL");
        assert!(!rows.next());
        assert!(rows.previous());
        assert_eq!(rows.index(), 0);
    }

    #[test]
    fn add_new_does_not_touch_items() {
        let mut rows = RecordRows::load(vec![skill(1, "Rust")]);
        rows.add_new();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows.index(), 1);
        assert!(rows.has_unsaved_blank_draft());
        rows.draft_mut().skill_area = "Go".into();
        assert!(!rows.has_unsaved_blank_draft());
        assert_eq!(rows.items()[0].skill_area, "Rust");
    }

    #[test]
    fn previous_from_new_draft_goes_to_last_row() {
        let mut rows = RecordRows::load(vec![skill(1, "Rust"), skill(2, "SQL")]);
        rows.add_new();
        assert!(rows.previous());
        assert_eq!(rows.mode(), RowMode::Editing(1));
    }

    #[test]
    fn editing_a_draft_does_not_mutate_the_list() {
        let mut rows = RecordRows::load(vec![skill(1, "Rust")]);
        rows.draft_mut().skill_area = "Rust 2024".into();
        assert_eq!(rows.items()[0].skill_area, "Rust");
    }

    #[test]
    fn record_saved_appends_new_rows_and_replaces_existing() {
        let mut rows = RecordRows::<Skill>::default();
        rows.record_saved(skill(1, "Rust"));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows.mode(), RowMode::Editing(0));

        rows.record_saved(skill(1, "Rust (advanced)"));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows.items()[0].skill_area, "Rust (advanced)");
    }

    #[test]
    fn removing_only_row_reverts_to_blank_draft() {
        let mut rows = RecordRows::load(vec![skill(1, "Rust")]);
        assert!(rows.remove(1));
        assert!(rows.is_empty());
        assert!(rows.is_adding_new());
        assert_eq!(rows.draft(), &Skill::default());
    }

    #[test]
    fn removing_last_row_clamps_index() {
        let mut rows = RecordRows::load(vec![skill(1, "Rust"), skill(2, "SQL"), skill(3, "Go")]);
        rows.select(2);
        assert!(rows.remove(3));
        assert_eq!(rows.mode(), RowMode::Editing(1));
        assert_eq!(rows.draft().skill_area, "SQL");
    }

    #[test]
    fn removing_an_earlier_row_keeps_the_edited_record() {
        let mut rows = RecordRows::load(vec![skill(1, "Rust"), skill(2, "SQL"), skill(3, "Go")]);
        rows.select(1);
        rows.draft_mut().grade = "unsaved edit".into();

        assert!(rows.remove(1));

        assert_eq!(rows.mode(), RowMode::Editing(0));
        assert_eq!(rows.draft().skill_id, Some(2));
        assert_eq!(rows.draft().grade, "unsaved edit");
        assert_eq!(rows.items()[0].skill_id, Some(2));
    }

    #[test]
    fn removing_a_later_row_leaves_the_draft_alone() {
        let mut rows = RecordRows::load(vec![skill(1, "Rust"), skill(2, "SQL"), skill(3, "Go")]);
        rows.select(1);
        rows.draft_mut().grade = "unsaved edit".into();

        assert!(rows.remove(3));

        assert_eq!(rows.mode(), RowMode::Editing(1));
        assert_eq!(rows.draft().skill_id, Some(2));
        assert_eq!(rows.draft().grade, "unsaved edit");
    }

    #[test]
    fn removing_the_edited_row_selects_its_successor() {
        let mut rows = RecordRows::load(vec![skill(1, "Rust"), skill(2, "SQL"), skill(3, "Go")]);
        rows.select(1);

        assert!(rows.remove(2));

        assert_eq!(rows.mode(), RowMode::Editing(1));
        assert_eq!(rows.draft().skill_id, Some(3));
    }

    #[test]
    fn removing_a_saved_row_keeps_a_new_draft() {
        let mut rows = RecordRows::load(vec![skill(1, "Rust")]);
        rows.add_new();
        rows.draft_mut().skill_area = "Go".into();

        assert!(rows.remove(1));

        assert!(rows.is_empty());
        assert!(rows.is_adding_new());
        assert_eq!(rows.draft().skill_area, "Go");
    }

    #[test]
    fn removing_unknown_id_is_a_no_op() {
        let mut rows = RecordRows::load(vec![skill(1, "Rust")]);
        assert!(!rows.remove(99));
        assert_eq!(rows.len(), 1);
    }
}
