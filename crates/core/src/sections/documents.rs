//! Document checklist, the final onboarding step.
//!
//! Nine documents are mandatory and eight optional. A document counts as
//! provided when the file store already holds it (`<field>_url`) or when a
//! local file is queued for upload with the next save.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::StepRecord;
use crate::resource::Resource;
use crate::types::{Date, DbId};
use crate::validation::{FieldEntry, Section, SectionPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Resume,
    Photograph,
    AadhaarCard,
    PanCard,
    TenthMarksheet,
    TwelfthMarksheet,
    GraduationCertificate,
    AddressProof,
    CancelledCheque,
    PostGraduationCertificate,
    ExperienceLetter,
    RelievingLetter,
    SalarySlips,
    PassportCopy,
    DrivingLicence,
    VoterId,
    MedicalCertificate,
}

impl DocumentKind {
    pub const REQUIRED: [DocumentKind; 9] = [
        Self::Resume,
        Self::Photograph,
        Self::AadhaarCard,
        Self::PanCard,
        Self::TenthMarksheet,
        Self::TwelfthMarksheet,
        Self::GraduationCertificate,
        Self::AddressProof,
        Self::CancelledCheque,
    ];

    pub const OPTIONAL: [DocumentKind; 8] = [
        Self::PostGraduationCertificate,
        Self::ExperienceLetter,
        Self::RelievingLetter,
        Self::SalarySlips,
        Self::PassportCopy,
        Self::DrivingLicence,
        Self::VoterId,
        Self::MedicalCertificate,
    ];

    /// Every kind, required first, in form order.
    pub fn all() -> impl Iterator<Item = DocumentKind> {
        Self::REQUIRED.into_iter().chain(Self::OPTIONAL)
    }

    /// Multipart field name for uploads.
    pub fn field_name(self) -> &'static str {
        match self {
            Self::Resume => "resume",
            Self::Photograph => "photograph",
            Self::AadhaarCard => "aadhaar_card",
            Self::PanCard => "pan_card",
            Self::TenthMarksheet => "tenth_marksheet",
            Self::TwelfthMarksheet => "twelfth_marksheet",
            Self::GraduationCertificate => "graduation_certificate",
            Self::AddressProof => "address_proof",
            Self::CancelledCheque => "cancelled_cheque",
            Self::PostGraduationCertificate => "post_graduation_certificate",
            Self::ExperienceLetter => "experience_letter",
            Self::RelievingLetter => "relieving_letter",
            Self::SalarySlips => "salary_slips",
            Self::PassportCopy => "passport_copy",
            Self::DrivingLicence => "driving_licence",
            Self::VoterId => "voter_id",
            Self::MedicalCertificate => "medical_certificate",
        }
    }

    /// Key under which the backend returns the stored filename.
    pub fn url_key(self) -> String {
        format!("{}_url", self.field_name())
    }

    pub fn is_required(self) -> bool {
        Self::REQUIRED.contains(&self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentChecklist {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checklist_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<DbId>,
    pub verification_date: Option<Date>,
    /// Stored filenames keyed by `<field>_url`.
    #[serde(flatten, deserialize_with = "de_urls")]
    pub stored: BTreeMap<String, String>,
    /// Local files queued for the next save.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub uploads: BTreeMap<DocumentKind, PathBuf>,
}

/// Keep only non-empty string `*_url` entries from the flattened remainder.
fn de_urls<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter(|(key, _)| key.ends_with("_url"))
        .filter_map(|(key, value)| match value {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some((key, s)),
            _ => None,
        })
        .collect())
}

impl DocumentChecklist {
    /// Stored filename for a document, if the file store has it.
    pub fn stored_file(&self, kind: DocumentKind) -> Option<&str> {
        self.stored.get(&kind.url_key()).map(String::as_str)
    }

    /// Queue a local file for upload.
    pub fn attach(&mut self, kind: DocumentKind, path: impl Into<PathBuf>) {
        self.uploads.insert(kind, path.into());
    }

    pub fn is_provided(&self, kind: DocumentKind) -> bool {
        self.stored_file(kind).is_some() || self.uploads.contains_key(&kind)
    }

    /// Merge stored filenames returned by a save and clear the upload queue.
    pub fn absorb_saved(&mut self, saved: &DocumentChecklist) {
        for (key, file) in &saved.stored {
            self.stored.insert(key.clone(), file.clone());
        }
        if saved.verification_date.is_some() {
            self.verification_date = saved.verification_date;
        }
        self.uploads.clear();
    }

    /// Plain form fields sent alongside the uploaded files.
    pub fn form_fields(&self) -> Vec<(String, String)> {
        let mut fields = Vec::new();
        if let Some(id) = self.checklist_id {
            fields.push(("checklist_id".to_string(), id.to_string()));
        }
        if let Some(id) = self.employee_id {
            fields.push(("employee_id".to_string(), id.to_string()));
        }
        if let Some(date) = self.verification_date {
            fields.push(("verification_date".to_string(), date.to_string()));
        }
        fields
    }
}

impl Section for DocumentChecklist {
    const LABEL: &'static str = "Document Checklist";
    const POLICY: SectionPolicy = SectionPolicy::Strict;

    fn fields(&self) -> Vec<FieldEntry> {
        let mut fields: Vec<FieldEntry> = DocumentKind::all()
            .map(|kind| FieldEntry {
                name: kind.field_name(),
                filled: self.is_provided(kind),
                required: kind.is_required(),
            })
            .collect();
        fields.push(FieldEntry::value("verification_date", &self.verification_date).optional());
        fields
    }
}

impl StepRecord for DocumentChecklist {
    const RESOURCE: Resource = Resource::DocumentChecklist;

    fn record_id(&self) -> Option<DbId> {
        self.checklist_id
    }

    fn set_record_id(&mut self, id: DbId) {
        self.checklist_id = Some(id);
    }

    fn set_employee_id(&mut self, employee_id: DbId) {
        self.employee_id = Some(employee_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::SectionCheck;
    use serde_json::json;

    #[test]
    fn nine_required_and_eight_optional() {
        assert_eq!(DocumentKind::all().count(), 17);
        assert_eq!(DocumentKind::all().filter(|k| k.is_required()).count(), 9);
    }

    #[test]
    fn empty_checklist_lists_required_documents_only() {
        let err = DocumentChecklist::default().check().unwrap_err();
        let missing = err.missing_fields();
        assert_eq!(missing.len(), 9);
        assert!(missing.contains(&"pan_card"));
        assert!(!missing.contains(&"voter_id"));
    }

    #[test]
    fn stored_and_queued_documents_both_count() {
        let mut checklist = DocumentChecklist::default();
        for (i, kind) in DocumentKind::REQUIRED.into_iter().enumerate() {
            if i % 2 == 0 {
                checklist.attach(kind, format!("/tmp/{}.pdf", kind.field_name()));
            } else {
                checklist
                    .stored
                    .insert(kind.url_key(), format!("{}.pdf", kind.field_name()));
            }
        }
        assert_eq!(checklist.check().unwrap(), SectionCheck::Ready);
    }

    #[test]
    fn backend_record_deserializes_urls_and_ignores_other_keys() {
        let checklist: DocumentChecklist = serde_json::from_value(json!({
            "checklist_id": 5,
            "employee_id": 9,
            "resume_url": "resume_9.pdf",
            "pan_card_url": null,
            "voter_id_url": "",
            "created_at": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(checklist.checklist_id, Some(5));
        assert_eq!(checklist.stored_file(DocumentKind::Resume), Some("resume_9.pdf"));
        assert_eq!(checklist.stored_file(DocumentKind::PanCard), None);
        assert_eq!(checklist.stored_file(DocumentKind::VoterId), None);
        assert_eq!(checklist.stored.len(), 1);
    }

    #[test]
    fn absorb_saved_clears_queue() {
        let mut draft = DocumentChecklist::default();
        draft.attach(DocumentKind::Resume, "/tmp/cv.pdf");
        let mut saved = DocumentChecklist::default();
        saved
            .stored
            .insert("resume_url".into(), "resume_1.pdf".into());
        draft.absorb_saved(&saved);
        assert!(draft.uploads.is_empty());
        assert_eq!(draft.stored_file(DocumentKind::Resume), Some("resume_1.pdf"));
    }

    #[test]
    fn form_fields_carry_ids_and_date() {
        let checklist = DocumentChecklist {
            checklist_id: Some(3),
            employee_id: Some(9),
            verification_date: Date::from_ymd_opt(2024, 5, 1),
            ..Default::default()
        };
        assert_eq!(
            checklist.form_fields(),
            vec![
                ("checklist_id".to_string(), "3".to_string()),
                ("employee_id".to_string(), "9".to_string()),
                ("verification_date".to_string(), "2024-05-01".to_string()),
            ]
        );
    }
}
