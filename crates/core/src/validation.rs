//! Section validation policy.
//!
//! Every onboarding section is checked by the same rule, parametrised by a
//! [`SectionPolicy`]:
//!
//! - [`SectionPolicy::Strict`]: every required field must be filled.
//! - [`SectionPolicy::OptionalUnlessStarted`]: an entirely empty section is
//!   skipped; once any field is filled, every required field must be filled.
//!
//! Format checks (mobile numbers, IFSC codes, emails) run only after the
//! presence check passes and only against non-empty values.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

// ---------------------------------------------------------------------------
// Rule names
// ---------------------------------------------------------------------------

/// A required field was left empty.
pub const RULE_REQUIRED: &str = "required";

/// A filled field does not have the expected shape.
pub const RULE_FORMAT: &str = "format";

/// Two fields contradict each other (e.g. expiry before issue).
pub const RULE_CONSISTENCY: &str = "consistency";

/// Ten-digit mobile number.
const MOBILE_PATTERN: &str = r"^\d{10}$";

/// Indian Financial System Code: four letters, a zero, six alphanumerics.
const IFSC_PATTERN: &str = r"^[A-Z]{4}0[A-Z0-9]{6}$";

/// Bank account numbers are 9 to 18 digits.
const ACCOUNT_NUMBER_PATTERN: &str = r"^\d{9,18}$";

static MOBILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(MOBILE_PATTERN).expect("valid regex"));

static IFSC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(IFSC_PATTERN).expect("valid regex"));

static ACCOUNT_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(ACCOUNT_NUMBER_PATTERN).expect("valid regex"));

// ---------------------------------------------------------------------------
// Policy and field descriptors
// ---------------------------------------------------------------------------

/// How a section treats an entirely empty form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionPolicy {
    Strict,
    OptionalUnlessStarted,
}

/// Presence information for one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEntry {
    pub name: &'static str,
    pub filled: bool,
    pub required: bool,
}

impl FieldEntry {
    /// A required text field; whitespace-only counts as empty.
    pub fn text(name: &'static str, value: &str) -> Self {
        Self {
            name,
            filled: !value.trim().is_empty(),
            required: true,
        }
    }

    /// A required typed field (date, number, enum).
    pub fn value<T>(name: &'static str, value: &Option<T>) -> Self {
        Self {
            name,
            filled: value.is_some(),
            required: true,
        }
    }

    /// Mark this field as never required. It still counts towards
    /// "section started" for optional sections.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// Outcome of a successful section check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionCheck {
    /// Optional section left entirely empty; nothing to persist.
    Skip,
    /// Section is complete and may be persisted.
    Ready,
}

// ---------------------------------------------------------------------------
// Violations
// ---------------------------------------------------------------------------

/// A single field-level violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub rule: String,
    pub message: String,
}

impl FieldViolation {
    pub fn required(field: &str) -> Self {
        Self {
            field: field.to_string(),
            rule: RULE_REQUIRED.to_string(),
            message: format!("{} is required", humanize(field)),
        }
    }

    pub fn format(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            rule: RULE_FORMAT.to_string(),
            message: message.into(),
        }
    }

    pub fn consistency(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            rule: RULE_CONSISTENCY.to_string(),
            message: message.into(),
        }
    }
}

/// All violations found in one section. Blocks the save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{section}: {}", join_messages(.violations))]
pub struct ValidationErrors {
    pub section: String,
    pub violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    pub fn new(section: impl Into<String>, violations: Vec<FieldViolation>) -> Self {
        Self {
            section: section.into(),
            violations,
        }
    }

    /// Names of the fields that failed the presence check, in form order.
    pub fn missing_fields(&self) -> Vec<&str> {
        self.violations
            .iter()
            .filter(|v| v.rule == RULE_REQUIRED)
            .map(|v| v.field.as_str())
            .collect()
    }

    /// Whether a given field has any violation.
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

fn join_messages(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// `date_of_birth` -> `date of birth`.
pub fn humanize(field: &str) -> String {
    field.replace('_', " ")
}

// ---------------------------------------------------------------------------
// Section trait
// ---------------------------------------------------------------------------

/// A form section subject to the unified validation policy.
pub trait Section {
    /// Display name used in error summaries.
    const LABEL: &'static str;

    const POLICY: SectionPolicy;

    /// Presence descriptors for every field, in form order.
    fn fields(&self) -> Vec<FieldEntry>;

    /// Shape and cross-field checks, run only once presence passes.
    fn format_violations(&self) -> Vec<FieldViolation> {
        Vec::new()
    }

    /// Whether no field at all has been filled.
    fn is_blank(&self) -> bool {
        self.fields().iter().all(|f| !f.filled)
    }

    /// Run the full check for this section.
    fn check(&self) -> Result<SectionCheck, ValidationErrors> {
        let outcome = check_fields(Self::LABEL, Self::POLICY, &self.fields())?;
        if outcome == SectionCheck::Ready {
            let violations = self.format_violations();
            if !violations.is_empty() {
                return Err(ValidationErrors::new(Self::LABEL, violations));
            }
        }
        Ok(outcome)
    }
}

/// Apply a policy to a list of field descriptors.
pub fn check_fields(
    label: &str,
    policy: SectionPolicy,
    fields: &[FieldEntry],
) -> Result<SectionCheck, ValidationErrors> {
    let started = fields.iter().any(|f| f.filled);
    if policy == SectionPolicy::OptionalUnlessStarted && !started {
        return Ok(SectionCheck::Skip);
    }

    let missing: Vec<FieldViolation> = fields
        .iter()
        .filter(|f| f.required && !f.filled)
        .map(|f| FieldViolation::required(f.name))
        .collect();

    if missing.is_empty() {
        Ok(SectionCheck::Ready)
    } else {
        Err(ValidationErrors::new(label, missing))
    }
}

/// Check a section through its [`Section`] implementation.
pub fn check_section<S: Section>(section: &S) -> Result<SectionCheck, ValidationErrors> {
    section.check()
}

// ---------------------------------------------------------------------------
// Format helpers
// ---------------------------------------------------------------------------

pub fn is_valid_mobile(value: &str) -> bool {
    MOBILE_RE.is_match(value.trim())
}

pub fn is_valid_ifsc(value: &str) -> bool {
    IFSC_RE.is_match(&value.trim().to_uppercase())
}

pub fn is_valid_account_number(value: &str) -> bool {
    ACCOUNT_NUMBER_RE.is_match(value.trim())
}

pub fn is_valid_email(value: &str) -> bool {
    value.trim().to_string().validate_email()
}

/// Push a mobile-number violation when `value` is filled but malformed.
pub fn check_mobile(field: &str, value: &str, out: &mut Vec<FieldViolation>) {
    if !value.trim().is_empty() && !is_valid_mobile(value) {
        out.push(FieldViolation::format(
            field,
            format!("{} must be a 10-digit number", humanize(field)),
        ));
    }
}
