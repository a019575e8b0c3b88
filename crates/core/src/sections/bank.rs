//! Salary bank account details.

use serde::{Deserialize, Serialize};

use super::{AccountType, StepRecord};
use crate::resource::Resource;
use crate::types::DbId;
use crate::validation::{
    check_mobile, is_valid_account_number, is_valid_ifsc, FieldEntry, FieldViolation, Section,
    SectionPolicy,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<DbId>,
    pub account_holder_name: String,
    pub mobile: String,
    pub account_number: String,
    pub ifsc_code: String,
    pub bank_name: String,
    pub branch: String,
    pub account_type: Option<AccountType>,
}

impl Section for BankDetails {
    const LABEL: &'static str = "Bank Details";
    const POLICY: SectionPolicy = SectionPolicy::Strict;

    fn fields(&self) -> Vec<FieldEntry> {
        vec![
            FieldEntry::text("account_holder_name", &self.account_holder_name),
            FieldEntry::text("mobile", &self.mobile),
            FieldEntry::text("account_number", &self.account_number),
            FieldEntry::text("ifsc_code", &self.ifsc_code),
            FieldEntry::text("bank_name", &self.bank_name),
            FieldEntry::text("branch", &self.branch),
            FieldEntry::value("account_type", &self.account_type),
        ]
    }

    fn format_violations(&self) -> Vec<FieldViolation> {
        let mut out = Vec::new();
        check_mobile("mobile", &self.mobile, &mut out);
        if !is_valid_account_number(&self.account_number) {
            out.push(FieldViolation::format(
                "account_number",
                "account number must be 9 to 18 digits",
            ));
        }
        if !is_valid_ifsc(&self.ifsc_code) {
            out.push(FieldViolation::format(
                "ifsc_code",
                "ifsc code must look like ABCD0123456",
            ));
        }
        out
    }
}

impl StepRecord for BankDetails {
    const RESOURCE: Resource = Resource::Bank;

    fn record_id(&self) -> Option<DbId> {
        self.bank_id
    }

    fn set_record_id(&mut self, id: DbId) {
        self.bank_id = Some(id);
    }

    fn set_employee_id(&mut self, employee_id: DbId) {
        self.employee_id = Some(employee_id);
    }

    fn payload(&self) -> Result<serde_json::Value, serde_json::Error> {
        let mut normalized = self.clone();
        normalized.ifsc_code = normalized.ifsc_code.trim().to_uppercase();
        serde_json::to_value(normalized)
    }
}
