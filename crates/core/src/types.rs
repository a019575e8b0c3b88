/// All backend primary keys are auto-assigned integers.
pub type DbId = i64;

/// Calendar dates (dates of birth, issue/expiry, verification) carry no time zone.
pub type Date = chrono::NaiveDate;
