//! Calendar arithmetic for ages and tenures.

use chrono::Datelike;

use crate::types::Date;

/// Completed years between `dob` and `today`. Zero if `dob` is in the future.
pub fn age_on(dob: Date, today: Date) -> u32 {
    if dob > today {
        return 0;
    }
    let mut years = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        years -= 1;
    }
    years.max(0) as u32
}

/// Completed months between two dates. Zero if `to` precedes `from`.
pub fn months_between(from: Date, to: Date) -> u32 {
    if to < from {
        return 0;
    }
    let mut months = (to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32;
    if to.day() < from.day() {
        months -= 1;
    }
    months.max(0) as u32
}

/// Render a month count as `"3 years 2 months"`.
pub fn format_tenure(months: u32) -> String {
    let years = months / 12;
    let rest = months % 12;
    let unit = |n: u32, word: &str| {
        if n == 1 {
            format!("1 {word}")
        } else {
            format!("{n} {word}s")
        }
    };
    match (years, rest) {
        (0, m) => unit(m, "month"),
        (y, 0) => unit(y, "year"),
        (y, m) => format!("{} {}", unit(y, "year"), unit(m, "month")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn age_before_and_after_birthday() {
        assert_eq!(age_on(d(1990, 6, 15), d(2024, 6, 14)), 33);
        assert_eq!(age_on(d(1990, 6, 15), d(2024, 6, 15)), 34);
    }

    #[test]
    fn age_of_future_date_is_zero() {
        assert_eq!(age_on(d(2030, 1, 1), d(2024, 1, 1)), 0);
    }

    #[test]
    fn leap_day_birthday() {
        assert_eq!(age_on(d(2000, 2, 29), d(2023, 2, 28)), 22);
        assert_eq!(age_on(d(2000, 2, 29), d(2023, 3, 1)), 23);
    }

    #[test]
    fn months_between_counts_completed_months() {
        assert_eq!(months_between(d(2020, 1, 15), d(2020, 3, 14)), 1);
        assert_eq!(months_between(d(2020, 1, 15), d(2020, 3, 15)), 2);
        assert_eq!(months_between(d(2020, 3, 1), d(2020, 1, 1)), 0);
    }

    #[test]
    fn tenure_rendering() {
        assert_eq!(format_tenure(0), "0 months");
        assert_eq!(format_tenure(1), "1 month");
        assert_eq!(format_tenure(12), "1 year");
        assert_eq!(format_tenure(38), "3 years 2 months");
    }
}
