//! Review date parsing.
//!
//! `last_review` arrives as free text. Recognized date and date-time shapes
//! become a calendar date; anything else (blank included) is missing. A bad
//! value never fails the run and never drops the row.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Days from 0001-01-01 (CE day 1) to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

const DATETIME_FORMATS: [&str; 7] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

// Slash dates are read month-first.
const DATE_FORMATS: [&str; 8] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d-%b-%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%Y%m%d",
];

/// Parse a review date, returning `None` for blank or unrecognized input.
pub fn parse_review_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Days since 1970-01-01, the physical representation of a date column.
pub fn epoch_days(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_common_shapes() {
        assert_eq!(parse_review_date("2019-05-21"), Some(ymd(2019, 5, 21)));
        assert_eq!(parse_review_date(" 2019/05/21 "), Some(ymd(2019, 5, 21)));
        assert_eq!(parse_review_date("05/21/2019"), Some(ymd(2019, 5, 21)));
        assert_eq!(parse_review_date("21-May-2019"), Some(ymd(2019, 5, 21)));
        assert_eq!(
            parse_review_date("2019-05-21T13:45:00"),
            Some(ymd(2019, 5, 21))
        );
        assert_eq!(
            parse_review_date("2019-05-21 13:45:00"),
            Some(ymd(2019, 5, 21))
        );
    }

    #[test]
    fn rejects_blank_and_garbage() {
        assert_eq!(parse_review_date(""), None);
        assert_eq!(parse_review_date("   "), None);
        assert_eq!(parse_review_date("not a date"), None);
        assert_eq!(parse_review_date("2019-13-01"), None);
        assert_eq!(parse_review_date("2019-02-30"), None);
    }

    #[test]
    fn epoch_days_matches_unix_epoch() {
        assert_eq!(epoch_days(ymd(1970, 1, 1)), 0);
        assert_eq!(epoch_days(ymd(1970, 1, 2)), 1);
        assert_eq!(epoch_days(ymd(1969, 12, 31)), -1);
        assert_eq!(epoch_days(ymd(2019, 5, 21)), 18_037);
    }
}
