// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Date string helpers.
//!
//! All dates are stored as ISO 8601 text (`YYYY-MM-DD`), which makes month
//! filtering a lexicographic range scan.

use crate::error::PersistenceError;
use carelog_domain::{DATE_FORMAT, TabelMonth};
use time::Date;

/// Formats a calendar date for storage.
#[must_use]
pub fn date_to_string(date: Date) -> String {
    date.format(DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

/// Builds the stored date string for a day of a tabel month.
#[must_use]
pub fn day_to_string(month: &TabelMonth, day: u8) -> String {
    format!("{:04}-{:02}-{:02}", month.year(), month.month(), day)
}

/// Returns the inclusive `(first, last)` date-string bounds of a month.
#[must_use]
pub fn month_bounds(month: &TabelMonth) -> (String, String) {
    (
        day_to_string(month, 1),
        day_to_string(month, month.days_in_month()),
    )
}

/// Extracts the day-of-month from a stored date string.
///
/// # Errors
///
/// Returns `PersistenceError::CorruptRecord` if the string is not a valid
/// stored date.
pub fn day_of_date_string(date: &str) -> Result<u8, PersistenceError> {
    date.get(8..10)
        .and_then(|s| s.parse::<u8>().ok())
        .ok_or_else(|| PersistenceError::CorruptRecord {
            table: String::from("service_logs"),
            detail: format!("unparseable date '{date}'"),
        })
}

/// The current UTC timestamp in RFC 3339 form.
#[must_use]
pub fn now_iso() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("1970-01-01T00:00:00Z"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_month_bounds() {
        let month = TabelMonth::new(2026, 2).unwrap();
        assert_eq!(
            month_bounds(&month),
            (String::from("2026-02-01"), String::from("2026-02-28"))
        );
    }

    #[test]
    fn test_day_of_date_string() {
        assert_eq!(day_of_date_string("2026-02-07").unwrap(), 7);
        assert!(day_of_date_string("garbage").is_err());
    }
}
