// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Input policy validation for batch requests.

use thiserror::Error;

/// Input policy errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputPolicyError {
    /// The batch day list was empty.
    #[error("Day list must not be empty")]
    EmptyDayList,

    /// The batch day list was implausibly large.
    #[error("Day list holds {count} entries; at most {max} are allowed")]
    TooManyDays {
        /// Entries supplied.
        count: usize,
        /// Maximum allowed.
        max: usize,
    },

    /// A history limit was out of range.
    #[error("History limit must be between 1 and {max}")]
    InvalidHistoryLimit {
        /// Maximum allowed.
        max: i64,
    },
}

/// The largest day list a batch mutation accepts (one entry per day).
pub const MAX_BATCH_DAYS: usize = 31;

/// The largest history window a detail read returns.
pub const MAX_HISTORY_LIMIT: i64 = 100;

/// Validates the day list of a batch mutation.
///
/// # Errors
///
/// Returns an error if the list is empty or larger than a month.
pub fn validate_day_list(days: &[u8]) -> Result<(), InputPolicyError> {
    if days.is_empty() {
        return Err(InputPolicyError::EmptyDayList);
    }
    if days.len() > MAX_BATCH_DAYS {
        return Err(InputPolicyError::TooManyDays {
            count: days.len(),
            max: MAX_BATCH_DAYS,
        });
    }
    Ok(())
}

/// Validates a history limit.
///
/// # Errors
///
/// Returns an error if the limit is out of range.
pub fn validate_history_limit(limit: i64) -> Result<(), InputPolicyError> {
    if limit < 1 || limit > MAX_HISTORY_LIMIT {
        return Err(InputPolicyError::InvalidHistoryLimit {
            max: MAX_HISTORY_LIMIT,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_list_bounds() {
        assert_eq!(validate_day_list(&[]), Err(InputPolicyError::EmptyDayList));
        assert!(validate_day_list(&[1, 2, 3]).is_ok());
        let too_many: Vec<u8> = (0..40).collect();
        assert!(validate_day_list(&too_many).is_err());
    }

    #[test]
    fn test_history_limit_bounds() {
        assert!(validate_history_limit(0).is_err());
        assert!(validate_history_limit(10).is_ok());
        assert!(validate_history_limit(101).is_err());
    }
}
