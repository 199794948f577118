// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::Weekday;

/// One entry of a department's weekly service schedule.
///
/// An entry states that a service is expected `quantity` times on one
/// weekday for every resident of the department. The autofill engine
/// projects these entries across the days of a target month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSchedule {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the entry has not been persisted yet.
    pub schedule_id: Option<i64>,
    /// The service provided.
    pub service_id: i64,
    /// The department the schedule belongs to.
    pub department_id: i64,
    /// Monday-first weekday index (0-6).
    pub day_of_week: u8,
    /// Expected dosage on that weekday.
    pub quantity: u32,
}

impl ServiceSchedule {
    /// Creates a new `ServiceSchedule` entry.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidWeekday` if `day_of_week` is not 0-6.
    pub const fn new(
        service_id: i64,
        department_id: i64,
        day_of_week: u8,
        quantity: u32,
    ) -> Result<Self, DomainError> {
        if day_of_week > 6 {
            return Err(DomainError::InvalidWeekday(day_of_week));
        }
        Ok(Self {
            schedule_id: None,
            service_id,
            department_id,
            day_of_week,
            quantity,
        })
    }
}

/// Returns the Monday-first index (0-6) of a weekday.
#[must_use]
pub fn weekday_index(weekday: Weekday) -> u8 {
    weekday.number_days_from_monday()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_bounds() {
        assert!(ServiceSchedule::new(1, 1, 0, 2).is_ok());
        assert!(ServiceSchedule::new(1, 1, 6, 2).is_ok());
        assert!(ServiceSchedule::new(1, 1, 7, 2).is_err());
    }

    #[test]
    fn test_weekday_index_is_monday_first() {
        assert_eq!(weekday_index(Weekday::Monday), 0);
        assert_eq!(weekday_index(Weekday::Sunday), 6);
    }
}
