// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar arithmetic for tabel months.
//!
//! The tabel is a day-by-day grid over one calendar month. This module owns
//! the month value type, day validation, weekday resolution (Monday-first, as
//! used by the weekly service schedules), and the weekend/holiday
//! classification the tabel screens display.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::{Date, Month, Weekday};

/// Fixed federal public holidays as (month, day) pairs.
///
/// Only fixed-date holidays are listed; movable observances are not tracked.
const FIXED_HOLIDAYS: &[(u8, u8)] = &[
    (1, 1),
    (1, 2),
    (1, 3),
    (1, 4),
    (1, 5),
    (1, 6),
    (1, 7),
    (1, 8),
    (2, 23),
    (3, 8),
    (5, 1),
    (5, 9),
    (6, 12),
    (11, 4),
];

/// The earliest year a tabel may reference.
const MIN_YEAR: i32 = 2000;
/// The latest year a tabel may reference.
const MAX_YEAR: i32 = 2100;

/// A validated (year, month) pair identifying one tabel month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TabelMonth {
    /// The year value.
    year: i32,
    /// The month number (1-12).
    month: u8,
}

impl TabelMonth {
    /// Creates a new `TabelMonth`.
    ///
    /// # Arguments
    ///
    /// * `year` - The year value (2000-2100)
    /// * `month` - The month number (1-12)
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidMonth` if the month is not 1-12 or the
    /// year is outside the supported range.
    pub fn new(year: i32, month: u8) -> Result<Self, DomainError> {
        if !(1..=12).contains(&month) || !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(DomainError::InvalidMonth { year, month });
        }
        Ok(Self { year, month })
    }

    /// Returns the year value.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month number (1-12).
    #[must_use]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Returns the number of days in this month.
    #[must_use]
    pub fn days_in_month(&self) -> u8 {
        time::util::days_in_year_month(self.year, self.time_month())
    }

    /// Builds the calendar date for a day of this month.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDay` if the day does not exist in this
    /// month.
    pub fn date(&self, day: u8) -> Result<Date, DomainError> {
        Date::from_calendar_date(self.year, self.time_month(), day).map_err(|_| {
            DomainError::InvalidDay {
                year: self.year,
                month: self.month,
                day,
            }
        })
    }

    /// Returns the first day of the month as a calendar date.
    #[must_use]
    pub fn first_day(&self) -> Date {
        // Day 1 exists in every month of the supported range.
        Date::from_calendar_date(self.year, self.time_month(), 1)
            .unwrap_or(Date::MIN)
    }

    /// Returns the Monday-first weekday index (0-6) of a day of this month.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDay` if the day does not exist.
    pub fn weekday_index(&self, day: u8) -> Result<u8, DomainError> {
        Ok(self.date(day)?.weekday().number_days_from_monday())
    }

    /// Returns the days of this month that fall on Saturday or Sunday.
    #[must_use]
    pub fn weekend_days(&self) -> Vec<u8> {
        (1..=self.days_in_month())
            .filter(|day| {
                self.date(*day)
                    .map(|d| matches!(d.weekday(), Weekday::Saturday | Weekday::Sunday))
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Returns the fixed public holidays that fall in this month.
    #[must_use]
    pub fn holiday_days(&self) -> Vec<u8> {
        FIXED_HOLIDAYS
            .iter()
            .filter(|(month, _)| *month == self.month)
            .map(|(_, day)| *day)
            .collect()
    }

    const fn time_month(&self) -> Month {
        match self.month {
            1 => Month::January,
            2 => Month::February,
            3 => Month::March,
            4 => Month::April,
            5 => Month::May,
            6 => Month::June,
            7 => Month::July,
            8 => Month::August,
            9 => Month::September,
            10 => Month::October,
            11 => Month::November,
            _ => Month::December,
        }
    }
}

impl std::fmt::Display for TabelMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}.{}", self.month, self.year)
    }
}
