// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::department::ResidentStatus;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A proposed service-log mutation would exceed the monthly quota.
    QuotaExceeded {
        /// The monthly limit for the service.
        limit: u32,
        /// The quantity already logged this month (excluding the target day).
        current_total: u64,
    },
    /// The tabel for this resident and month is locked against edits.
    TabelLocked {
        /// The year of the locked month.
        year: i32,
        /// The month number (1-12).
        month: u8,
    },
    /// Autofill performed no writes because the resident is not active.
    AutofillSkipped {
        /// The resident's derived status.
        status: ResidentStatus,
    },
    /// The month number is out of range or the year is unreasonable.
    InvalidMonth {
        /// The year value.
        year: i32,
        /// The month value.
        month: u8,
    },
    /// The day does not exist in the given month.
    InvalidDay {
        /// The year of the month.
        year: i32,
        /// The month number (1-12).
        month: u8,
        /// The invalid day value.
        day: u8,
    },
    /// A quantity value is invalid.
    InvalidQuantity(String),
    /// A department type string is not recognized.
    InvalidDepartmentType(String),
    /// A resident status string is not recognized.
    InvalidStatus(String),
    /// A frequency period type string is not recognized.
    InvalidPeriodType(String),
    /// A schedule weekday index is out of range (must be 0-6, Monday first).
    InvalidWeekday(u8),
    /// A service code is empty or malformed.
    InvalidServiceCode(String),
    /// A monetary value could not be parsed.
    InvalidMoney {
        /// The field that was invalid.
        field: String,
        /// The raw value supplied.
        value: String,
    },
    /// Failed to parse a date from a string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::QuotaExceeded {
                limit,
                current_total,
            } => {
                write!(
                    f,
                    "Monthly quota exceeded: at most {limit} per month, {current_total} already logged"
                )
            }
            Self::TabelLocked { year, month } => {
                write!(f, "Tabel for {month:02}.{year} is locked against edits")
            }
            Self::AutofillSkipped { status } => {
                write!(f, "Autofill skipped: resident status is '{status}'")
            }
            Self::InvalidMonth { year, month } => {
                write!(f, "Invalid month: {month:02}.{year}")
            }
            Self::InvalidDay { year, month, day } => {
                write!(f, "Day {day} does not exist in {month:02}.{year}")
            }
            Self::InvalidQuantity(msg) => write!(f, "Invalid quantity: {msg}"),
            Self::InvalidDepartmentType(value) => {
                write!(f, "Unknown department type: {value}")
            }
            Self::InvalidStatus(value) => write!(f, "Unknown resident status: {value}"),
            Self::InvalidPeriodType(value) => write!(f, "Unknown period type: {value}"),
            Self::InvalidWeekday(value) => {
                write!(f, "Invalid weekday index: {value}. Must be 0-6 (Monday first)")
            }
            Self::InvalidServiceCode(value) => write!(f, "Invalid service code: '{value}'"),
            Self::InvalidMoney { field, value } => {
                write!(f, "Invalid monetary value for '{field}': '{value}'")
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
