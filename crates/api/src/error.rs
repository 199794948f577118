// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use carelog_core::CoreError;
use carelog_domain::DomainError;
use carelog_persistence::PersistenceError;
use tracing::error;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API
/// contract. Validation errors are detected before any write and carry
/// enough detail to render a corrective message; storage failures surface
/// as a generic internal error without leaking internals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The caller lacks role/department authorization for the target.
    AccessDenied {
        /// Why access was denied.
        reason: String,
    },
    /// A mutation was attempted against a locked (resident, year, month).
    TabelLocked {
        /// The year of the locked month.
        year: i32,
        /// The month number (1-12).
        month: u8,
    },
    /// A proposed quantity would exceed the service's monthly cap.
    QuotaExceeded {
        /// The monthly limit.
        limit: u32,
        /// The quantity already logged this month.
        current_total: u64,
    },
    /// A referenced resident/service/department does not exist.
    NotFound {
        /// A human-readable description of what was not found.
        message: String,
    },
    /// Malformed date/quantity/numeric input.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// Autofill performed zero writes because the resident is not active.
    /// By design this is not a failure of the operation itself.
    AutofillSkipped {
        /// The resident's derived status.
        status: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AccessDenied { reason } => write!(f, "Access denied: {reason}"),
            Self::TabelLocked { year, month } => {
                write!(f, "Tabel for {month:02}.{year} is locked against edits")
            }
            Self::QuotaExceeded {
                limit,
                current_total,
            } => {
                write!(
                    f,
                    "Monthly quota exceeded: at most {limit} per month, {current_total} already logged"
                )
            }
            Self::NotFound { message } => write!(f, "Not found: {message}"),
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::AutofillSkipped { status } => {
                write!(f, "Autofill skipped: resident status is '{status}'")
            }
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<crate::input::InputPolicyError> for ApiError {
    fn from(err: crate::input::InputPolicyError) -> Self {
        let field = match err {
            crate::input::InputPolicyError::EmptyDayList
            | crate::input::InputPolicyError::TooManyDays { .. } => String::from("days"),
            crate::input::InputPolicyError::InvalidHistoryLimit { .. } => String::from("limit"),
        };
        Self::InvalidInput {
            field,
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::QuotaExceeded {
            limit,
            current_total,
        } => ApiError::QuotaExceeded {
            limit,
            current_total,
        },
        DomainError::TabelLocked { year, month } => ApiError::TabelLocked { year, month },
        DomainError::AutofillSkipped { status } => ApiError::AutofillSkipped {
            status: status.as_str().to_string(),
        },
        DomainError::InvalidMonth { year, month } => ApiError::InvalidInput {
            field: String::from("month"),
            message: format!("Invalid month: {month:02}.{year}"),
        },
        DomainError::InvalidDay { year, month, day } => ApiError::InvalidInput {
            field: String::from("day"),
            message: format!("Day {day} does not exist in {month:02}.{year}"),
        },
        DomainError::InvalidQuantity(msg) => ApiError::InvalidInput {
            field: String::from("quantity"),
            message: msg,
        },
        DomainError::InvalidDepartmentType(value) => ApiError::InvalidInput {
            field: String::from("department_type"),
            message: format!("Unknown department type: {value}"),
        },
        DomainError::InvalidStatus(value) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown resident status: {value}"),
        },
        DomainError::InvalidPeriodType(value) => ApiError::InvalidInput {
            field: String::from("period_type"),
            message: format!("Unknown period type: {value}"),
        },
        DomainError::InvalidWeekday(value) => ApiError::InvalidInput {
            field: String::from("day_of_week"),
            message: format!("Invalid weekday index: {value}"),
        },
        DomainError::InvalidServiceCode(value) => ApiError::InvalidInput {
            field: String::from("code"),
            message: format!("Invalid service code: '{value}'"),
        },
        DomainError::InvalidMoney { field, value } => ApiError::InvalidInput {
            field,
            message: format!("'{value}' is not a valid decimal amount"),
        },
        DomainError::DateParseError { date_string, error } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Failed to parse date '{date_string}': {error}"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked
/// directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Internal(msg) => ApiError::Internal {
            message: format!("Internal error: {msg}"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Missing records surface as `NotFound`; everything else is logged with
/// context and surfaced as a generic internal error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound(message) => ApiError::NotFound { message },
        other => {
            error!(error = %other, "Persistence failure");
            ApiError::Internal {
                message: String::from("Storage failure"),
            }
        }
    }
}
