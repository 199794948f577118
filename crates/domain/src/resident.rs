// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::department::{Department, ResidentStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

/// A resident (recipient of social services) of the facility.
///
/// A resident is placed in at most one department and one room. The status
/// is always derived from the current department and never stored, which
/// keeps the two from drifting apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resident {
    /// Canonical internal identifier (opaque, stable, immutable).
    /// Optional to support creation before persistence.
    pub resident_id: Option<i64>,
    /// The resident's last name.
    pub last_name: String,
    /// The resident's first name.
    pub first_name: String,
    /// The resident's patronymic (may be empty).
    pub patronymic: String,
    /// The resident's birth date.
    pub birth_date: Date,
    /// The department the resident currently lives in, if any.
    pub department: Option<Department>,
    /// The room within the department (may be empty).
    pub room: String,
    /// The date the resident was admitted.
    pub admission_date: Option<Date>,
    /// The date of the last status change away from residence.
    pub discharge_date: Option<Date>,
    /// Average per-capita income, used by billing.
    pub income: Option<Decimal>,
    /// Amount actually transferred by the pension fund, used by billing.
    pub pension_payment: Option<Decimal>,
}

impl Resident {
    /// Creates a new `Resident` without a persisted ID.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        last_name: String,
        first_name: String,
        patronymic: String,
        birth_date: Date,
        department: Option<Department>,
        room: String,
    ) -> Self {
        Self {
            resident_id: None,
            last_name,
            first_name,
            patronymic,
            birth_date,
            department,
            room,
            admission_date: None,
            discharge_date: None,
            income: None,
            pension_payment: None,
        }
    }

    /// Returns the resident's full name.
    #[must_use]
    pub fn full_name(&self) -> String {
        [
            self.last_name.as_str(),
            self.first_name.as_str(),
            self.patronymic.as_str(),
        ]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<&str>>()
        .join(" ")
    }

    /// Returns the resident's derived status.
    ///
    /// The status comes from the current department; a resident without a
    /// department counts as active.
    #[must_use]
    pub fn status(&self) -> ResidentStatus {
        self.department
            .as_ref()
            .map_or(ResidentStatus::Active, Department::status_code)
    }

    /// Returns the canonical numeric identifier of the current department.
    #[must_use]
    pub fn department_id(&self) -> Option<i64> {
        self.department
            .as_ref()
            .and_then(Department::department_id)
    }
}
