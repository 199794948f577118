// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Classifies a department of the facility.
///
/// The department type fully determines the derived status of every resident
/// placed in it; status is never stored on the resident itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DepartmentType {
    /// A regular residential-care department.
    #[default]
    Residential,
    /// A mercy (intensive care) department.
    Mercy,
    /// A resident temporarily in hospital.
    Hospital,
    /// A resident temporarily on vacation.
    Vacation,
    /// The resident is deceased and has left the facility.
    Deceased,
}

impl FromStr for DepartmentType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "residential" => Ok(Self::Residential),
            "mercy" => Ok(Self::Mercy),
            "hospital" => Ok(Self::Hospital),
            "vacation" => Ok(Self::Vacation),
            "deceased" => Ok(Self::Deceased),
            _ => Err(DomainError::InvalidDepartmentType(s.to_string())),
        }
    }
}

impl std::fmt::Display for DepartmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl DepartmentType {
    /// Converts this department type to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Residential => "residential",
            Self::Mercy => "mercy",
            Self::Hospital => "hospital",
            Self::Vacation => "vacation",
            Self::Deceased => "deceased",
        }
    }

    /// Returns the resident status derived from this department type.
    ///
    /// Residential and mercy departments both count as active residence;
    /// the remaining types map onto the matching absence status.
    #[must_use]
    pub const fn status_code(&self) -> ResidentStatus {
        match self {
            Self::Residential | Self::Mercy => ResidentStatus::Active,
            Self::Hospital => ResidentStatus::Hospital,
            Self::Vacation => ResidentStatus::Vacation,
            Self::Deceased => ResidentStatus::Discharged,
        }
    }

    /// Returns whether this department houses residents in active care.
    ///
    /// Only residential and mercy departments participate in tabel pickers
    /// and autofill.
    #[must_use]
    pub const fn is_residential_care(&self) -> bool {
        matches!(self, Self::Residential | Self::Mercy)
    }
}

/// The derived status of a resident.
///
/// Always computed from the resident's current department; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResidentStatus {
    /// Living in the facility (residential or mercy department).
    Active,
    /// Temporarily in hospital.
    Hospital,
    /// Temporarily on vacation.
    Vacation,
    /// Left the facility.
    Discharged,
}

impl FromStr for ResidentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "hospital" => Ok(Self::Hospital),
            "vacation" => Ok(Self::Vacation),
            "discharged" => Ok(Self::Discharged),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for ResidentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ResidentStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Hospital => "hospital",
            Self::Vacation => "vacation",
            Self::Discharged => "discharged",
        }
    }
}

/// A department of the care facility.
///
/// Departments carry a unique code and a type. The type determines the
/// derived status of residents placed in the department.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the department has not been persisted yet.
    department_id: Option<i64>,
    /// The display name (e.g., "Department 2").
    name: String,
    /// The unique department code.
    code: String,
    /// The department type, which derives resident status.
    department_type: DepartmentType,
    /// Maximum number of residents the department can house.
    capacity: u32,
}

// Two departments are equal if they have the same code, regardless of IDs.
impl PartialEq for Department {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Department {}

impl Department {
    /// Creates a new `Department` without a persisted ID.
    #[must_use]
    pub const fn new(
        name: String,
        code: String,
        department_type: DepartmentType,
        capacity: u32,
    ) -> Self {
        Self {
            department_id: None,
            name,
            code,
            department_type,
            capacity,
        }
    }

    /// Creates a `Department` with an existing persisted ID.
    #[must_use]
    pub const fn with_id(
        department_id: i64,
        name: String,
        code: String,
        department_type: DepartmentType,
        capacity: u32,
    ) -> Self {
        Self {
            department_id: Some(department_id),
            name,
            code,
            department_type,
            capacity,
        }
    }

    /// Returns the canonical numeric identifier if persisted.
    #[must_use]
    pub const fn department_id(&self) -> Option<i64> {
        self.department_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unique department code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the department type.
    #[must_use]
    pub const fn department_type(&self) -> DepartmentType {
        self.department_type
    }

    /// Returns the capacity.
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Returns the resident status derived from this department.
    #[must_use]
    pub const fn status_code(&self) -> ResidentStatus {
        self.department_type.status_code()
    }
}
