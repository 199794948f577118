// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Caller identity and the centralized authorization check.
//!
//! Authentication is an external concern: the identity facility of the host
//! environment supplies the caller's role flag and department affiliation.
//! Every resident-scoped operation funnels through one capability check so
//! the gating rule cannot drift between handlers.

use crate::error::ApiError;
use carelog_audit::Actor;
use carelog_domain::Resident;

/// The authenticated caller as supplied by the external identity facility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    /// The caller's unique identifier.
    pub caller_id: String,
    /// Whether the caller holds the administrator or HR role.
    pub is_admin_or_hr: bool,
    /// The department the caller is assigned to, if any.
    pub department_id: Option<i64>,
}

impl CallerIdentity {
    /// Creates a new `CallerIdentity`.
    #[must_use]
    pub const fn new(caller_id: String, is_admin_or_hr: bool, department_id: Option<i64>) -> Self {
        Self {
            caller_id,
            is_admin_or_hr,
            department_id,
        }
    }

    /// Converts this caller into an audit Actor.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        let actor_type = if self.is_admin_or_hr {
            String::from("admin_or_hr")
        } else {
            String::from("specialist")
        };
        Actor::new(self.caller_id.clone(), actor_type)
    }
}

/// Verifies that the caller may operate on a resident.
///
/// Admin/HR callers always pass; other callers must be assigned to the
/// resident's current department.
///
/// # Errors
///
/// Returns `ApiError::AccessDenied` if the caller lacks access.
pub fn authorize_resident_access(
    caller: &CallerIdentity,
    resident: &Resident,
) -> Result<(), ApiError> {
    if caller.is_admin_or_hr {
        return Ok(());
    }
    if caller.department_id == resident.department_id() {
        return Ok(());
    }
    Err(ApiError::AccessDenied {
        reason: String::from("caller is not assigned to the resident's department"),
    })
}

/// Verifies that the caller may operate on a department's data.
///
/// # Errors
///
/// Returns `ApiError::AccessDenied` if the caller lacks access.
pub fn authorize_department_access(
    caller: &CallerIdentity,
    department_id: i64,
) -> Result<(), ApiError> {
    if caller.is_admin_or_hr || caller.department_id == Some(department_id) {
        return Ok(());
    }
    Err(ApiError::AccessDenied {
        reason: String::from("caller is not assigned to the department"),
    })
}
