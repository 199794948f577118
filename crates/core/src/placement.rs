// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Placement change application.
//!
//! Department, room, and derived-status changes are one domain operation:
//! the decision which audit rows to emit lives here, so the two history
//! trails cannot drift apart across call sites.
//!
//! ## Invariants
//!
//! - A department change appends a status record and a placement record.
//! - A room-only change appends a placement record and no status record.
//! - An edit that changes neither department nor room appends nothing.
//! - Both records and the resident update commit in one transaction
//!   downstream; failing to write a record fails the whole mutation.

use carelog_audit::{Actor, PlacementChangeRecord, StatusChangeRecord};
use carelog_domain::{Department, ResidentStatus};
use time::Date;

/// A resident's placement at a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementState {
    /// The department, if placed.
    pub department: Option<Department>,
    /// The room within the department (may be empty).
    pub room: String,
}

impl PlacementState {
    /// Returns the derived status of this placement, if a department is set.
    #[must_use]
    pub fn status(&self) -> Option<ResidentStatus> {
        self.department.as_ref().map(Department::status_code)
    }

    /// Returns the canonical department identifier, if persisted.
    #[must_use]
    pub fn department_id(&self) -> Option<i64> {
        self.department
            .as_ref()
            .and_then(Department::department_id)
    }
}

/// A requested placement change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementChange {
    /// The target department, if any.
    pub new_department: Option<Department>,
    /// The target room (may be empty).
    pub new_room: String,
    /// Free-text reason or comment.
    pub reason: String,
    /// The effective date of the move.
    pub effective_date: Date,
}

/// The result of applying a placement change.
///
/// Carries the new placement fields plus the audit records to append; the
/// persistence layer commits all of it in one transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementTransition {
    /// The new department identifier to store on the resident.
    pub new_department_id: Option<i64>,
    /// The new room to store on the resident.
    pub new_room: String,
    /// The new derived status, if a department is set.
    pub new_status: Option<ResidentStatus>,
    /// Status record to append, present iff the department changed.
    pub status_record: Option<StatusChangeRecord>,
    /// Placement record to append, present iff department or room changed.
    pub placement_record: Option<PlacementChangeRecord>,
}

/// Applies a placement change, deciding which audit records to emit.
///
/// The two trigger conditions are independent: a department change produces
/// both records, a room-only change produces only the placement record, and
/// a no-op edit produces neither.
#[must_use]
pub fn apply_placement_change(
    resident_id: i64,
    before: &PlacementState,
    change: &PlacementChange,
    actor: &Actor,
) -> PlacementTransition {
    let old_department_id = before.department_id();
    let old_status = before.status();

    let new_department_id = change
        .new_department
        .as_ref()
        .and_then(Department::department_id);
    let new_status = change.new_department.as_ref().map(Department::status_code);

    let department_changed = before.department != change.new_department;
    let room_changed = before.room != change.new_room;

    let status_record = department_changed.then(|| {
        StatusChangeRecord::new(
            resident_id,
            old_department_id,
            new_department_id,
            old_status,
            new_status,
            actor.clone(),
            change.reason.clone(),
        )
    });

    let placement_record = (department_changed || room_changed).then(|| {
        PlacementChangeRecord::new(
            resident_id,
            old_department_id,
            new_department_id,
            Some(before.room.clone()),
            Some(change.new_room.clone()),
            old_status,
            new_status,
            change.reason.clone(),
            change.effective_date,
            actor.clone(),
        )
    });

    PlacementTransition {
        new_department_id,
        new_room: change.new_room.clone(),
        new_status,
        status_record,
        placement_record,
    }
}
