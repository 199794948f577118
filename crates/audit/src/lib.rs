// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use carelog_domain::ResidentStatus;
use serde::{Deserialize, Serialize};
use time::Date;

/// Represents the entity performing an action.
///
/// An actor is any identifiable entity that initiates a state change:
/// an operator entering tabel data, an administrator moving a resident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., "admin_or_hr", "specialist").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// An immutable record of a resident's status change.
///
/// Appended whenever the resident's department changes. Records are
/// write-once: they are never edited or deleted after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChangeRecord {
    /// The resident whose status changed.
    pub resident_id: i64,
    /// The department before the change, if any.
    pub old_department_id: Option<i64>,
    /// The department after the change, if any.
    pub new_department_id: Option<i64>,
    /// The derived status before the change.
    pub old_status: Option<ResidentStatus>,
    /// The derived status after the change.
    pub new_status: Option<ResidentStatus>,
    /// The actor who made the change.
    pub changed_by: Actor,
    /// Free-text reason or comment.
    pub reason: String,
}

impl StatusChangeRecord {
    /// Creates a new `StatusChangeRecord`.
    ///
    /// Once created, the record is immutable.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        resident_id: i64,
        old_department_id: Option<i64>,
        new_department_id: Option<i64>,
        old_status: Option<ResidentStatus>,
        new_status: Option<ResidentStatus>,
        changed_by: Actor,
        reason: String,
    ) -> Self {
        Self {
            resident_id,
            old_department_id,
            new_department_id,
            old_status,
            new_status,
            changed_by,
            reason,
        }
    }
}

/// An immutable record of a resident's placement change.
///
/// Appended whenever the department or the room changes. A room-only move
/// within the same department produces a placement record but no status
/// record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementChangeRecord {
    /// The resident who was moved.
    pub resident_id: i64,
    /// The department before the change, if any.
    pub old_department_id: Option<i64>,
    /// The department after the change, if any.
    pub new_department_id: Option<i64>,
    /// The room before the change.
    pub old_room: Option<String>,
    /// The room after the change.
    pub new_room: Option<String>,
    /// The derived status before the change.
    pub old_status: Option<ResidentStatus>,
    /// The derived status after the change.
    pub new_status: Option<ResidentStatus>,
    /// Free-text reason or comment.
    pub reason: String,
    /// The effective date of the move.
    pub effective_date: Date,
    /// The actor who made the change.
    pub changed_by: Actor,
}

impl PlacementChangeRecord {
    /// Creates a new `PlacementChangeRecord`.
    ///
    /// Once created, the record is immutable.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        resident_id: i64,
        old_department_id: Option<i64>,
        new_department_id: Option<i64>,
        old_room: Option<String>,
        new_room: Option<String>,
        old_status: Option<ResidentStatus>,
        new_status: Option<ResidentStatus>,
        reason: String,
        effective_date: Date,
        changed_by: Actor,
    ) -> Self {
        Self {
            resident_id,
            old_department_id,
            new_department_id,
            old_room,
            new_room,
            old_status,
            new_status,
            reason,
            effective_date,
            changed_by,
        }
    }

    /// Classifies the kind of movement this record captures.
    #[must_use]
    pub fn movement_kind(&self) -> MovementKind {
        if self.old_department_id != self.new_department_id {
            if self.old_department_id.is_none() {
                MovementKind::Admission
            } else if self.new_department_id.is_none() {
                MovementKind::Departure
            } else {
                MovementKind::Transfer
            }
        } else if self.old_room != self.new_room {
            MovementKind::RoomMove
        } else if self.old_status != self.new_status {
            MovementKind::StatusChange
        } else {
            MovementKind::Other
        }
    }
}

/// The kind of movement a placement record captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementKind {
    /// First placement into a department.
    Admission,
    /// Leaving the facility (no department afterwards).
    Departure,
    /// Transfer between departments.
    Transfer,
    /// Room change within the same department.
    RoomMove,
    /// Status changed without a department or room change.
    StatusChange,
    /// No observable change.
    Other,
}
